//! Font Loading Registry
//!
//! Tracks which font families have been requested so each one is fetched at
//! most once per registry. Fetching is delegated to an injected
//! [`FontLoader`] and runs fire-and-forget on the current tokio runtime;
//! rendering never waits on it.
//!
//! A failed load is logged and the family stays marked as requested, so it
//! is not retried. Hosts that want a retry create a fresh registry. A
//! request made with no runtime available records nothing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::styles::ResolvedStyle;
use crate::core::CoreResult;

/// Families offered in font pickers
pub const POPULAR_FONTS: [&str; 20] = [
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Oswald",
    "Raleway",
    "Poppins",
    "Anton",
    "Bebas Neue",
    "Fredoka",
    "Dancing Script",
    "Pacifico",
    "Playfair Display",
    "Permanent Marker",
    "Bangers",
    "Lobster",
    "Righteous",
    "Archivo Black",
    "Inter",
    "Outfit",
];

const GOOGLE_FONTS_CSS_URL: &str = "https://fonts.googleapis.com/css2";

/// Stylesheet URL serving `family` in the weights captions use
pub fn google_fonts_url(family: &str) -> String {
    format!(
        "{}?family={}:wght@400;700;900&display=swap",
        GOOGLE_FONTS_CSS_URL,
        family.trim().replace(' ', "+")
    )
}

/// Families a page rendered with `style` needs
pub fn fonts_for(style: &ResolvedStyle) -> Vec<String> {
    style
        .font_families()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Loader
// =============================================================================

/// Fetches and installs one font family
#[async_trait]
pub trait FontLoader: Send + Sync {
    async fn load(&self, family: &str) -> CoreResult<()>;
}

/// Outcome of [`FontRegistry::request_load`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRequest {
    /// Empty family name, nothing to do
    Skipped,
    /// Already requested by this registry
    AlreadyRequested,
    /// First request, load started
    Requested,
    /// No tokio runtime on this thread; nothing recorded, a later call retries
    NoRuntime,
}

// =============================================================================
// Registry
// =============================================================================

/// Per-process record of requested font families
pub struct FontRegistry {
    loader: Arc<dyn FontLoader>,
    requested: Mutex<HashSet<String>>,
}

impl FontRegistry {
    pub fn new(loader: Arc<dyn FontLoader>) -> Self {
        Self {
            loader,
            requested: Mutex::new(HashSet::new()),
        }
    }

    /// Requests `family`, starting a load the first time it is seen.
    pub fn request_load(&self, family: &str) -> FontRequest {
        let family = family.trim();
        if family.is_empty() {
            return FontRequest::Skipped;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!(family, "No async runtime available, font load deferred");
                return FontRequest::NoRuntime;
            }
        };

        {
            let mut requested = self
                .requested
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !requested.insert(family.to_string()) {
                return FontRequest::AlreadyRequested;
            }
        }

        debug!(family, "Loading font");
        let loader = Arc::clone(&self.loader);
        let family = family.to_string();
        handle.spawn(async move {
            if let Err(e) = loader.load(&family).await {
                warn!(family = %family, error = %e, "Font load failed");
            }
        });

        FontRequest::Requested
    }

    /// Requests every family `style` renders with
    pub fn request_for(&self, style: &ResolvedStyle) -> Vec<FontRequest> {
        style
            .font_families()
            .into_iter()
            .map(|family| self.request_load(family))
            .collect()
    }

    pub fn is_requested(&self, family: &str) -> bool {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(family.trim())
    }

    /// Number of distinct families requested so far
    pub fn requested_count(&self) -> usize {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("requested", &self.requested_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
