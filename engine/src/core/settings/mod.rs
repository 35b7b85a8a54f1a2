//! Render Settings
//!
//! Host-level knobs shared by the preview and the offline encoder:
//! frame rate, pagination gap and cap, and the container geometry used by
//! shrink-to-fit and placement.
//!
//! Settings are tolerant: out-of-range values are clamped back to something
//! renderable instead of failing, so an old or hand-edited file never stops
//! a render.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use specta::Type;
use tracing::{debug, info, warn};

use crate::core::captions::{PaginationParams, DEFAULT_COMBINE_WITHIN_MS};
use crate::core::styles::{ResolvedStyle, CONTAINER_BUDGET, DEFAULT_TOP};
use crate::core::{CoreError, CoreResult, TimeMs, DEFAULT_FPS};

const MIN_FPS: f64 = 1.0;
const MAX_FPS: f64 = 240.0;

/// Rendering configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    #[serde(default = "default_fps")]
    pub fps: f64,

    /// Maximum gap between words on the same page
    #[serde(default = "default_combine_within_ms")]
    pub combine_within_ms: TimeMs,

    /// Explicit token cap; derived from the base font size when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens_per_page: Option<usize>,

    /// Width a page may occupy before it is shrunk
    #[serde(default = "default_container_budget")]
    pub container_budget: f64,

    /// Container top when the project sets no `y`
    #[serde(default = "default_top")]
    pub default_top: f64,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_combine_within_ms() -> TimeMs {
    DEFAULT_COMBINE_WITHIN_MS
}

fn default_container_budget() -> f64 {
    CONTAINER_BUDGET
}

fn default_top() -> f64 {
    DEFAULT_TOP
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            combine_within_ms: default_combine_within_ms(),
            max_tokens_per_page: None,
            container_budget: default_container_budget(),
            default_top: default_top(),
        }
    }
}

impl RenderSettings {
    /// Clamps every field into a renderable range.
    pub fn normalize(&mut self) {
        self.fps = if self.fps.is_finite() {
            self.fps.clamp(MIN_FPS, MAX_FPS)
        } else {
            default_fps()
        };

        self.combine_within_ms = self.combine_within_ms.max(0);
        self.max_tokens_per_page = self.max_tokens_per_page.filter(|cap| *cap > 0);

        self.container_budget = positive_or(self.container_budget, default_container_budget());
        if !self.default_top.is_finite() {
            self.default_top = default_top();
        }
    }

    /// Returns a normalized copy
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Pagination inputs for a resolved style.
    ///
    /// An explicit cap wins; otherwise the cap follows the base font size.
    pub fn pagination_params(&self, style: &ResolvedStyle) -> PaginationParams {
        match self.max_tokens_per_page {
            Some(cap) => PaginationParams::new(self.combine_within_ms, cap),
            None => PaginationParams::for_font_size(self.combine_within_ms, style.base.font_size),
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Loads settings from a JSON file, returning defaults if it doesn't exist.
pub fn load_settings(path: &Path) -> CoreResult<RenderSettings> {
    if !path.exists() {
        info!(path = %path.display(), "Settings file not found, using defaults");
        return Ok(RenderSettings::default());
    }

    let content = fs::read_to_string(path)?;
    let settings: RenderSettings = serde_json::from_str(&content)
        .map_err(|e| CoreError::InvalidSettings(format!("{}: {}", path.display(), e)))?;

    let normalized = settings.clone().normalized();
    if normalized != settings {
        warn!(path = %path.display(), "Settings contained out-of-range values, clamped");
    }
    debug!(fps = normalized.fps, "Loaded render settings");
    Ok(normalized)
}

// =============================================================================
// Tests
// =============================================================================
