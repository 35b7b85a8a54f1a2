//! Animation Catalog
//!
//! The closed set of caption animations. Lookups by id are total: an
//! unknown id resolves to [`AnimationKind::Karaoke`].

use serde::{Deserialize, Serialize};
use specta::Type;

/// Page-level animation, also selecting the word highlight family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    /// Static text
    None,
    /// Pulsing scale with a breathing yellow glow
    #[default]
    Karaoke,
    Pulse,
    /// Cycling-hue glow with flicker
    Neon,
    Pop,
    Bounce,
    Shake,
    Wave,
    Zoom,
    Typewriter,
    SlideUp,
    FadeIn,
    /// Static page; words spring in one by one
    Elastic,
}

/// Which per-word highlight behaviour a page uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenFamily {
    /// Active word enlarged, upcoming words dimmed
    Karaoke,
    /// Upcoming words hidden, active word springs in
    Elastic,
}

impl AnimationKind {
    /// Every catalog entry, in display order
    pub const ALL: [AnimationKind; 13] = [
        AnimationKind::None,
        AnimationKind::Karaoke,
        AnimationKind::Pulse,
        AnimationKind::Neon,
        AnimationKind::Pop,
        AnimationKind::Bounce,
        AnimationKind::Shake,
        AnimationKind::Wave,
        AnimationKind::Zoom,
        AnimationKind::Typewriter,
        AnimationKind::SlideUp,
        AnimationKind::FadeIn,
        AnimationKind::Elastic,
    ];

    /// Looks up an animation by id, falling back to karaoke.
    pub fn from_id(id: &str) -> Self {
        match Self::ALL.iter().find(|kind| kind.id() == id) {
            Some(kind) => *kind,
            None => {
                tracing::debug!(id, "Unknown animation id, using karaoke");
                Self::default()
            }
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Karaoke => "karaoke",
            Self::Pulse => "pulse",
            Self::Neon => "neon",
            Self::Pop => "pop",
            Self::Bounce => "bounce",
            Self::Shake => "shake",
            Self::Wave => "wave",
            Self::Zoom => "zoom",
            Self::Typewriter => "typewriter",
            Self::SlideUp => "slideUp",
            Self::FadeIn => "fadeIn",
            Self::Elastic => "elastic",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Karaoke => "Karaoke",
            Self::Pulse => "Pulse",
            Self::Neon => "Neon",
            Self::Pop => "Pop",
            Self::Bounce => "Bounce",
            Self::Shake => "Shake",
            Self::Wave => "Wave",
            Self::Zoom => "Zoom",
            Self::Typewriter => "Typewriter",
            Self::SlideUp => "Slide Up",
            Self::FadeIn => "Fade In",
            Self::Elastic => "Elastic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "Static text",
            Self::Karaoke => "TikTok-style highlight",
            Self::Pulse => "Gentle pulsing",
            Self::Neon => "Flickering neon sign",
            Self::Pop => "Springy pop-in",
            Self::Bounce => "Drops in and bounces to rest",
            Self::Shake => "Vibrating jitter",
            Self::Wave => "Floating wave",
            Self::Zoom => "Zooms in from large",
            Self::Typewriter => "Letters tighten into place",
            Self::SlideUp => "Slides up from below",
            Self::FadeIn => "Soft fade in",
            Self::Elastic => "Words spring in as they are spoken",
        }
    }

    /// Word highlight family for this animation
    pub fn token_family(&self) -> TokenFamily {
        match self {
            Self::Elastic => TokenFamily::Elastic,
            _ => TokenFamily::Karaoke,
        }
    }
}
