//! Word Highlighting
//!
//! Each word on the visible page is `Future`, `Active` or `Past` relative to
//! the playback time. A [`TokenAnimator`], chosen once per page from the
//! resolved animation, turns that state into a scale, an opacity and the
//! style role (base or active) the word renders with.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use specta::Type;

use super::interpolate::interpolate;
use super::kind::{AnimationKind, TokenFamily};
use crate::core::captions::CaptionEntry;

// =============================================================================
// Token State
// =============================================================================

/// Position of a word relative to the playback time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    Future,
    Active,
    Past,
}

impl TokenState {
    /// `Future` before start, `Active` in `[start, end)`, `Past` after
    pub fn at(now_ms: f64, start_ms: f64, end_ms: f64) -> Self {
        if now_ms < start_ms {
            Self::Future
        } else if now_ms < end_ms {
            Self::Active
        } else {
            Self::Past
        }
    }
}

/// Which resolved style a word renders with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    Base,
    Active,
}

/// State of one word at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenTiming {
    pub state: TokenState,
    /// 0..1 through the active window (0 outside it)
    pub progress: f64,
    /// Milliseconds since the word started (0 before it)
    pub elapsed_ms: f64,
}

impl TokenTiming {
    pub fn at(now_ms: f64, token: &CaptionEntry) -> Self {
        let start = token.start_ms as f64;
        let end = token.end_ms as f64;
        let state = TokenState::at(now_ms, start, end);

        let (progress, elapsed_ms) = match state {
            TokenState::Active => {
                let span = end - start;
                let progress = if span > 0.0 {
                    ((now_ms - start) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                (progress, now_ms - start)
            }
            TokenState::Past => (1.0, now_ms - start),
            TokenState::Future => (0.0, 0.0),
        };

        Self {
            state,
            progress,
            elapsed_ms,
        }
    }
}

/// Per-word animation output
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct TokenEnvelope {
    pub scale: f64,
    pub opacity: f64,
    pub role: StyleRole,
}

impl TokenEnvelope {
    fn base(opacity: f64) -> Self {
        Self {
            scale: 1.0,
            opacity,
            role: StyleRole::Base,
        }
    }
}

// =============================================================================
// Animators
// =============================================================================

/// Word highlight behaviour
pub trait TokenAnimator: Send + Sync {
    fn animate(&self, timing: TokenTiming) -> TokenEnvelope;
}

/// Active word swells slightly over its window, upcoming words are dimmed.
#[derive(Clone, Copy, Debug, Default)]
pub struct KaraokeHighlight;

impl TokenAnimator for KaraokeHighlight {
    fn animate(&self, timing: TokenTiming) -> TokenEnvelope {
        match timing.state {
            TokenState::Past => TokenEnvelope::base(1.0),
            TokenState::Active => TokenEnvelope {
                scale: 1.1 + (PI * timing.progress).sin() * 0.1,
                opacity: 1.0,
                role: StyleRole::Active,
            },
            TokenState::Future => TokenEnvelope::base(0.5),
        }
    }
}

/// Words stay hidden until spoken, then spring in with overshoot.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElasticHighlight;

impl TokenAnimator for ElasticHighlight {
    fn animate(&self, timing: TokenTiming) -> TokenEnvelope {
        match timing.state {
            TokenState::Future => TokenEnvelope {
                scale: 0.0,
                opacity: 0.0,
                role: StyleRole::Base,
            },
            TokenState::Active => TokenEnvelope {
                scale: interpolate(timing.elapsed_ms, &[0.0, 150.0, 250.0], &[0.0, 1.3, 1.1]),
                opacity: 1.0,
                role: StyleRole::Active,
            },
            TokenState::Past => TokenEnvelope::base(1.0),
        }
    }
}

static KARAOKE: KaraokeHighlight = KaraokeHighlight;
static ELASTIC: ElasticHighlight = ElasticHighlight;

/// Selects the animator for a page's animation
pub fn animator_for(kind: AnimationKind) -> &'static dyn TokenAnimator {
    match kind.token_family() {
        TokenFamily::Karaoke => &KARAOKE,
        TokenFamily::Elastic => &ELASTIC,
    }
}

/// Evaluates one word without holding on to an animator
pub fn evaluate_token(
    kind: AnimationKind,
    state: TokenState,
    progress: f64,
    elapsed_ms: f64,
) -> TokenEnvelope {
    animator_for(kind).animate(TokenTiming {
        state,
        progress,
        elapsed_ms,
    })
}

// =============================================================================
// Tests
// =============================================================================
