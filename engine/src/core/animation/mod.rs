//! Animation System Module
//!
//! Frame-accurate animation curves for caption pages and words:
//! - `kind.rs`        - Animation catalog (closed set of ids, total lookup)
//! - `interpolate.rs` - Clamped piecewise-linear keyframe interpolation
//! - `page.rs`        - Page envelope (scale, opacity, translation, glow)
//! - `token.rs`       - Per-word highlight state and token animators
//!
//! Every function here is pure. Nothing is cached between frames, so seeks
//! in either direction need no invalidation.

mod interpolate;
mod kind;
mod page;
mod token;

pub use interpolate::{interpolate, ramp};
pub use kind::{AnimationKind, TokenFamily};
pub use page::{evaluate_page, AnimationEnvelope, CssStyle, PageTiming};
pub use token::{
    animator_for, evaluate_token, ElasticHighlight, KaraokeHighlight, StyleRole, TokenAnimator,
    TokenEnvelope, TokenState, TokenTiming,
};
