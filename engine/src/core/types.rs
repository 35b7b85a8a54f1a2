//! Wordreel Core Type Definitions
//!
//! Time and frame primitives shared by the paginator, the animation
//! evaluator and the compositor.

use tracing::debug;

// =============================================================================
// Time Types
// =============================================================================

/// Caption timestamp in whole milliseconds
pub type TimeMs = i64;

/// Frame position. Fractional values are allowed for the interactive clock.
pub type Frame = f64;

/// Fallback frame rate when a caller passes a non-positive or non-finite fps
pub const DEFAULT_FPS: f64 = 30.0;

/// Returns a usable frame rate, substituting [`DEFAULT_FPS`] for bad input.
///
/// Runs on every rendered frame, so it only logs at debug level; settings
/// files are validated once by `RenderSettings::normalize`.
pub fn sanitize_fps(fps: f64) -> f64 {
    if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        debug!(fps = fps, "Invalid fps, defaulting to {}", DEFAULT_FPS);
        DEFAULT_FPS
    }
}

/// Converts a millisecond timestamp to the frame it falls on (`floor(ms / 1000 * fps)`).
pub fn ms_to_frame(ms: TimeMs, fps: f64) -> Frame {
    (ms as f64 / 1000.0 * fps).floor()
}

/// Converts a frame index to its playback time in milliseconds.
pub fn frame_to_ms(frame: i64, fps: f64) -> f64 {
    frame as f64 / fps * 1000.0
}
