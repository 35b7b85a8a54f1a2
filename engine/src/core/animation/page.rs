//! Page Envelope
//!
//! Computes the transform/opacity/glow applied to a whole caption page for a
//! given frame of its lifetime.
//!
//! # Timing
//!
//! ```text
//! start                                                     end
//!   |--- entry ---|------------- hold -------------|-- exit --|
//!   entry = min(0.3 * fps, duration / 3)
//!   exit  = min(0.2 * fps, duration / 4)
//! ```
//!
//! Frames outside `[start, end]` are clamped to the nearest boundary, so the
//! envelope before the page starts equals the envelope at its first frame.

use serde::{Deserialize, Serialize};
use specta::Type;

use super::interpolate::{interpolate, ramp};
use super::kind::AnimationKind;
use crate::core::styles::{Shadow, ShadowList};
use crate::core::Frame;

const ENTRY_SECONDS: f64 = 0.3;
const EXIT_SECONDS: f64 = 0.2;

// =============================================================================
// Envelope
// =============================================================================

/// Generic page animation state for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct AnimationEnvelope {
    pub scale: f64,
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// Degrees
    pub rotate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<Vec<Shadow>>,
    /// Pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

impl Default for AnimationEnvelope {
    fn default() -> Self {
        Self::identity()
    }
}

impl AnimationEnvelope {
    /// No transform, fully opaque
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotate: 0.0,
            text_shadow: None,
            letter_spacing: None,
        }
    }

    /// CSS transform listing only non-identity parts
    /// (scale, translateY, translateX, rotate).
    pub fn css_transform(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.scale != 1.0 {
            parts.push(format!("scale({})", self.scale));
        }
        if self.translate_y != 0.0 {
            parts.push(format!("translateY({}px)", self.translate_y));
        }
        if self.translate_x != 0.0 {
            parts.push(format!("translateX({}px)", self.translate_x));
        }
        if self.rotate != 0.0 {
            parts.push(format!("rotate({}deg)", self.rotate));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Projects the envelope onto CSS properties
    pub fn to_css(&self) -> CssStyle {
        CssStyle {
            opacity: self.opacity,
            transform: self.css_transform(),
            text_shadow: self
                .text_shadow
                .as_ref()
                .map(|layers| ShadowList(layers.clone()).to_string()),
            letter_spacing: self
                .letter_spacing
                .filter(|spacing| *spacing != 0.0)
                .map(|spacing| format!("{}px", spacing)),
        }
    }
}

/// CSS projection of an [`AnimationEnvelope`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct CssStyle {
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

// =============================================================================
// Timing
// =============================================================================

/// Shared timing primitives for one evaluation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageTiming {
    /// Frames since the page started (clamped frame)
    pub since_start: f64,
    /// Frames until the page ends (clamped frame)
    pub until_end: f64,
    /// Page length in frames
    pub duration: f64,
    pub entry_duration: f64,
    pub exit_duration: f64,
    /// 0 -> 1 over the entry window
    pub entry: f64,
    /// 0 -> 1 over the frames remaining before the exit completes
    pub exit: f64,
}

impl PageTiming {
    pub fn new(frame: Frame, start_frame: Frame, end_frame: Frame, fps: f64) -> Self {
        let end_frame = end_frame.max(start_frame);
        let frame = if frame.is_nan() {
            start_frame
        } else {
            frame.clamp(start_frame, end_frame)
        };

        let since_start = frame - start_frame;
        let until_end = end_frame - frame;
        let duration = end_frame - start_frame;

        let entry_duration = (fps * ENTRY_SECONDS).min(duration / 3.0);
        let exit_duration = (fps * EXIT_SECONDS).min(duration / 4.0);

        Self {
            since_start,
            until_end,
            duration,
            entry_duration,
            exit_duration,
            entry: ramp(since_start, entry_duration),
            exit: ramp(until_end, exit_duration),
        }
    }

    /// Default opacity for animated pages
    pub fn fade(&self) -> f64 {
        self.entry * self.exit
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Computes the page envelope for `frame` within `[start_frame, end_frame]`.
pub fn evaluate_page(
    kind: AnimationKind,
    frame: Frame,
    start_frame: Frame,
    end_frame: Frame,
    fps: f64,
) -> AnimationEnvelope {
    let t = PageTiming::new(frame, start_frame, end_frame, fps);
    let f = t.since_start;
    let identity = AnimationEnvelope::identity();

    match kind {
        AnimationKind::None | AnimationKind::Elastic => identity,

        AnimationKind::Karaoke => {
            let pulse = (f * 0.2).sin() * 0.05 + 1.0;
            let glow = (f * 0.15).sin() * 0.3 + 0.7;
            AnimationEnvelope {
                scale: pulse * interpolate(t.entry, &[0.0, 1.0], &[0.8, 1.0]),
                opacity: t.fade(),
                text_shadow: Some(vec![
                    Shadow::glow(
                        round3(10.0 + glow * 20.0),
                        format!("rgba(255, 255, 0, {})", round3(glow * 0.8)),
                    ),
                    Shadow::glow(
                        round3(20.0 + glow * 40.0),
                        format!("rgba(255, 200, 0, {})", round3(glow * 0.4)),
                    ),
                ]),
                ..identity
            }
        }

        AnimationKind::Pulse => AnimationEnvelope {
            scale: 1.0 + (f * 0.15).sin() * 0.08,
            opacity: t.fade(),
            ..identity
        },

        AnimationKind::Neon => {
            let flicker = if (f * 0.5).sin() * (f * 0.3).cos() > 0.7 {
                0.7
            } else {
                1.0
            };
            let hue = round3((f * 2.0) % 360.0);
            let color = |lightness: u8| format!("hsl({}, 100%, {}%)", hue, lightness);
            AnimationEnvelope {
                scale: interpolate(t.entry, &[0.0, 1.0], &[0.9, 1.0]),
                opacity: t.fade() * flicker,
                text_shadow: Some(vec![
                    Shadow::glow(5.0, color(50)),
                    Shadow::glow(10.0, color(50)),
                    Shadow::glow(20.0, color(50)),
                    Shadow::glow(40.0, color(40)),
                ]),
                ..identity
            }
        }

        AnimationKind::Pop => {
            let pop = interpolate(t.entry, &[0.0, 0.5, 0.75, 1.0], &[0.3, 1.2, 0.95, 1.0]);
            AnimationEnvelope {
                scale: pop * interpolate(t.exit, &[0.0, 0.3], &[0.8, 1.0]),
                opacity: interpolate(t.entry, &[0.0, 0.2], &[0.0, 1.0]) * t.exit,
                ..identity
            }
        }

        AnimationKind::Bounce => AnimationEnvelope {
            translate_y: interpolate(
                t.entry,
                &[0.0, 0.4, 0.6, 0.8, 0.9, 1.0],
                &[-80.0, 15.0, -8.0, 4.0, -2.0, 0.0],
            ),
            scale: interpolate(t.entry, &[0.0, 0.4], &[0.5, 1.0]),
            opacity: t.fade(),
            ..identity
        },

        AnimationKind::Shake => {
            let intensity = interpolate(
                f,
                &[
                    0.0,
                    t.entry_duration,
                    t.duration - t.exit_duration,
                    t.duration,
                ],
                &[0.0, 1.0, 1.0, 0.0],
            );
            AnimationEnvelope {
                translate_x: (f * 2.0).sin() * 4.0 * intensity,
                translate_y: (f * 2.5).cos() * 2.0 * intensity,
                rotate: (f * 1.5).sin() * 2.0 * intensity,
                opacity: t.fade(),
                ..identity
            }
        }

        AnimationKind::Wave => AnimationEnvelope {
            translate_y: (f * 0.15).sin() * 10.0,
            scale: 1.0 + (f * 0.1).sin() * 0.03,
            opacity: t.fade(),
            ..identity
        },

        AnimationKind::Zoom => {
            let zoom = interpolate(t.entry, &[0.0, 0.6, 1.0], &[3.0, 0.95, 1.0]);
            AnimationEnvelope {
                scale: zoom * interpolate(t.exit, &[0.0, 0.5], &[0.5, 1.0]),
                opacity: interpolate(t.entry, &[0.0, 0.3], &[0.0, 1.0]) * t.exit,
                ..identity
            }
        }

        AnimationKind::Typewriter => AnimationEnvelope {
            opacity: t.fade(),
            letter_spacing: Some(interpolate(t.entry, &[0.0, 1.0], &[20.0, 0.0])),
            ..identity
        },

        AnimationKind::SlideUp => AnimationEnvelope {
            translate_y: interpolate(t.entry, &[0.0, 1.0], &[60.0, 0.0])
                + interpolate(t.exit, &[0.0, 1.0], &[-30.0, 0.0]),
            scale: interpolate(t.entry, &[0.0, 1.0], &[0.9, 1.0]),
            opacity: t.fade(),
            ..identity
        },

        AnimationKind::FadeIn => AnimationEnvelope {
            scale: interpolate(t.entry, &[0.0, 1.0], &[0.95, 1.0]),
            opacity: t.fade(),
            ..identity
        },
    }
}

/// Rounds generated CSS numbers so descriptors stay short and stable.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FPS: f64 = 30.0;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // -------------------------------------------------------------------------
    // Timing
    // -------------------------------------------------------------------------

    #[test]
    fn test_timing_windows() {
        // 60 frame page: entry = min(9, 20) = 9, exit = min(6, 15) = 6
        let t = PageTiming::new(0.0, 0.0, 60.0, FPS);
        assert_eq!(t.entry_duration, 9.0);
        assert_eq!(t.exit_duration, 6.0);
        assert_eq!(t.entry, 0.0);
        assert_eq!(t.exit, 1.0);

        let mid = PageTiming::new(30.0, 0.0, 60.0, FPS);
        assert_eq!(mid.fade(), 1.0);

        let end = PageTiming::new(60.0, 0.0, 60.0, FPS);
        assert_eq!(end.exit, 0.0);

        let near_end = PageTiming::new(57.0, 0.0, 60.0, FPS);
        assert_eq!(near_end.exit, 0.5);
    }

    #[test]
    fn test_short_page_shrinks_windows() {
        // 12 frame page: entry = min(9, 4) = 4, exit = min(6, 3) = 3
        let t = PageTiming::new(2.0, 0.0, 12.0, FPS);
        assert_eq!(t.entry_duration, 4.0);
        assert_eq!(t.exit_duration, 3.0);
        assert_eq!(t.entry, 0.5);
    }

    #[test]
    fn test_zero_length_page_is_complete() {
        let t = PageTiming::new(5.0, 5.0, 5.0, FPS);
        assert_eq!(t.fade(), 1.0);
    }

    // -------------------------------------------------------------------------
    // Families
    // -------------------------------------------------------------------------

    #[test]
    fn test_none_is_identity_everywhere() {
        for frame in -10..80 {
            let env = evaluate_page(AnimationKind::None, frame as f64, 0.0, 60.0, FPS);
            assert_eq!(env, AnimationEnvelope::identity());
        }
    }

    #[test]
    fn test_elastic_page_is_identity() {
        let env = evaluate_page(AnimationKind::Elastic, 3.0, 0.0, 60.0, FPS);
        assert_eq!(env, AnimationEnvelope::identity());
    }

    #[test]
    fn test_karaoke_entry_and_glow() {
        let first = evaluate_page(AnimationKind::Karaoke, 0.0, 0.0, 60.0, FPS);
        assert!(approx(first.scale, 0.8));
        assert_eq!(first.opacity, 0.0);

        let shadow = first.text_shadow.unwrap();
        assert_eq!(shadow.len(), 2);
        assert_eq!(shadow[0].blur, 24.0);
        assert_eq!(shadow[0].color, "rgba(255, 255, 0, 0.56)");
    }

    #[test]
    fn test_pulse_scale_bounds() {
        for frame in 0..=60 {
            let env = evaluate_page(AnimationKind::Pulse, frame as f64, 0.0, 60.0, FPS);
            assert!(env.scale >= 0.92 - 1e-12 && env.scale <= 1.08 + 1e-12);
        }
    }

    #[test]
    fn test_neon_flicker_and_hue() {
        let env = evaluate_page(AnimationKind::Neon, 20.0, 0.0, 120.0, FPS);
        let shadow = env.text_shadow.unwrap();
        assert_eq!(shadow[0].color, "hsl(40, 100%, 50%)");
        assert_eq!(shadow[3].color, "hsl(40, 100%, 40%)");

        // Opacity is either full fade or 70% of it
        for frame in 10..100 {
            let env = evaluate_page(AnimationKind::Neon, frame as f64, 0.0, 120.0, FPS);
            assert!(env.opacity == 1.0 || approx(env.opacity, 0.7));
        }
    }

    #[test]
    fn test_pop_overshoot() {
        // entry = 9 frames, entry progress 0.5 at frame 4.5
        let env = evaluate_page(AnimationKind::Pop, 4.5, 0.0, 60.0, FPS);
        assert!(approx(env.scale, 1.2));
        assert_eq!(env.opacity, 1.0);

        let start = evaluate_page(AnimationKind::Pop, 0.0, 0.0, 60.0, FPS);
        assert!(approx(start.scale, 0.3));
        assert_eq!(start.opacity, 0.0);

        let settled = evaluate_page(AnimationKind::Pop, 30.0, 0.0, 60.0, FPS);
        assert_eq!(settled.scale, 1.0);
    }

    #[test]
    fn test_bounce_keyframes() {
        let start = evaluate_page(AnimationKind::Bounce, 0.0, 0.0, 60.0, FPS);
        assert_eq!(start.translate_y, -80.0);
        assert_eq!(start.scale, 0.5);

        let settled = evaluate_page(AnimationKind::Bounce, 20.0, 0.0, 60.0, FPS);
        assert_eq!(settled.translate_y, 0.0);
        assert_eq!(settled.scale, 1.0);
    }

    #[test]
    fn test_shake_amplitude_ramps() {
        let start = evaluate_page(AnimationKind::Shake, 0.0, 0.0, 60.0, FPS);
        assert_eq!(start.translate_x, 0.0);
        assert_eq!(start.translate_y, 0.0);
        assert_eq!(start.rotate, 0.0);

        let end = evaluate_page(AnimationKind::Shake, 60.0, 0.0, 60.0, FPS);
        assert_eq!(end.translate_x, 0.0);

        for frame in 0..=60 {
            let env = evaluate_page(AnimationKind::Shake, frame as f64, 0.0, 60.0, FPS);
            assert!(env.translate_x.abs() <= 4.0);
            assert!(env.translate_y.abs() <= 2.0);
            assert!(env.rotate.abs() <= 2.0);
        }
    }

    #[test]
    fn test_zoom_starts_large() {
        let start = evaluate_page(AnimationKind::Zoom, 0.0, 0.0, 60.0, FPS);
        assert_eq!(start.scale, 3.0);
        assert_eq!(start.opacity, 0.0);

        let settled = evaluate_page(AnimationKind::Zoom, 30.0, 0.0, 60.0, FPS);
        assert_eq!(settled.scale, 1.0);
    }

    #[test]
    fn test_zoom_exit_shrinks() {
        // 3 frames from the end: exit progress 0.5 -> exit scale 1.0
        let env = evaluate_page(AnimationKind::Zoom, 57.0, 0.0, 60.0, FPS);
        assert_eq!(env.scale, 1.0);
        // 1.5 frames from the end: exit 0.25 -> 0.75
        let env = evaluate_page(AnimationKind::Zoom, 58.5, 0.0, 60.0, FPS);
        assert!(approx(env.scale, 0.75));
    }

    #[test]
    fn test_typewriter_letter_spacing() {
        let start = evaluate_page(AnimationKind::Typewriter, 0.0, 0.0, 60.0, FPS);
        assert_eq!(start.letter_spacing, Some(20.0));
        assert_eq!(start.scale, 1.0);

        let settled = evaluate_page(AnimationKind::Typewriter, 30.0, 0.0, 60.0, FPS);
        assert_eq!(settled.letter_spacing, Some(0.0));
    }

    #[test]
    fn test_slide_up() {
        let start = evaluate_page(AnimationKind::SlideUp, 0.0, 0.0, 60.0, FPS);
        assert_eq!(start.translate_y, 60.0);
        assert_eq!(start.scale, 0.9);

        let end = evaluate_page(AnimationKind::SlideUp, 60.0, 0.0, 60.0, FPS);
        assert_eq!(end.translate_y, -30.0);
    }

    #[test]
    fn test_fade_in() {
        let mid = evaluate_page(AnimationKind::FadeIn, 4.5, 0.0, 60.0, FPS);
        assert!(approx(mid.opacity, 0.5));
        assert!(approx(mid.scale, 0.975));
    }

    #[test]
    fn test_wave_bounds() {
        for frame in 0..=60 {
            let env = evaluate_page(AnimationKind::Wave, frame as f64, 0.0, 60.0, FPS);
            assert!(env.translate_y.abs() <= 10.0);
            assert!((env.scale - 1.0).abs() <= 0.03 + 1e-12);
        }
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_frames_outside_window_clamp() {
        for kind in AnimationKind::ALL {
            let at_start = evaluate_page(kind, 100.0, 100.0, 160.0, FPS);
            let at_end = evaluate_page(kind, 160.0, 100.0, 160.0, FPS);

            assert_eq!(evaluate_page(kind, 50.0, 100.0, 160.0, FPS), at_start);
            assert_eq!(evaluate_page(kind, -1e9, 100.0, 160.0, FPS), at_start);
            assert_eq!(evaluate_page(kind, 400.0, 100.0, 160.0, FPS), at_end);
        }
    }

    #[test]
    fn test_evaluation_is_pure() {
        for kind in AnimationKind::ALL {
            for frame in [0.0, 3.3, 17.0, 59.0] {
                assert_eq!(
                    evaluate_page(kind, frame, 0.0, 60.0, FPS),
                    evaluate_page(kind, frame, 0.0, 60.0, FPS)
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // CSS Projection
    // -------------------------------------------------------------------------

    #[test]
    fn test_css_projection() {
        let env = AnimationEnvelope {
            scale: 1.5,
            opacity: 0.5,
            translate_y: 10.0,
            translate_x: 20.0,
            rotate: 45.0,
            text_shadow: Some(vec![Shadow::glow(5.0, "red")]),
            letter_spacing: Some(2.0),
        };
        let css = env.to_css();

        assert_eq!(css.opacity, 0.5);
        assert_eq!(
            css.transform.as_deref(),
            Some("scale(1.5) translateY(10px) translateX(20px) rotate(45deg)")
        );
        assert_eq!(css.text_shadow.as_deref(), Some("0 0 5px red"));
        assert_eq!(css.letter_spacing.as_deref(), Some("2px"));
    }

    #[test]
    fn test_css_omits_identity_parts() {
        let css = AnimationEnvelope {
            letter_spacing: Some(0.0),
            ..AnimationEnvelope::identity()
        }
        .to_css();

        assert!(css.transform.is_none());
        assert!(css.text_shadow.is_none());
        assert!(css.letter_spacing.is_none());
    }
}
