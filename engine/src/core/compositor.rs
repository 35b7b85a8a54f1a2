//! Frame Compositor
//!
//! Ties pagination, style resolution and animation together: for one
//! playback instant it finds the visible page and returns everything the
//! rendering surface needs to draw it, or `None` between captions.
//!
//! Both the interactive preview and the offline encoder call into this
//! module, and both must get byte-identical descriptors for the same inputs.
//! Nothing here reads a clock, caches state or performs I/O.

use serde::{Deserialize, Serialize};
use specta::Type;
use tracing::trace;

use crate::core::animation::{
    animator_for, evaluate_page, AnimationEnvelope, AnimationKind, CssStyle, StyleRole, TokenState,
    TokenTiming,
};
use crate::core::captions::{active_page, Page};
use crate::core::settings::RenderSettings;
use crate::core::styles::{resolve, LayoutDirection, StyleOverrides, TokenStyle};
use crate::core::{frame_to_ms, ms_to_frame, sanitize_fps, Frame, TimeMs};

// =============================================================================
// Descriptor Types
// =============================================================================

/// Everything needed to draw the visible caption page for one instant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct RenderDescriptor {
    /// Index of the visible page
    pub page_index: usize,
    pub page_start_ms: TimeMs,
    pub page_duration_ms: TimeMs,
    /// Display text of the page
    pub text: String,
    pub animation: AnimationKind,
    pub container: ContainerDescriptor,
    pub layout: LayoutDescriptor,
    /// Words in page order
    pub tokens: Vec<TokenDescriptor>,
}

/// Transform and placement applied to the whole word group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDescriptor {
    /// Page-level animation state
    pub envelope: AnimationEnvelope,
    /// Shrink-to-fit factor, composed after the animation scale
    pub shrink_scale: f64,
    /// Container top, in canvas pixels
    pub top: f64,
    /// Horizontal offset of the word group, in canvas pixels
    pub offset_x: f64,
    /// CSS projection with the shrink scale appended to the transform
    pub css: CssStyle,
}

/// How words are arranged inside the container
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    pub direction: LayoutDirection,
    pub gap_px: f64,
    pub wrap: bool,
}

/// One styled word
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    /// Trimmed word text
    pub text: String,
    pub state: TokenState,
    pub role: StyleRole,
    pub style: TokenStyle,
    pub scale: f64,
    pub opacity: f64,
    /// Outline plus glow, as a CSS `text-shadow` list
    pub text_shadow: String,
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the page visible at `current_time_ms` with default settings.
pub fn render(
    pages: &[Page],
    current_time_ms: f64,
    style: &StyleOverrides,
    fps: f64,
) -> Option<RenderDescriptor> {
    let settings = RenderSettings {
        fps,
        ..RenderSettings::default()
    };
    render_with(pages, current_time_ms, style, &settings)
}

/// Renders the page visible at `current_time_ms` using `settings`.
pub fn render_with(
    pages: &[Page],
    current_time_ms: f64,
    style: &StyleOverrides,
    settings: &RenderSettings,
) -> Option<RenderDescriptor> {
    let fps = sanitize_fps(settings.fps);
    let frame = current_time_ms / 1000.0 * fps;
    compose(pages, current_time_ms, frame, style, settings, fps)
}

/// Renders an integer frame, as the offline encoder does.
///
/// The frame goes through its playback time so the result is identical to
/// [`render_with`] at `frame_to_ms(frame, fps)`.
pub fn render_frame(
    pages: &[Page],
    frame: i64,
    style: &StyleOverrides,
    settings: &RenderSettings,
) -> Option<RenderDescriptor> {
    let fps = sanitize_fps(settings.fps);
    render_with(pages, frame_to_ms(frame, fps), style, settings)
}

fn compose(
    pages: &[Page],
    time_ms: f64,
    frame: Frame,
    style: &StyleOverrides,
    settings: &RenderSettings,
    fps: f64,
) -> Option<RenderDescriptor> {
    if !time_ms.is_finite() {
        return None;
    }
    let (page_index, page) = active_page(pages, time_ms)?;
    trace!(page_index, time_ms, "Composing caption page");

    let resolved = resolve(style);

    let start_frame = ms_to_frame(page.start_ms, fps);
    let end_frame = ms_to_frame(page.end_ms(), fps);
    let envelope = evaluate_page(resolved.animation, frame, start_frame, end_frame, fps);

    let shrink_scale = resolved.shrink_scale(page.char_count(), settings.container_budget);
    let mut css = envelope.to_css();
    css.transform = Some(match css.transform.take() {
        Some(transform) => format!("{} scale({})", transform, shrink_scale),
        None => format!("scale({})", shrink_scale),
    });

    let animator = animator_for(resolved.animation);
    let tokens = page
        .tokens
        .iter()
        .map(|token| {
            let timing = TokenTiming::at(time_ms, token);
            let animated = animator.animate(timing);
            let token_style = match animated.role {
                StyleRole::Base => &resolved.base,
                StyleRole::Active => &resolved.active,
            };

            TokenDescriptor {
                text: token.text.trim().to_string(),
                state: timing.state,
                role: animated.role,
                style: token_style.clone(),
                scale: animated.scale,
                opacity: animated.opacity,
                text_shadow: token_style.shadows().to_string(),
            }
        })
        .collect();

    Some(RenderDescriptor {
        page_index,
        page_start_ms: page.start_ms,
        page_duration_ms: page.duration_ms,
        text: page.text.clone(),
        animation: resolved.animation,
        container: ContainerDescriptor {
            envelope,
            shrink_scale,
            top: resolved.position.y.unwrap_or(settings.default_top),
            offset_x: resolved.position.x,
            css,
        },
        layout: LayoutDescriptor {
            direction: resolved.layout.direction(),
            gap_px: resolved.layout.gap_px(),
            wrap: resolved.layout.wraps(),
        },
        tokens,
    })
}

// =============================================================================
// Tests
// =============================================================================
