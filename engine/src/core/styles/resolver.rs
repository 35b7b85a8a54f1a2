//! Style Resolution
//!
//! Merges project overrides, the selected preset and hard defaults into the
//! concrete base/active styles used for one rendering pass.
//!
//! Precedence, per field: explicit override > preset value > hard default.
//! Unknown preset/animation/layout ids fall back silently to the defaults.

use serde::{Deserialize, Serialize};
use specta::Type;

use super::layouts::LayoutKind;
use super::presets::{StylePreset, StylePresetId};
use super::shadow::{Shadow, ShadowList};
use crate::core::animation::AnimationKind;
use crate::core::captions::CaptionEntry;

pub const DEFAULT_FONT_FAMILY: &str = "Roboto";
pub const DEFAULT_FONT_SIZE: f64 = 60.0;
pub const DEFAULT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
const DEFAULT_FONT_WEIGHT: u16 = 700;

const DEFAULT_ACTIVE_COLOR: &str = "#FFD700";
const DEFAULT_ACTIVE_FONT_WEIGHT: u16 = 900;
const DEFAULT_ACTIVE_SCALE_RATIO: f64 = 1.2;
const DEFAULT_ACTIVE_GLOW: (f64, &str) = (20.0, "rgba(255, 215, 0, 0.8)");

/// Width units available to a page before it is shrunk (on a 1080-wide canvas)
pub const CONTAINER_BUDGET: f64 = 900.0;
/// Container top offset when the project sets no `y`
pub const DEFAULT_TOP: f64 = 1600.0;
/// Average glyph width as a fraction of the font size
const GLYPH_WIDTH_FACTOR: f64 = 0.8;

// =============================================================================
// Overrides
// =============================================================================

/// Project-level (or per-word) style overrides.
///
/// Empty strings and non-positive font sizes count as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Horizontal offset of the word group, in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Top of the caption container, in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, alias = "animation", skip_serializing_if = "Option::is_none")]
    pub animation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_id: Option<String>,
}

impl StyleOverrides {
    /// Lifts the overrides a caption entry carries
    pub fn from_entry(entry: &CaptionEntry) -> Self {
        entry.overrides.clone()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn font_family(&self) -> Option<&str> {
        non_empty(&self.font_family)
    }

    fn font_size(&self) -> Option<f64> {
        self.font_size.filter(|s| s.is_finite() && *s > 0.0)
    }

    fn color(&self) -> Option<&str> {
        non_empty(&self.color)
    }

    fn stroke_color(&self) -> Option<&str> {
        non_empty(&self.stroke_color)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
// Resolved Styles
// =============================================================================

/// Concrete style for one token role
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct TokenStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub stroke_color: String,
    pub font_weight: u16,
    pub italic: bool,
    /// Glow layers drawn after the synthesized outline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_shadow: Vec<Shadow>,
}

impl TokenStyle {
    /// Outline copies in the stroke color followed by the glow layers
    pub fn shadows(&self) -> ShadowList {
        ShadowList::stroked(&self.stroke_color, &self.text_shadow)
    }
}

/// Container position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Type)]
pub struct Position {
    pub x: f64,
    /// `None` lets the host's configured default apply
    pub y: Option<f64>,
}

/// Output of [`resolve`]
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub base: TokenStyle,
    pub active: TokenStyle,
    pub animation: AnimationKind,
    pub layout: LayoutKind,
    pub preset: Option<StylePresetId>,
    pub position: Position,
}

impl ResolvedStyle {
    /// Shrink factor for a page of `char_count` characters
    pub fn shrink_scale(&self, char_count: usize, budget: f64) -> f64 {
        shrink_to_fit(char_count, self.base.font_size, budget)
    }

    /// Font families the resolved styles render with
    pub fn font_families(&self) -> Vec<&str> {
        let mut families = vec![self.base.font_family.as_str()];
        if self.active.font_family != self.base.font_family {
            families.push(self.active.font_family.as_str());
        }
        families
    }
}

/// Resolves overrides against the preset catalog and hard defaults.
pub fn resolve(overrides: &StyleOverrides) -> ResolvedStyle {
    let preset_id = overrides
        .preset_id
        .as_deref()
        .and_then(StylePresetId::from_id);
    let preset = preset_id.map(|id| id.preset());

    let base = resolve_base(overrides, preset);
    let active = resolve_active(&base, preset);

    let animation = match overrides.animation_id.as_deref() {
        Some(id) if !id.trim().is_empty() => AnimationKind::from_id(id),
        _ => preset.map(|p| p.animation).unwrap_or_default(),
    };

    let layout = overrides
        .layout_id
        .as_deref()
        .map(LayoutKind::from_id)
        .unwrap_or_default();

    ResolvedStyle {
        base,
        active,
        animation,
        layout,
        preset: preset_id,
        position: Position {
            x: overrides.x.filter(|x| x.is_finite()).unwrap_or(0.0),
            y: overrides.y.filter(|y| y.is_finite()),
        },
    }
}

fn resolve_base(overrides: &StyleOverrides, preset: Option<&StylePreset>) -> TokenStyle {
    let preset_base = preset.map(|p| &p.base_style);

    TokenStyle {
        font_family: overrides
            .font_family()
            .or(preset_base.map(|s| s.font_family.as_str()))
            .unwrap_or(DEFAULT_FONT_FAMILY)
            .to_string(),
        font_size: overrides
            .font_size()
            .or(preset_base.map(|s| s.font_size))
            .unwrap_or(DEFAULT_FONT_SIZE),
        color: overrides
            .color()
            .or(preset_base.map(|s| s.color.as_str()))
            .unwrap_or(DEFAULT_COLOR)
            .to_string(),
        stroke_color: overrides
            .stroke_color()
            .or(preset_base.and_then(|s| s.stroke_color.as_deref()))
            .unwrap_or(DEFAULT_STROKE_COLOR)
            .to_string(),
        font_weight: preset_base
            .map(|s| s.font_weight)
            .unwrap_or(DEFAULT_FONT_WEIGHT),
        italic: preset_base.map(|s| s.italic).unwrap_or(false),
        text_shadow: vec![],
    }
}

fn resolve_active(base: &TokenStyle, preset: Option<&StylePreset>) -> TokenStyle {
    match preset {
        Some(preset) => {
            let active = &preset.active_style;
            TokenStyle {
                font_family: active.font_family.clone(),
                font_size: base.font_size * preset.active_scale_ratio(),
                color: active.color.clone(),
                stroke_color: active
                    .stroke_color
                    .clone()
                    .unwrap_or_else(|| base.stroke_color.clone()),
                font_weight: active.font_weight,
                italic: active.italic,
                text_shadow: active.text_shadow.clone(),
            }
        }
        None => TokenStyle {
            font_family: base.font_family.clone(),
            font_size: base.font_size * DEFAULT_ACTIVE_SCALE_RATIO,
            color: DEFAULT_ACTIVE_COLOR.to_string(),
            stroke_color: base.stroke_color.clone(),
            font_weight: DEFAULT_ACTIVE_FONT_WEIGHT,
            italic: false,
            text_shadow: vec![Shadow::glow(DEFAULT_ACTIVE_GLOW.0, DEFAULT_ACTIVE_GLOW.1)],
        },
    }
}

/// Uniform scale that fits an estimated page width into `budget`.
///
/// Width is estimated as `chars * font_size * 0.8`; pages that fit return 1.
pub fn shrink_to_fit(char_count: usize, font_size: f64, budget: f64) -> f64 {
    let estimated_width = char_count as f64 * font_size * GLYPH_WIDTH_FACTOR;
    if estimated_width > budget && estimated_width > 0.0 {
        budget / estimated_width
    } else {
        1.0
    }
}

// =============================================================================
// Tests
// =============================================================================
