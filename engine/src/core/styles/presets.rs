//! Style Presets
//!
//! Built-in TikTok/Reels style caption looks. Each preset pairs a base style
//! (words not being spoken) with an active style (the word being spoken) and
//! a default animation.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use specta::Type;

use super::shadow::Shadow;
use crate::core::animation::AnimationKind;

/// Preset suggested to users when starting a project
pub const DEFAULT_PRESET_ID: StylePresetId = StylePresetId::Classic;

// =============================================================================
// Preset Identifiers
// =============================================================================

/// Style preset catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "kebab-case")]
pub enum StylePresetId {
    Classic,
    Neon,
    ScriptMix,
    Bold,
    Minimal,
    Pop,
    Elegant,
    Street,
}

impl StylePresetId {
    /// Looks up a preset id. Unknown ids mean "no preset".
    pub fn from_id(id: &str) -> Option<Self> {
        let found = preset_catalog().iter().find(|p| p.id.id() == id).map(|p| p.id);
        if found.is_none() {
            tracing::debug!(id, "Unknown style preset id, using defaults");
        }
        found
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Neon => "neon",
            Self::ScriptMix => "script-mix",
            Self::Bold => "bold",
            Self::Minimal => "minimal",
            Self::Pop => "pop",
            Self::Elegant => "elegant",
            Self::Street => "street",
        }
    }

    /// Returns the catalog definition
    pub fn preset(&self) -> &'static StylePreset {
        let catalog = preset_catalog();
        // Every id has exactly one entry; the catalog is built from all variants.
        match catalog.iter().find(|p| p.id == *self) {
            Some(preset) => preset,
            None => &catalog[0],
        }
    }
}

// =============================================================================
// Preset Definition
// =============================================================================

/// One half (base or active) of a preset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct PresetStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    /// Outline color; `None` inherits from the base style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    pub font_weight: u16,
    #[serde(default)]
    pub italic: bool,
    /// Glow/drop shadow layers drawn after the outline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_shadow: Vec<Shadow>,
}

impl PresetStyle {
    fn new(font_family: &str, font_size: f64, color: &str, font_weight: u16) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
            color: color.to_string(),
            stroke_color: None,
            font_weight,
            italic: false,
            text_shadow: vec![],
        }
    }

    fn stroke(mut self, color: &str) -> Self {
        self.stroke_color = Some(color.to_string());
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn shadow(mut self, layers: Vec<Shadow>) -> Self {
        self.text_shadow = layers;
        self
    }
}

/// Complete preset definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub id: StylePresetId,
    pub name: String,
    pub description: String,
    pub base_style: PresetStyle,
    pub active_style: PresetStyle,
    pub animation: AnimationKind,
}

impl StylePreset {
    /// Active-to-base font size ratio
    pub fn active_scale_ratio(&self) -> f64 {
        if self.base_style.font_size > 0.0 {
            self.active_style.font_size / self.base_style.font_size
        } else {
            1.0
        }
    }

    /// Font families this preset needs loaded
    pub fn font_families(&self) -> Vec<&str> {
        let mut families = vec![self.base_style.font_family.as_str()];
        if self.active_style.font_family != self.base_style.font_family {
            families.push(self.active_style.font_family.as_str());
        }
        families
    }

    fn classic() -> Self {
        Self {
            id: StylePresetId::Classic,
            name: "Classic".to_string(),
            description: "Simple and readable".to_string(),
            base_style: PresetStyle::new("Roboto", 56.0, "#FFFFFF", 700).stroke("#000000"),
            active_style: PresetStyle::new("Roboto", 56.0, "#FFD700", 900)
                .shadow(vec![Shadow::glow(20.0, "rgba(255, 215, 0, 0.6)")]),
            animation: AnimationKind::Karaoke,
        }
    }

    fn neon() -> Self {
        Self {
            id: StylePresetId::Neon,
            name: "Neon".to_string(),
            description: "Glowing neon sign".to_string(),
            base_style: PresetStyle::new("Outfit", 52.0, "#E0E0E0", 600).stroke("#1a1a1a"),
            active_style: PresetStyle::new("Outfit", 58.0, "#00FFFF", 700).shadow(vec![
                Shadow::glow(10.0, "#00FFFF"),
                Shadow::glow(20.0, "#00FFFF"),
                Shadow::glow(40.0, "#00FFFF"),
                Shadow::glow(80.0, "#0088FF"),
            ]),
            animation: AnimationKind::Neon,
        }
    }

    fn script_mix() -> Self {
        Self {
            id: StylePresetId::ScriptMix,
            name: "Script Mix".to_string(),
            description: "Script active word over a gothic base".to_string(),
            base_style: PresetStyle::new("Roboto", 48.0, "#FFFFFF", 700).stroke("#000000"),
            active_style: PresetStyle::new("Dancing Script", 72.0, "#FFE033", 700)
                .italic()
                .shadow(vec![Shadow::new(2.0, 2.0, 4.0, "rgba(0,0,0,0.5)")]),
            animation: AnimationKind::Elastic,
        }
    }

    fn bold() -> Self {
        Self {
            id: StylePresetId::Bold,
            name: "Bold".to_string(),
            description: "Heavy, high-impact lettering".to_string(),
            base_style: PresetStyle::new("Anton", 64.0, "#FFFFFF", 400).stroke("#000000"),
            active_style: PresetStyle::new("Anton", 72.0, "#FF4757", 400)
                .shadow(vec![Shadow::new(4.0, 4.0, 0.0, "#000000")]),
            animation: AnimationKind::Pop,
        }
    }

    fn minimal() -> Self {
        Self {
            id: StylePresetId::Minimal,
            name: "Minimal".to_string(),
            description: "Understated and refined".to_string(),
            base_style: PresetStyle::new("Inter", 44.0, "rgba(255,255,255,0.7)", 400)
                .stroke("transparent"),
            active_style: PresetStyle::new("Inter", 48.0, "#FFFFFF", 600),
            animation: AnimationKind::FadeIn,
        }
    }

    fn pop() -> Self {
        Self {
            id: StylePresetId::Pop,
            name: "Pop".to_string(),
            description: "Colorful and playful".to_string(),
            base_style: PresetStyle::new("Fredoka", 52.0, "#FFFFFF", 600).stroke("#FF6B6B"),
            active_style: PresetStyle::new("Fredoka", 64.0, "#FFE66D", 700)
                .stroke("#FF6B6B")
                .shadow(vec![Shadow::new(3.0, 3.0, 0.0, "#FF6B6B")]),
            animation: AnimationKind::Bounce,
        }
    }

    fn elegant() -> Self {
        Self {
            id: StylePresetId::Elegant,
            name: "Elegant".to_string(),
            description: "Classy serif with a gold accent".to_string(),
            base_style: PresetStyle::new("Playfair Display", 48.0, "#F5F5F5", 400)
                .stroke("#1a1a1a")
                .italic(),
            active_style: PresetStyle::new("Playfair Display", 56.0, "#D4AF37", 700)
                .italic()
                .shadow(vec![Shadow::glow(15.0, "rgba(212, 175, 55, 0.5)")]),
            animation: AnimationKind::FadeIn,
        }
    }

    fn street() -> Self {
        Self {
            id: StylePresetId::Street,
            name: "Street".to_string(),
            description: "Graffiti-inspired".to_string(),
            base_style: PresetStyle::new("Bebas Neue", 60.0, "#FFFFFF", 400).stroke("#000000"),
            active_style: PresetStyle::new("Permanent Marker", 68.0, "#39FF14", 400).shadow(vec![
                Shadow::new(3.0, 3.0, 0.0, "#000000"),
                Shadow::new(-1.0, -1.0, 0.0, "#000000"),
            ]),
            animation: AnimationKind::Shake,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

static PRESETS: OnceLock<Vec<StylePreset>> = OnceLock::new();

/// Process-wide preset table, in display order
pub fn preset_catalog() -> &'static [StylePreset] {
    PRESETS.get_or_init(|| {
        vec![
            StylePreset::classic(),
            StylePreset::neon(),
            StylePreset::script_mix(),
            StylePreset::bold(),
            StylePreset::minimal(),
            StylePreset::pop(),
            StylePreset::elegant(),
            StylePreset::street(),
        ]
    })
}

// =============================================================================
// Tests
// =============================================================================
