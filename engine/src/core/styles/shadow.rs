//! Text Shadows
//!
//! Glows, drop shadows and the synthesized outline are all expressed as
//! shadow layers so the rendering surface only has to apply one property.

use std::fmt;

use serde::{Deserialize, Serialize};
use specta::Type;

/// Offset of each outline copy, in pixels
pub const STROKE_OFFSET: f64 = 3.0;

/// One text-shadow layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    /// Any CSS color (`#RRGGBB`, `rgba(..)`, `hsl(..)`, `transparent`)
    pub color: String,
}

impl Shadow {
    pub fn new(offset_x: f64, offset_y: f64, blur: f64, color: impl Into<String>) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            color: color.into(),
        }
    }

    /// Centered glow
    pub fn glow(blur: f64, color: impl Into<String>) -> Self {
        Self::new(0.0, 0.0, blur, color)
    }
}

impl fmt::Display for Shadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            px(self.offset_x),
            px(self.offset_y),
            px(self.blur),
            self.color
        )
    }
}

fn px(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", value)
    }
}

/// Ordered shadow layers, rendered as a comma-separated CSS list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadowList(pub Vec<Shadow>);

impl ShadowList {
    /// Outline layers followed by any extra layers
    pub fn stroked(stroke_color: &str, extra: &[Shadow]) -> Self {
        let mut layers = stroke_shadows(stroke_color);
        layers.extend_from_slice(extra);
        Self(layers)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ShadowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, shadow) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", shadow)?;
        }
        Ok(())
    }
}

/// Four hard copies offset diagonally, approximating a text stroke
pub fn stroke_shadows(color: &str) -> Vec<Shadow> {
    [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)]
        .iter()
        .map(|(dx, dy)| Shadow::new(dx * STROKE_OFFSET, dy * STROKE_OFFSET, 0.0, color))
        .collect()
}
