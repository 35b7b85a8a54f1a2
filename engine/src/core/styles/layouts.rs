//! Layout Presets
//!
//! How the words of a page are arranged inside the caption container.
//! Layouts are independent of style presets.

use serde::{Deserialize, Serialize};
use specta::Type;

/// Word flow direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Words side by side, wrapping, centered
    Horizontal,
    /// One word per line, centered
    Vertical,
}

/// Layout catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Horizontal,
    Vertical,
}

impl LayoutKind {
    /// Every catalog entry, in display order
    pub const ALL: [LayoutKind; 2] = [LayoutKind::Horizontal, LayoutKind::Vertical];

    /// Looks up a layout by id. Unknown ids fall back to horizontal.
    pub fn from_id(id: &str) -> Self {
        match id {
            "vertical" => Self::Vertical,
            "horizontal" => Self::Horizontal,
            other => {
                tracing::debug!(id = other, "Unknown layout id, using horizontal");
                Self::default()
            }
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical (column)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Horizontal => "Words flow left to right (standard)",
            Self::Vertical => "Words stacked in a column",
        }
    }

    pub fn direction(&self) -> LayoutDirection {
        match self {
            Self::Horizontal => LayoutDirection::Horizontal,
            Self::Vertical => LayoutDirection::Vertical,
        }
    }

    /// Space between words in pixels
    pub fn gap_px(&self) -> f64 {
        match self {
            Self::Horizontal => 8.0,
            Self::Vertical => 12.0,
        }
    }

    /// Whether words wrap onto new lines
    pub fn wraps(&self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_lookup() {
        assert_eq!(LayoutKind::from_id("vertical"), LayoutKind::Vertical);
        assert_eq!(LayoutKind::from_id("horizontal"), LayoutKind::Horizontal);
        assert_eq!(LayoutKind::from_id("diagonal"), LayoutKind::Horizontal);
        assert_eq!(LayoutKind::from_id(""), LayoutKind::Horizontal);
    }

    #[test]
    fn test_layout_geometry() {
        assert_eq!(LayoutKind::Horizontal.gap_px(), 8.0);
        assert!(LayoutKind::Horizontal.wraps());
        assert_eq!(LayoutKind::Vertical.gap_px(), 12.0);
        assert!(!LayoutKind::Vertical.wraps());
        assert_eq!(LayoutKind::Vertical.direction(), LayoutDirection::Vertical);
    }

    #[test]
    fn test_ids_round_trip_through_lookup() {
        for kind in LayoutKind::ALL {
            assert_eq!(LayoutKind::from_id(kind.id()), kind);
        }
    }
}
