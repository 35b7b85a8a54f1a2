//! Style System Module
//!
//! Static catalogs and the resolver that turns project overrides into
//! concrete token styles:
//! - `presets.rs`  - Named style presets (base + active look, default animation)
//! - `layouts.rs`  - Word layout presets (horizontal wrap / vertical stack)
//! - `shadow.rs`   - Text-shadow layers and stroke synthesis
//! - `resolver.rs` - Override > preset > default precedence, shrink-to-fit

mod layouts;
mod presets;
mod resolver;
mod shadow;

pub use layouts::{LayoutDirection, LayoutKind};
pub use presets::{preset_catalog, PresetStyle, StylePreset, StylePresetId, DEFAULT_PRESET_ID};
pub use resolver::{
    resolve, shrink_to_fit, Position, ResolvedStyle, StyleOverrides, TokenStyle,
    CONTAINER_BUDGET, DEFAULT_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE_COLOR,
    DEFAULT_TOP,
};
pub use shadow::{stroke_shadows, Shadow, ShadowList, STROKE_OFFSET};
