//! Wordreel Core Engine
//!
//! Caption pagination, style resolution, animation curves and the frame
//! compositor that ties them together.

pub mod animation;
pub mod captions;
pub mod compositor;
pub mod fonts;
pub mod settings;
pub mod styles;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
