//! Caption System Module
//!
//! Provides the word-level caption pipeline:
//! - Caption data models (CaptionEntry, Page, CaptionTrack)
//! - Time-proximity pagination with an optional token-per-page cap
//! - Sidecar JSON parsing and input sanitization
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caption System                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  models.rs     - Data structures (Entry, Page, Track)           │
//! │  paginate.rs   - Grouping and token-count splitting             │
//! │  sidecar.rs    - Transcript sidecar parsing and sanitization    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use wordreel_lib::core::captions::{paginate, parse_sidecar};
//!
//! let entries = parse_sidecar(&std::fs::read_to_string("clip.json")?)?;
//! let pages = paginate(&entries, 1200, 4);
//! ```

mod models;
mod paginate;
mod sidecar;

// Re-export models
pub use models::{active_page, CaptionEntry, CaptionTrack, Page};

// Re-export pagination
pub use paginate::{
    max_tokens_for_font_size, paginate, PaginationParams, DEFAULT_COMBINE_WITHIN_MS,
    TOKEN_WIDTH_BUDGET,
};

// Re-export sidecar functions
pub use sidecar::{parse_sidecar, read_sidecar, sanitize_entries, sidecar_path_for};
