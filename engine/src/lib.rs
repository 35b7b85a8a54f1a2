//! Wordreel Core Library
//!
//! Word-level ("karaoke") caption engine. Groups timestamped words into
//! display pages and, for any playback instant, produces a fully resolved,
//! styled and animated description of the visible words.
//!
//! The same evaluation drives the interactive preview and the offline
//! frame-by-frame encoder, so every function on the render path is pure:
//! identical inputs always yield identical descriptors.
//!
//! ## TypeScript Bindings
//!
//! Wire types derive `specta::Type` so the preview surface can consume
//! `RenderDescriptor` without a hand-maintained mirror.

pub mod core;

pub use crate::core::{
    captions::{paginate, parse_sidecar, CaptionEntry, CaptionTrack, Page, PaginationParams},
    compositor::{render, render_frame, RenderDescriptor},
    CoreError, CoreResult,
};
