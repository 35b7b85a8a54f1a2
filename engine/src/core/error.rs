//! Wordreel Error Definitions
//!
//! Defines error types used at the collaborator boundary. The evaluation
//! path (pagination, style resolution, animation, compositing) never fails.

use thiserror::Error;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Caption Errors
    // =========================================================================
    #[error("Invalid sidecar: {0}")]
    InvalidSidecar(String),

    #[error("Sidecar not found: {0}")]
    SidecarNotFound(String),

    // =========================================================================
    // Settings Errors
    // =========================================================================
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // =========================================================================
    // Font Errors
    // =========================================================================
    #[error("Font load failed for '{family}': {reason}")]
    FontLoadFailed { family: String, reason: String },

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
