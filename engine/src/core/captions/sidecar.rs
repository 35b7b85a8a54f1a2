//! Transcript Sidecar Parsing
//!
//! Transcription writes one JSON file next to the source media, holding an
//! array of word objects:
//!
//! ```json
//! [
//!   { "text": "Hello", "startMs": 0, "endMs": 420 },
//!   { "text": "world", "startInMs": 420, "endInMs": 900, "color": "#FFD700" }
//! ]
//! ```
//!
//! Malformed words are dropped with a warning instead of failing the whole
//! file. Only a top-level value that is not an array is an error.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use super::models::CaptionEntry;
use crate::core::styles::StyleOverrides;
use crate::core::{CoreError, CoreResult, TimeMs};

/// Returns the sidecar path for a media file (`clip.mp4` -> `clip.json`).
pub fn sidecar_path_for(media_path: &Path) -> PathBuf {
    media_path.with_extension("json")
}

/// Reads and parses a sidecar file.
pub fn read_sidecar(path: &Path) -> CoreResult<Vec<CaptionEntry>> {
    if !path.exists() {
        return Err(CoreError::SidecarNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_sidecar(&content)
}

/// Parses sidecar JSON into sanitized entries, preserving order.
pub fn parse_sidecar(content: &str) -> CoreResult<Vec<CaptionEntry>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(CoreError::InvalidSidecar(
            "Expected a JSON array of words".to_string(),
        ));
    };

    let total = items.len();
    let entries: Vec<CaptionEntry> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| parse_entry(index, item))
        .collect();

    if entries.len() != total {
        warn!(
            kept = entries.len(),
            dropped = total - entries.len(),
            "Dropped malformed sidecar entries"
        );
    }

    Ok(entries)
}

/// Drops entries with empty text or a non-positive duration.
pub fn sanitize_entries(entries: Vec<CaptionEntry>) -> Vec<CaptionEntry> {
    let total = entries.len();
    let kept: Vec<CaptionEntry> = entries.into_iter().filter(|e| e.is_well_formed()).collect();
    if kept.len() != total {
        warn!(dropped = total - kept.len(), "Dropped malformed caption entries");
    }
    kept
}

fn parse_entry(index: usize, item: &Value) -> Option<CaptionEntry> {
    let Some(object) = item.as_object() else {
        warn!(index, "Skipping non-object sidecar entry");
        return None;
    };

    let text = object
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let Some(text) = text else {
        warn!(index, "Skipping sidecar entry without text");
        return None;
    };

    let start = timestamp(object.get("startMs").or_else(|| object.get("startInMs")));
    let end = timestamp(object.get("endMs").or_else(|| object.get("endInMs")));
    let (Some(start_ms), Some(end_ms)) = (start, end) else {
        warn!(index, text, "Skipping sidecar entry with invalid timestamps");
        return None;
    };

    if end_ms <= start_ms {
        warn!(index, start_ms, end_ms, "Skipping sidecar entry with non-positive duration");
        return None;
    }

    // Overrides are optional; a malformed override block is ignored rather than
    // costing the word itself.
    let overrides = serde_json::from_value::<StyleOverrides>(item.clone()).unwrap_or_else(|e| {
        warn!(index, error = %e, "Ignoring malformed style overrides");
        StyleOverrides::default()
    });

    Some(CaptionEntry {
        text: text.to_string(),
        start_ms,
        end_ms,
        overrides,
    })
}

/// Largest timestamp accepted from a sidecar (2^53, the exact-integer range of f64)
const MAX_TIMESTAMP_MS: f64 = 9_007_199_254_740_992.0;

/// Accepts JSON numbers in `0..=2^53` and rounds them to whole milliseconds.
fn timestamp(value: Option<&Value>) -> Option<TimeMs> {
    let ms = value?.as_f64()?.round();
    (0.0..=MAX_TIMESTAMP_MS).contains(&ms).then_some(ms as TimeMs)
}

// =============================================================================
// Tests
// =============================================================================
