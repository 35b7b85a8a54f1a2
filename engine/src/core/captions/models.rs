//! Caption Data Models
//!
//! Defines the timed word entries produced by transcription and the pages
//! they are grouped into for display.
//!
//! # Overview
//!
//! - `CaptionEntry`: one word with start/end offsets and optional style overrides
//! - `Page`: consecutive entries shown together as one caption card
//! - `CaptionTrack`: entries plus pagination parameters, with derived pages

use serde::{Deserialize, Serialize};
use specta::Type;

use super::paginate::{paginate, PaginationParams};
use crate::core::styles::StyleOverrides;
use crate::core::TimeMs;

// =============================================================================
// Caption Entry
// =============================================================================

/// A single timed word
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct CaptionEntry {
    /// Word text (no leading space)
    pub text: String,
    /// Start offset in milliseconds
    #[serde(alias = "startInMs")]
    pub start_ms: TimeMs,
    /// End offset in milliseconds (exclusive)
    #[serde(alias = "endInMs")]
    pub end_ms: TimeMs,
    /// Optional style overrides carried by the word
    #[serde(flatten)]
    pub overrides: StyleOverrides,
}

impl CaptionEntry {
    /// Creates a new entry without overrides
    pub fn new(text: &str, start_ms: TimeMs, end_ms: TimeMs) -> Self {
        Self {
            text: text.to_string(),
            start_ms,
            end_ms,
            overrides: StyleOverrides::default(),
        }
    }

    /// Sets style overrides for this entry
    pub fn with_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Returns the duration of this entry in milliseconds
    pub fn duration_ms(&self) -> TimeMs {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Returns true if the entry is being spoken at the given time
    pub fn is_active_at(&self, time_ms: f64) -> bool {
        time_ms >= self.start_ms as f64 && time_ms < self.end_ms as f64
    }

    /// Returns true if start < end
    pub fn is_well_formed(&self) -> bool {
        self.start_ms < self.end_ms && !self.text.trim().is_empty()
    }
}

// =============================================================================
// Page
// =============================================================================

/// A group of entries displayed together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Entries on this page, in input order
    pub tokens: Vec<CaptionEntry>,
    /// Start of the first token
    pub start_ms: TimeMs,
    /// End of the last token minus `start_ms`
    pub duration_ms: TimeMs,
    /// Space-joined token text, trimmed for display
    pub text: String,
}

impl Page {
    /// Builds a page from a non-empty run of tokens.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_tokens(tokens: Vec<CaptionEntry>) -> Option<Self> {
        let start_ms = tokens.first()?.start_ms;
        let end_ms = tokens.last()?.end_ms;

        let mut text = String::new();
        for token in &tokens {
            text.push(' ');
            text.push_str(&token.text);
        }

        Some(Self {
            start_ms,
            duration_ms: end_ms.saturating_sub(start_ms),
            text: text.trim().to_string(),
            tokens,
        })
    }

    /// Returns the end of the page window (exclusive)
    pub fn end_ms(&self) -> TimeMs {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Returns true if `time_ms` falls in `[start, start + duration)`
    pub fn contains(&self, time_ms: f64) -> bool {
        time_ms >= self.start_ms as f64 && time_ms < self.end_ms() as f64
    }

    /// Number of characters used for width estimation
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Finds the first page whose window contains `time_ms`.
pub fn active_page(pages: &[Page], time_ms: f64) -> Option<(usize, &Page)> {
    pages
        .iter()
        .enumerate()
        .find(|(_, page)| page.contains(time_ms))
}

// =============================================================================
// Caption Track
// =============================================================================

/// Entries plus the pagination parameters that produced the current pages.
///
/// Pages are recomputed only when the entries or the parameters change, so
/// live style edits that keep the derived token limit never re-paginate.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CaptionTrack {
    entries: Vec<CaptionEntry>,
    params: PaginationParams,
    pages: Vec<Page>,
}

impl CaptionTrack {
    /// Creates a track and paginates it immediately
    pub fn new(entries: Vec<CaptionEntry>, params: PaginationParams) -> Self {
        let pages = paginate(&entries, params.combine_within_ms, params.max_tokens_per_page);
        Self {
            entries,
            params,
            pages,
        }
    }

    /// Replaces the entries and re-paginates
    pub fn set_entries(&mut self, entries: Vec<CaptionEntry>) {
        self.entries = entries;
        self.repaginate();
    }

    /// Updates pagination parameters. Returns true if pages were rebuilt.
    pub fn set_params(&mut self, params: PaginationParams) -> bool {
        if params == self.params {
            return false;
        }
        self.params = params;
        self.repaginate();
        true
    }

    fn repaginate(&mut self) {
        self.pages = paginate(
            &self.entries,
            self.params.combine_within_ms,
            self.params.max_tokens_per_page,
        );
    }

    /// Returns the entries
    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    /// Returns the current pagination parameters
    pub fn params(&self) -> PaginationParams {
        self.params
    }

    /// Returns the derived pages
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the page visible at the given time
    pub fn page_at(&self, time_ms: f64) -> Option<(usize, &Page)> {
        active_page(&self.pages, time_ms)
    }

    /// Returns entries being spoken at the given time
    pub fn entries_at(&self, time_ms: f64) -> Vec<&CaptionEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_active_at(time_ms))
            .collect()
    }

    /// Project-level overrides, read from the first entry
    pub fn style_overrides(&self) -> StyleOverrides {
        self.entries
            .first()
            .map(|e| e.overrides.clone())
            .unwrap_or_default()
    }

    /// Returns the end of the last entry
    pub fn duration_ms(&self) -> TimeMs {
        self.entries.iter().map(|e| e.end_ms).max().unwrap_or(0)
    }

    /// Returns the full text of all entries
    pub fn full_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the track has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
