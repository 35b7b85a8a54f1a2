//! Caption Pagination
//!
//! Groups an ordered run of timed words into display pages:
//!
//! 1. Scan entries in order and start a new group whenever the gap between
//!    the previous entry's end and the current entry's start exceeds the
//!    combine window.
//! 2. Cut every group into consecutive chunks of at most
//!    `max_tokens_per_page` tokens (0 disables the cap).
//! 3. Build one [`Page`] per chunk.
//!
//! Pagination is lossless: concatenating the tokens of all pages reproduces
//! the input exactly. No entries are filtered here; see
//! [`sanitize_entries`](super::sanitize_entries) for input cleanup.

use serde::{Deserialize, Serialize};
use specta::Type;
use tracing::debug;

use super::models::{CaptionEntry, Page};
use crate::core::TimeMs;

/// Combine window used by the host when none is configured
pub const DEFAULT_COMBINE_WITHIN_MS: TimeMs = 1200;

/// Width budget for deriving the token cap from the base font size
/// (60px yields 4 tokens, 30px yields 9).
pub const TOKEN_WIDTH_BUDGET: f64 = 280.0;

// =============================================================================
// Pagination Parameters
// =============================================================================

/// Inputs that, together with the entries, determine the pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Maximum gap between consecutive entries on the same page
    pub combine_within_ms: TimeMs,
    /// Token cap per page, 0 = unlimited
    pub max_tokens_per_page: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            combine_within_ms: DEFAULT_COMBINE_WITHIN_MS,
            max_tokens_per_page: 0,
        }
    }
}

impl PaginationParams {
    /// Creates parameters with an explicit cap
    pub fn new(combine_within_ms: TimeMs, max_tokens_per_page: usize) -> Self {
        Self {
            combine_within_ms: combine_within_ms.max(0),
            max_tokens_per_page,
        }
    }

    /// Creates parameters whose cap is derived from the base font size
    pub fn for_font_size(combine_within_ms: TimeMs, font_size: f64) -> Self {
        Self::new(combine_within_ms, max_tokens_for_font_size(font_size))
    }
}

/// `max(1, floor(280 / font_size))`
pub fn max_tokens_for_font_size(font_size: f64) -> usize {
    if !font_size.is_finite() || font_size <= 0.0 {
        return 1;
    }
    ((TOKEN_WIDTH_BUDGET / font_size).floor() as usize).max(1)
}

// =============================================================================
// Pagination
// =============================================================================

/// Splits `entries` into pages.
///
/// `entries` must already be ordered by start time. A negative
/// `combine_within_ms` behaves like 0.
pub fn paginate(
    entries: &[CaptionEntry],
    combine_within_ms: TimeMs,
    max_tokens_per_page: usize,
) -> Vec<Page> {
    let combine_within_ms = combine_within_ms.max(0);

    let groups = group_by_gap(entries, combine_within_ms);
    let mut pages = Vec::with_capacity(groups.len());

    for group in groups {
        if max_tokens_per_page == 0 {
            pages.extend(Page::from_tokens(group.to_vec()));
        } else {
            for chunk in group.chunks(max_tokens_per_page) {
                pages.extend(Page::from_tokens(chunk.to_vec()));
            }
        }
    }

    debug!(
        entries = entries.len(),
        pages = pages.len(),
        combine_within_ms,
        max_tokens_per_page,
        "Paginated captions"
    );

    pages
}

/// Step A: contiguous runs whose inter-entry gaps stay within the window
fn group_by_gap(entries: &[CaptionEntry], combine_within_ms: TimeMs) -> Vec<&[CaptionEntry]> {
    let mut groups = Vec::new();
    let mut group_start = 0;

    for i in 1..entries.len() {
        let gap = entries[i].start_ms.saturating_sub(entries[i - 1].end_ms);
        if gap > combine_within_ms {
            groups.push(&entries[group_start..i]);
            group_start = i;
        }
    }

    if group_start < entries.len() {
        groups.push(&entries[group_start..]);
    }

    groups
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Seven back-to-back 500ms words
    fn sentence() -> Vec<CaptionEntry> {
        ["This", "is", "a", "test", "sentence", "for", "pagination"]
            .iter()
            .enumerate()
            .map(|(i, w)| CaptionEntry::new(w, i as TimeMs * 500, (i as TimeMs + 1) * 500))
            .collect()
    }

    fn flatten(pages: &[Page]) -> Vec<CaptionEntry> {
        pages.iter().flat_map(|p| p.tokens.clone()).collect()
    }

    // -------------------------------------------------------------------------
    // Splitting
    // -------------------------------------------------------------------------

    #[test]
    fn test_split_by_token_cap() {
        let pages = paginate(&sentence(), 10_000, 2);

        let counts: Vec<usize> = pages.iter().map(|p| p.tokens.len()).collect();
        assert_eq!(counts, vec![2, 2, 2, 1]);

        assert_eq!(pages[0].start_ms, 0);
        assert_eq!(pages[0].duration_ms, 1000);
        assert_eq!(pages[0].text, "This is");
        assert_eq!(pages[1].start_ms, 1000);
        assert_eq!(pages[1].duration_ms, 1000);
        assert_eq!(pages[1].text, "a test");
        assert_eq!(pages[3].text, "pagination");
    }

    #[test]
    fn test_no_cap_keeps_group_whole() {
        let pages = paginate(&sentence(), 2000, 0);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].tokens.len(), 7);
        assert_eq!(pages[0].duration_ms, 3500);
    }

    #[test]
    fn test_cap_only_shortens_last_chunk_of_group() {
        let mut entries = sentence();
        // Second group after a long pause
        entries.push(CaptionEntry::new("after", 10_000, 10_400));
        entries.push(CaptionEntry::new("pause", 10_400, 10_800));
        entries.push(CaptionEntry::new("ends", 10_800, 11_000));

        let pages = paginate(&entries, 1000, 3);
        let counts: Vec<usize> = pages.iter().map(|p| p.tokens.len()).collect();

        assert_eq!(counts, vec![3, 3, 1, 3]);
    }

    // -------------------------------------------------------------------------
    // Grouping
    // -------------------------------------------------------------------------

    #[test]
    fn test_zero_window_groups_only_contiguous_entries() {
        let entries = vec![
            CaptionEntry::new("one", 0, 100),
            CaptionEntry::new("two", 100, 200),
            CaptionEntry::new("three", 201, 300),
        ];
        let pages = paginate(&entries, 0, 0);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "one two");
        assert_eq!(pages[1].text, "three");
    }

    #[test]
    fn test_gap_equal_to_window_stays_grouped() {
        let entries = vec![
            CaptionEntry::new("a", 0, 100),
            CaptionEntry::new("b", 900, 1000),
        ];

        assert_eq!(paginate(&entries, 800, 0).len(), 1);
        assert_eq!(paginate(&entries, 799, 0).len(), 2);
    }

    #[test]
    fn test_overlapping_entries_group() {
        let entries = vec![
            CaptionEntry::new("a", 0, 500),
            CaptionEntry::new("b", 300, 700),
        ];
        let pages = paginate(&entries, 0, 0);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].duration_ms, 700);
    }

    #[test]
    fn test_negative_window_behaves_like_zero() {
        assert_eq!(
            paginate(&sentence(), -50, 0),
            paginate(&sentence(), 0, 0)
        );
    }

    // -------------------------------------------------------------------------
    // Invariants
    // -------------------------------------------------------------------------

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let entries = vec![
            CaptionEntry::new("a", i64::MIN, i64::MAX),
            CaptionEntry::new("b", i64::MIN, i64::MAX),
        ];
        let pages = paginate(&entries, 1200, 0);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].duration_ms, i64::MAX);
        assert_eq!(pages[0].start_ms, i64::MIN);

        let late = Page::from_tokens(vec![CaptionEntry::new("c", 10, i64::MAX)]).unwrap();
        let widened = Page {
            duration_ms: i64::MAX,
            ..late
        };
        assert_eq!(widened.end_ms(), i64::MAX);
    }

    #[test]
    fn test_empty_input() {
        assert!(paginate(&[], 1000, 3).is_empty());
    }

    #[test]
    fn test_single_entry() {
        let pages = paginate(&[CaptionEntry::new("solo", 50, 450)], 0, 0);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].start_ms, 50);
        assert_eq!(pages[0].duration_ms, 400);
    }

    #[test]
    fn test_lossless_repartitioning() {
        let mut entries = sentence();
        entries.push(CaptionEntry::new("", 9000, 9100));
        entries.push(CaptionEntry::new("late", 20_000, 20_250));

        for combine in [0, 1, 500, 5000] {
            for cap in 0..5 {
                let pages = paginate(&entries, combine, cap);
                assert_eq!(flatten(&pages), entries, "combine={combine} cap={cap}");
                for page in &pages {
                    if cap > 0 {
                        assert!(page.tokens.len() <= cap);
                    }
                    let last = page.tokens.last().unwrap();
                    assert_eq!(page.start_ms, page.tokens[0].start_ms);
                    assert_eq!(page.duration_ms, last.end_ms - page.start_ms);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Parameters
    // -------------------------------------------------------------------------

    #[test]
    fn test_max_tokens_for_font_size() {
        assert_eq!(max_tokens_for_font_size(60.0), 4);
        assert_eq!(max_tokens_for_font_size(30.0), 9);
        assert_eq!(max_tokens_for_font_size(300.0), 1);
        assert_eq!(max_tokens_for_font_size(0.0), 1);
    }

    #[test]
    fn test_params_for_font_size() {
        let params = PaginationParams::for_font_size(1200, 56.0);
        assert_eq!(params.max_tokens_per_page, 5);
        assert_eq!(params.combine_within_ms, 1200);
    }
}
