//! Double-page spread math and within-chapter navigation.
//!
//! When a comic enables double-page spreads, every odd page number starts a
//! two-page display unit `{start, start + 1}`. Requests for either page of a
//! pair normalize to the same spread start, which is also the canonical page
//! number for the pair's URL.

use crate::error::{Error, Result};

/// Normalize a page number to the start of its spread.
///
/// Always odd for positive input, and idempotent.
pub fn spread_start(n: u32) -> u32 {
    n - ((n - 1) % 2)
}

/// Parse a raw path segment into a positive page number.
pub fn parse_page_number(raw: &str) -> Result<u32> {
    let n: u32 = raw
        .parse()
        .map_err(|_| Error::InvalidPageNumber(raw.to_string()))?;
    if n == 0 {
        return Err(Error::InvalidPageNumber(raw.to_string()));
    }
    Ok(n)
}

/// Result of paginating a request against one chapter (or the standalone
/// page set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadView {
    /// Canonical page number for the request (equals the requested number in
    /// single mode).
    pub spread_start: u32,
    /// Page numbers to display: `{start}` or `{start, start + 1}`.
    pub display_numbers: Vec<u32>,
    /// Previous page within this chapter, if any.
    pub prev: Option<u32>,
    /// Next page within this chapter, if any.
    pub next: Option<u32>,
}

/// Compute the spread view for a requested page number.
///
/// `page_numbers` is the full ordered (ascending) list of page numbers in the
/// current chapter. In single mode, prev/next come from the actual list; in
/// double mode they are pure arithmetic on spread starts, since spreads
/// advance by fixed increments of 2.
pub fn paginate(requested: u32, double_spread: bool, page_numbers: &[u32]) -> SpreadView {
    if !double_spread {
        let prev = page_numbers
            .iter()
            .copied()
            .filter(|&n| n < requested)
            .next_back();
        let next = page_numbers.iter().copied().find(|&n| n > requested);
        return SpreadView {
            spread_start: requested,
            display_numbers: vec![requested],
            prev,
            next,
        };
    }

    let start = spread_start(requested);
    let last = page_numbers.last().copied().unwrap_or(0);
    let prev = (start >= 3).then(|| start - 2);
    let next = (start + 2 <= last).then(|| start + 2);
    SpreadView {
        spread_start: start,
        display_numbers: vec![start, start + 1],
        prev,
        next,
    }
}
