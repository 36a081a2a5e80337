//! Row segmentation from date anchors.
//!
//! The table has no reliable embedded structure, so rows are reconstructed
//! geometrically: every date-shaped token inside the date column seeds a
//! row, and the vertical space between consecutive anchors becomes that
//! row's interval. Tokens are then bucketed by which interval contains
//! their top edge.

use crate::layout::config::LayoutConfig;
use crate::token::Token;

/// A vertical row interval, half-open `[start, end)`.
///
/// Intervals produced by [`compute_intervals`] are contiguous and
/// non-overlapping in anchor order, so a token's top edge falls in at most
/// one of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowInterval {
    /// Inclusive start y
    pub start: f32,
    /// Exclusive end y
    pub end: f32,
}

impl RowInterval {
    /// Check whether a y position falls inside the interval.
    pub fn contains(&self, y: f32) -> bool {
        self.start <= y && y < self.end
    }
}

/// Collect the top y of every row anchor, sorted ascending.
///
/// Sorting enforces top-to-bottom order even though the input token list is
/// unordered. An empty result is a valid outcome: the page simply has no
/// transaction table.
pub fn anchor_tops(tokens: &[Token], config: &LayoutConfig) -> Vec<f32> {
    let mut tops: Vec<f32> = tokens
        .iter()
        .filter(|t| config.is_date_anchor(t))
        .map(|t| t.top)
        .collect();
    tops.sort_by(f32::total_cmp);
    tops
}

/// Compute row intervals from sorted anchor tops.
///
/// Each interval starts at `top - y_margin` and ends where the next one
/// starts. The last anchor has no successor, so its interval is extrapolated
/// from the gap to the previous anchor; with a single anchor the look-ahead
/// falls back to `2 * y_margin`.
///
/// # Examples
///
/// ```
/// use ledger_oxide::layout::{compute_intervals, RowInterval};
///
/// let intervals = compute_intervals(&[100.0, 120.0], 3.0);
/// assert_eq!(intervals[0], RowInterval { start: 97.0, end: 117.0 });
/// assert_eq!(intervals[1], RowInterval { start: 117.0, end: 137.0 });
/// ```
pub fn compute_intervals(tops: &[f32], y_margin: f32) -> Vec<RowInterval> {
    let mut intervals = Vec::with_capacity(tops.len());
    for (i, &top) in tops.iter().enumerate() {
        let start = top - y_margin;
        let end = if let Some(&next) = tops.get(i + 1) {
            next - y_margin
        } else {
            let delta = if i > 0 {
                top - tops[i - 1]
            } else {
                y_margin * 2.0
            };
            top + delta - y_margin
        };
        intervals.push(RowInterval { start, end });
    }
    intervals
}

/// Assign each token to the first interval containing its top edge.
///
/// Tokens matching no interval are inter-row whitespace (typically wrapped
/// continuation text) and are dropped; the count is logged at debug level
/// for diagnosability.
pub fn assign_rows(tokens: &[Token], intervals: &[RowInterval]) -> Vec<Vec<Token>> {
    let mut rows: Vec<Vec<Token>> = vec![Vec::new(); intervals.len()];
    let mut dropped = 0usize;

    for token in tokens {
        match intervals.iter().position(|iv| iv.contains(token.top)) {
            Some(row) => rows[row].push(token.clone()),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!(
            "{} token(s) fell outside all row intervals and were dropped",
            dropped
        );
    }
    rows
}
