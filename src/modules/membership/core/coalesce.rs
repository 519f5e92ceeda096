// Coalescing of membership spans into periods.
//
// Purpose
// - Turn the raw spans of a member into the minimal list of periods shown for each category.
//
// Invariants
// - Pure. No input or output, no clock.
// - Spans are linked pairwise along the start-sorted order: a span joins the current run when it
//   connects to the span right before it, not to the envelope of the whole run. A long span
//   followed by a short nested one can therefore end a run even though a later span would still
//   touch the long one.

use crate::modules::membership::core::period::Period;
use crate::modules::membership::core::span::{SpanCategory, TimeSpan};
use crate::shared::core::primitives::{DAY_MS, Millis};

/// Largest gap between two spans that still counts as connected.
pub const ADJACENCY_TOLERANCE_MS: Millis = DAY_MS;

/// True if `second` starts at most one day after `first` ends. `first` must not start later.
pub fn is_connected(first: &TimeSpan, second: &TimeSpan) -> bool {
    debug_assert!(
        first.start <= second.start,
        "spans must be sorted by start before checking connectivity"
    );
    second.start - first.end <= ADJACENCY_TOLERANCE_MS
}

/// Periods assembled from the non-deleted spans of `category`, in chronological order.
pub fn filter_periods(spans: &[TimeSpan], category: SpanCategory) -> Vec<Period> {
    let mut spans: Vec<&TimeSpan> = spans
        .iter()
        .filter(|s| s.deleted_at.is_none() && s.category == category)
        .collect();
    spans.sort_by_key(|s| s.start);

    let mut periods = Vec::new();
    let mut rest = spans.as_slice();
    while !rest.is_empty() {
        let mut len = 1;
        while len < rest.len() && is_connected(rest[len - 1], rest[len]) {
            len += 1;
        }
        let (run, tail) = rest.split_at(len);
        periods.push(Period {
            start: run.iter().map(|s| s.start).fold(Millis::MAX, Millis::min),
            end: run.iter().map(|s| s.end).fold(Millis::MIN, Millis::max),
            category,
        });
        rest = tail;
    }
    periods
}
