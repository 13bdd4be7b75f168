//! Ranking of trend entries for the trending view.
//!
//! Entries are ranked by search count, highest first. Equal counts are ordered by
//! creation sequence so the term that started trending earliest stays ahead; the
//! ordering is total and therefore stable across reloads.

use super::models::TrendEntry;
use std::cmp::Ordering;

/// Compares two entries by trending rank (`Less` means `a` ranks higher).
#[must_use]
pub fn compare_rank(a: &TrendEntry, b: &TrendEntry) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.created_seq.cmp(&b.created_seq))
}

/// Sorts entries in place by trending rank.
pub fn sort_by_rank(entries: &mut [TrendEntry]) {
    entries.sort_by(compare_rank);
}

/// Returns the `limit` highest-ranked entries.
#[must_use]
pub fn top_n<'a, I>(entries: I, limit: usize) -> Vec<TrendEntry>
where
    I: IntoIterator<Item = &'a TrendEntry>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<TrendEntry> = entries.into_iter().cloned().collect();
    sort_by_rank(&mut ranked);
    ranked.truncate(limit);
    ranked
}
