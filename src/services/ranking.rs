//! Top-N / bottom-N ranking over enriched collections.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDirection {
    /// Descending: "most inspected", "most consumption".
    Most,
    /// Ascending: "least inspected".
    Least,
}

/// One row of a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub metric: f64,
}

/// Rank entities by a numeric metric.
///
/// Entities with `metric <= 0` never appear: a station with zero inspections
/// does not belong in either a "most" or a "least" list. Ties keep input
/// order (the sort is stable), and the result is truncated to `limit`.
pub fn rank<T>(
    items: &[T],
    label: impl Fn(&T) -> String,
    metric: impl Fn(&T) -> f64,
    direction: RankDirection,
    limit: usize,
) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = items
        .iter()
        .map(|item| RankedEntry {
            label: label(item),
            metric: metric(item),
        })
        .filter(|entry| entry.metric > 0.0)
        .collect();

    match direction {
        RankDirection::Most => entries.sort_by(|a, b| {
            b.metric.partial_cmp(&a.metric).unwrap_or(Ordering::Equal)
        }),
        RankDirection::Least => entries.sort_by(|a, b| {
            a.metric.partial_cmp(&b.metric).unwrap_or(Ordering::Equal)
        }),
    }

    entries.truncate(limit);
    entries
}
