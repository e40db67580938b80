//! Most-recent-event enrichment and per-entity history grouping.
//!
//! Two access patterns over the same event lists: a single O(n) scan keeping
//! the max-by-timestamp event per entity key (for "last inspection"), and a
//! sort-based first/last pair (for "average days between visits").

use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use super::temporal::MS_PER_DAY;

/// Map each entity key to its most recent event.
///
/// When two events carry an identical timestamp, the one later in input
/// order wins: an existing entry is kept only when it is *strictly* newer
/// than the incoming event.
pub fn latest_by_key<'a, E, K, FK, FT>(
    events: &'a [E],
    key: FK,
    timestamp: FT,
) -> HashMap<K, &'a E>
where
    K: Eq + Hash,
    FK: Fn(&E) -> K,
    FT: Fn(&E) -> DateTime<Utc>,
{
    let mut latest: HashMap<K, &E> = HashMap::new();
    for event in events {
        match latest.entry(key(event)) {
            Entry::Occupied(mut slot) => {
                if timestamp(slot.get()) <= timestamp(event) {
                    slot.insert(event);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(event);
            }
        }
    }
    latest
}

/// Group events by entity key, preserving input order within each group.
pub fn group_by_key<'a, E, K, FK>(events: &'a [E], key: FK) -> HashMap<K, Vec<&'a E>>
where
    K: Eq + Hash,
    FK: Fn(&E) -> K,
{
    let mut groups: HashMap<K, Vec<&E>> = HashMap::new();
    for event in events {
        groups.entry(key(event)).or_default().push(event);
    }
    groups
}

/// Average days between consecutive events: `(last - first) / (count - 1)`,
/// rounded to the nearest whole day.
///
/// Not applicable (`None`) when fewer than two events exist; never reported
/// as 0 in that case.
pub fn average_interval_days(timestamps: &[DateTime<Utc>]) -> Option<i64> {
    if timestamps.len() < 2 {
        return None;
    }
    let mut sorted = timestamps.to_vec();
    sorted.sort();
    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    let span_days = (last - first).num_milliseconds() as f64 / MS_PER_DAY as f64;
    Some((span_days / (sorted.len() - 1) as f64).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Event {
        station: i64,
        ts: DateTime<Utc>,
        tag: &'static str,
    }

    fn event(station: i64, ts: &str, tag: &'static str) -> Event {
        Event {
            station,
            ts: ts.parse().unwrap(),
            tag,
        }
    }

    #[test]
    fn test_latest_by_key_picks_max_timestamp() {
        let events = vec![
            event(1, "2025-03-10T08:00:00Z", "newer"),
            event(1, "2025-03-01T08:00:00Z", "older"),
            event(2, "2025-02-01T08:00:00Z", "only"),
        ];

        let latest = latest_by_key(&events, |e| e.station, |e| e.ts);
        assert_eq!(latest[&1].tag, "newer");
        assert_eq!(latest[&2].tag, "only");
    }

    #[test]
    fn test_latest_by_key_tie_breaks_to_later_input() {
        let events = vec![
            event(1, "2025-03-10T08:00:00Z", "first"),
            event(1, "2025-03-10T08:00:00Z", "second"),
        ];

        let latest = latest_by_key(&events, |e| e.station, |e| e.ts);
        assert_eq!(latest[&1].tag, "second");
    }

    #[test]
    fn test_latest_by_key_empty() {
        let events: Vec<Event> = vec![];
        let latest = latest_by_key(&events, |e| e.station, |e| e.ts);
        assert!(latest.is_empty());
    }

    #[test]
    fn test_group_by_key_preserves_order() {
        let events = vec![
            event(1, "2025-03-01T00:00:00Z", "a"),
            event(2, "2025-03-02T00:00:00Z", "b"),
            event(1, "2025-03-03T00:00:00Z", "c"),
        ];

        let groups = group_by_key(&events, |e| e.station);
        let tags: Vec<&str> = groups[&1].iter().map(|e| e.tag).collect();
        assert_eq!(tags, vec!["a", "c"]);
    }

    #[test]
    fn test_average_interval_not_applicable_below_two() {
        assert_eq!(average_interval_days(&[]), None);
        assert_eq!(
            average_interval_days(&["2025-03-01T00:00:00Z".parse().unwrap()]),
            None
        );
    }

    #[test]
    fn test_average_interval_uses_first_last_span() {
        let timestamps: Vec<DateTime<Utc>> = vec![
            "2025-03-21T00:00:00Z".parse().unwrap(),
            "2025-03-01T00:00:00Z".parse().unwrap(),
            "2025-03-08T00:00:00Z".parse().unwrap(),
        ];
        // Span 20 days over 2 intervals, regardless of input order
        assert_eq!(average_interval_days(&timestamps), Some(10));
    }

    #[test]
    fn test_average_interval_rounds_to_nearest() {
        let timestamps: Vec<DateTime<Utc>> = vec![
            "2025-03-01T00:00:00Z".parse().unwrap(),
            "2025-03-08T12:00:00Z".parse().unwrap(),
        ];
        // 7.5 days rounds to 8
        assert_eq!(average_interval_days(&timestamps), Some(8));
    }
}
