//! Day arithmetic and staleness classification.
//!
//! Two rounding conventions coexist on purpose: [`days_between`] rounds up
//! (a cycle that runs into a partial day counts the whole day) while
//! [`days_since`] truncates (a station inspected 36 hours ago reads "1 day
//! ago"). The report screens depend on both sets of figures, so the two
//! functions are kept under distinct names rather than unified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Upper bound (inclusive, in days) of the CURRENT staleness bucket.
pub const CURRENT_MAX_DAYS: i64 = 15;
/// Upper bound (inclusive, in days) of the DUE_SOON staleness bucket.
pub const DUE_SOON_MAX_DAYS: i64 = 30;

/// Days without an inspection after which a station is overdue.
pub const STATION_OVERDUE_DAYS: i64 = 30;
/// Days without a completed fumigation after which a room is overdue.
pub const ROOM_OVERDUE_DAYS: i64 = 60;

/// How long ago an entity's last recorded event happened, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Staleness {
    Current,
    DueSoon,
    Overdue,
    /// No event on record at all.
    Never,
}

impl Staleness {
    pub const ALL: [Staleness; 4] = [
        Staleness::Current,
        Staleness::DueSoon,
        Staleness::Overdue,
        Staleness::Never,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Staleness::Current => "Current",
            Staleness::DueSoon => "Due soon",
            Staleness::Overdue => "Overdue",
            Staleness::Never => "Never",
        }
    }
}

/// Absolute day count between two instants, rounded up.
/// Symmetric: order of arguments does not matter.
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let ms = (b - a).num_milliseconds().abs();
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Whole days elapsed from `timestamp` to `now`, truncated.
/// Negative when `timestamp` is in the future.
pub fn days_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - timestamp).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Days remaining from `now` until `end`, rounded up and clamped at zero.
pub fn days_until(now: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms = (end - now).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        (ms + MS_PER_DAY - 1) / MS_PER_DAY
    }
}

/// Bucket a days-since-last-event count. `None` means no event on record.
pub fn classify_staleness(days: Option<i64>) -> Staleness {
    match days {
        None => Staleness::Never,
        Some(d) if d <= CURRENT_MAX_DAYS => Staleness::Current,
        Some(d) if d <= DUE_SOON_MAX_DAYS => Staleness::DueSoon,
        Some(_) => Staleness::Overdue,
    }
}
