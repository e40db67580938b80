//! Cycle completion velocity and straight-line projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::temporal::{days_between, days_until};

/// A cycle is "on track" when its straight-line projection reaches at least
/// this share of the total unit count.
pub const ON_TRACK_TOLERANCE: f64 = 0.95;

/// Velocity projection for a time-boxed cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleVelocity {
    pub elapsed_days: i64,
    pub total_days: i64,
    pub remaining_days: i64,
    /// Units completed per elapsed day.
    pub observed_rate: f64,
    /// Linear extrapolation of the observed rate over the whole period.
    /// No smoothing, no weighting of recent days.
    pub projected_total: f64,
    /// Units per day needed to finish on time. `None` when no days remain;
    /// infinity never leaks into serialized output.
    pub required_rate: Option<f64>,
    pub on_track: bool,
}

/// Project completion velocity for a cycle observed at `now`.
///
/// `elapsed_days` is floored at 1 so the rate is defined on day one.
pub fn project_cycle(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    total_units: u32,
    completed_units: u32,
    now: DateTime<Utc>,
) -> CycleVelocity {
    let elapsed_days = days_between(start, now).max(1);
    let total_days = days_between(start, end);
    let remaining_days = days_until(now, end);

    let observed_rate = completed_units as f64 / elapsed_days as f64;
    let projected_total = observed_rate * total_days as f64;

    let pending_units = total_units.saturating_sub(completed_units);
    let required_rate = if remaining_days > 0 {
        Some(pending_units as f64 / remaining_days as f64)
    } else {
        None
    };

    let on_track = projected_total >= total_units as f64 * ON_TRACK_TOLERANCE;

    CycleVelocity {
        elapsed_days,
        total_days,
        remaining_days,
        observed_rate,
        projected_total,
        required_rate,
        on_track,
    }
}
