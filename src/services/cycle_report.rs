//! Fumigation-cycle report: velocity projection, room distributions,
//! overdue-room alerts, and a cross-check of the materialized counters.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::alerts::{overdue_rooms, AlertBucket};
use super::distributions::{tally, CategoryCount};
use super::temporal::ROOM_OVERDUE_DAYS;
use super::velocity::{project_cycle, CycleVelocity};
use crate::api::CycleId;
use crate::db::repository::{FullRepository, RepositoryResult, RoomFilter};
use crate::models::{FumigationCycle, RoomFumigation, RoomStatus, ServiceType};

/// Comparison of the collaborator's materialized counters against counts
/// recomputed from the room list.
///
/// Rooms marked NOT_APPLICABLE are excluded from the recomputed total, since
/// they are not serviceable work. The materialized counters are never
/// replaced, only reported against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterCrossCheck {
    pub reported_total: u32,
    pub reported_completed: u32,
    pub reported_pending: u32,
    pub computed_total: u32,
    pub computed_completed: u32,
    pub computed_pending: u32,
    pub consistent: bool,
}

/// The executive cycle report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub generated_at: DateTime<Utc>,
    pub cycle: FumigationCycle,
    /// Half-up rounded share of completed rooms, from the materialized
    /// counters.
    pub completion_percentage: u32,
    pub velocity: CycleVelocity,
    pub status_distribution: Vec<CategoryCount>,
    /// Service types across completed rooms only.
    pub service_type_distribution: Vec<CategoryCount>,
    pub overdue_rooms: AlertBucket,
    pub counters: CounterCrossCheck,
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn cross_check(cycle: &FumigationCycle, rooms: &[&RoomFumigation]) -> CounterCrossCheck {
    let computed_total = rooms
        .iter()
        .filter(|r| r.status != RoomStatus::NotApplicable)
        .count() as u32;
    let computed_completed = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Done)
        .count() as u32;
    let computed_pending = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Pending)
        .count() as u32;

    CounterCrossCheck {
        reported_total: cycle.total_rooms,
        reported_completed: cycle.completed_rooms,
        reported_pending: cycle.pending_rooms,
        consistent: computed_total == cycle.total_rooms
            && computed_completed == cycle.completed_rooms
            && computed_pending == cycle.pending_rooms,
        computed_total,
        computed_completed,
        computed_pending,
    }
}

/// Compute the full report for one fumigation cycle.
///
/// Velocity is projected from the cycle's materialized counters; the room
/// list feeds distributions, alerts, and the counter cross-check. Rooms
/// belonging to other cycles are ignored.
pub fn compute_cycle_report(
    cycle: &FumigationCycle,
    rooms: &[RoomFumigation],
    now: DateTime<Utc>,
    limit: usize,
) -> CycleReport {
    let cycle_rooms: Vec<&RoomFumigation> =
        rooms.iter().filter(|r| r.cycle_id == cycle.id).collect();

    let completion_percentage = if cycle.total_rooms > 0 {
        ((cycle.completed_rooms as f64 / cycle.total_rooms as f64) * 100.0).round() as u32
    } else {
        0
    };

    let velocity = project_cycle(
        midnight_utc(cycle.period_start),
        midnight_utc(cycle.period_end),
        cycle.total_rooms,
        cycle.completed_rooms,
        now,
    );

    let status_distribution = tally(
        &cycle_rooms,
        |r| r.status,
        &RoomStatus::ALL,
        |s| s.label().to_string(),
    );

    let done_rooms: Vec<&&RoomFumigation> = cycle_rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Done)
        .collect();
    let service_type_distribution = tally(
        &done_rooms,
        |r| r.service_type,
        &ServiceType::ALL,
        |t| t.label().to_string(),
    );

    let owned: Vec<RoomFumigation> = cycle_rooms.iter().map(|r| (**r).clone()).collect();
    let overdue = overdue_rooms(&owned, now, ROOM_OVERDUE_DAYS, limit);

    CycleReport {
        generated_at: now,
        completion_percentage,
        velocity,
        status_distribution,
        service_type_distribution,
        overdue_rooms: overdue,
        counters: cross_check(cycle, &cycle_rooms),
        cycle: cycle.clone(),
    }
}

/// Fetch a cycle and its rooms, then compute the report.
pub async fn get_cycle_report(
    repo: &dyn FullRepository,
    cycle_id: CycleId,
    now: DateTime<Utc>,
    limit: usize,
) -> RepositoryResult<CycleReport> {
    // The filter must outlive the lazily-polled future borrowing it
    let room_filter = RoomFilter::default();
    let (cycle, rooms) = futures::try_join!(
        repo.fetch_cycle(cycle_id),
        repo.fetch_cycle_rooms(cycle_id, &room_filter),
    )?;

    Ok(compute_cycle_report(&cycle, &rooms, now, limit))
}
