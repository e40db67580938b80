//! Station operations report: enrichment, rankings, alerts, distributions,
//! and GPS consistency, assembled from raw station/inspection snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alerts::{
    self, average_condition_score, condition_band, AlertBucket, ConditionBand,
};
use super::distributions::{tally, CategoryCount};
use super::enrichment::{average_interval_days, group_by_key, latest_by_key};
use super::geo::{gps_flags, GpsFlag};
use super::ranking::{rank, RankDirection, RankedEntry};
use super::temporal::{classify_staleness, days_since, Staleness, STATION_OVERDUE_DAYS};
use crate::api::StationId;
use crate::db::repository::{
    FullRepository, InspectionFilter, RepositoryError, RepositoryResult, StationFilter,
};
use crate::models::{Condition, Inspection, Station, StationKind};

/// Per-station enrichment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station_id: StationId,
    pub code: String,
    pub kind: StationKind,
    pub active: bool,
    pub inspection_count: usize,
    pub last_inspection_at: Option<DateTime<Utc>>,
    pub last_condition: Option<Condition>,
    pub days_since_last: Option<i64>,
    pub staleness: Staleness,
    /// Average days between consecutive inspections; not applicable with
    /// fewer than two visits.
    pub average_interval_days: Option<i64>,
    /// Mean condition score over the full history (GOOD=3 .. POOR=1).
    pub average_condition: Option<f64>,
    pub condition_band: Option<ConditionBand>,
    pub bait_consumed_count: usize,
    pub activity_count: usize,
    /// Visits where the device was found out of place.
    pub displaced_count: usize,
}

/// The executive station report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationOpsReport {
    pub generated_at: DateTime<Utc>,
    pub total_stations: usize,
    pub active_stations: usize,
    pub summaries: Vec<StationSummary>,
    pub most_inspected: Vec<RankedEntry>,
    pub least_inspected: Vec<RankedEntry>,
    pub most_consumption: Vec<RankedEntry>,
    pub most_displaced: Vec<RankedEntry>,
    pub alerts: Vec<AlertBucket>,
    pub kind_distribution: Vec<CategoryCount>,
    /// Latest-inspection condition per station.
    pub condition_distribution: Vec<CategoryCount>,
    pub staleness_distribution: Vec<CategoryCount>,
    pub gps_flags: Vec<GpsFlag>,
}

/// One station in full: summary, inspection history, GPS flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDetail {
    pub summary: StationSummary,
    /// Inspection history, newest first.
    pub history: Vec<Inspection>,
    pub gps_flags: Vec<GpsFlag>,
}

fn summarize_station(
    station: &Station,
    history: &[&Inspection],
    now: DateTime<Utc>,
) -> StationSummary {
    // Most recent inspection within this station's history; ties go to the
    // later record in input order, matching the enrichment scan.
    let last = history.iter().fold(None::<&&Inspection>, |best, candidate| {
        match best {
            Some(current) if current.timestamp > candidate.timestamp => best,
            _ => Some(candidate),
        }
    });

    let days_since_last = last.map(|i| days_since(i.timestamp, now));
    let timestamps: Vec<DateTime<Utc>> = history.iter().map(|i| i.timestamp).collect();
    let average_condition = average_condition_score(history);

    StationSummary {
        station_id: station.id,
        code: station.code.clone(),
        kind: station.kind,
        active: station.active,
        inspection_count: history.len(),
        last_inspection_at: last.map(|i| i.timestamp),
        last_condition: last.map(|i| i.condition),
        days_since_last,
        staleness: classify_staleness(days_since_last),
        average_interval_days: average_interval_days(&timestamps),
        average_condition,
        condition_band: average_condition.map(condition_band),
        bait_consumed_count: history.iter().filter(|i| i.bait_consumed).count(),
        activity_count: history.iter().filter(|i| i.droppings_present).count(),
        displaced_count: history.iter().filter(|i| !i.location_correct).count(),
    }
}

/// Compute the full station operations report.
///
/// Pure: the inputs are never mutated and the same snapshot always yields
/// the same report. Inspections referencing stations absent from the
/// snapshot are silently excluded from per-station aggregates.
pub fn compute_station_ops_report(
    stations: &[Station],
    inspections: &[Inspection],
    now: DateTime<Utc>,
    limit: usize,
) -> StationOpsReport {
    let latest = latest_by_key(inspections, |i| i.station_id, |i| i.timestamp);
    let history = group_by_key(inspections, |i| i.station_id);
    let empty: Vec<&Inspection> = Vec::new();

    let summaries: Vec<StationSummary> = stations
        .iter()
        .map(|station| {
            let station_history = history.get(&station.id).unwrap_or(&empty);
            summarize_station(station, station_history, now)
        })
        .collect();

    let most_inspected = rank(
        &summaries,
        |s| s.code.clone(),
        |s| s.inspection_count as f64,
        RankDirection::Most,
        limit,
    );
    let least_inspected = rank(
        &summaries,
        |s| s.code.clone(),
        |s| s.inspection_count as f64,
        RankDirection::Least,
        limit,
    );
    let most_consumption = rank(
        &summaries,
        |s| s.code.clone(),
        |s| s.bait_consumed_count as f64,
        RankDirection::Most,
        limit,
    );
    let most_displaced = rank(
        &summaries,
        |s| s.code.clone(),
        |s| s.displaced_count as f64,
        RankDirection::Most,
        limit,
    );

    let alerts = vec![
        alerts::never_inspected(stations, &latest),
        alerts::overdue_stations(stations, &latest, now, STATION_OVERDUE_DAYS, limit),
        alerts::poor_condition_stations(stations, &history),
    ];

    let kind_distribution = tally(stations, |s| s.kind, &StationKind::ALL, |k| {
        k.label().to_string()
    });

    let latest_conditions: Vec<Condition> =
        summaries.iter().filter_map(|s| s.last_condition).collect();
    let condition_distribution = tally(
        &latest_conditions,
        |c| *c,
        &Condition::ALL,
        |c| c.label().to_string(),
    );

    let staleness_distribution = tally(
        &summaries,
        |s| s.staleness,
        &Staleness::ALL,
        |s| s.label().to_string(),
    );

    StationOpsReport {
        generated_at: now,
        total_stations: stations.len(),
        active_stations: stations.iter().filter(|s| s.active).count(),
        summaries,
        most_inspected,
        least_inspected,
        most_consumption,
        most_displaced,
        alerts,
        kind_distribution,
        condition_distribution,
        staleness_distribution,
        gps_flags: gps_flags(stations, inspections),
    }
}

/// Compute the drill-down view for a single station.
pub fn compute_station_detail(
    station: &Station,
    inspections: &[Inspection],
    now: DateTime<Utc>,
) -> StationDetail {
    let history: Vec<&Inspection> = inspections
        .iter()
        .filter(|i| i.station_id == station.id)
        .collect();

    let summary = summarize_station(station, &history, now);

    let mut sorted: Vec<Inspection> = history.iter().map(|i| (*i).clone()).collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let stations = std::slice::from_ref(station);
    StationDetail {
        summary,
        gps_flags: gps_flags(stations, inspections),
        history: sorted,
    }
}

/// Fetch inputs and compute the station report.
///
/// The repository is injected; the pure computation above never touches it.
pub async fn get_station_ops_report(
    repo: &dyn FullRepository,
    now: DateTime<Utc>,
    limit: usize,
) -> RepositoryResult<StationOpsReport> {
    // The filters must outlive the lazily-polled futures borrowing them
    let station_filter = StationFilter::default();
    let inspection_filter = InspectionFilter::default();
    let (stations, inspections) = futures::try_join!(
        repo.fetch_stations(&station_filter),
        repo.fetch_inspections(&inspection_filter),
    )?;

    Ok(compute_station_ops_report(&stations, &inspections, now, limit))
}

/// Fetch one station and its history, then compute the drill-down view.
pub async fn get_station_detail(
    repo: &dyn FullRepository,
    station_id: StationId,
    now: DateTime<Utc>,
) -> RepositoryResult<StationDetail> {
    let stations = repo.fetch_stations(&StationFilter::default()).await?;
    let station = stations
        .iter()
        .find(|s| s.id == station_id)
        .ok_or_else(|| RepositoryError::not_found(format!("station {} not found", station_id)))?;

    let inspections = repo
        .fetch_inspections(&InspectionFilter {
            station_id: Some(station_id),
            ..Default::default()
        })
        .await?;

    Ok(compute_station_detail(station, &inspections, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InspectionId;
    use crate::models::GeoPoint;

    fn station(id: i64, code: &str, kind: StationKind) -> Station {
        Station {
            id: StationId::new(id),
            code: code.to_string(),
            kind,
            active: true,
            installed_at: None,
            location: Some(GeoPoint::new(-86.85, 21.16)),
            last_inspection_id: None,
        }
    }

    fn inspection(id: i64, station_id: i64, ts: &str, condition: Condition) -> Inspection {
        Inspection {
            id: InspectionId::new(id),
            station_id: StationId::new(station_id),
            timestamp: ts.parse().unwrap(),
            inspector: "Ana".to_string(),
            company: Some("PlagaStop".to_string()),
            condition,
            bait_consumed: false,
            droppings_present: false,
            location_correct: true,
            location: Some(GeoPoint::new(-86.85, 21.16)),
            photo_url: None,
            notes: None,
        }
    }

    fn now() -> DateTime<Utc> {
        "2025-04-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_report_basic_shape() {
        let stations = vec![
            station(1, "CR-001", StationKind::Rodent),
            station(2, "UV-001", StationKind::UvTrap),
        ];
        let inspections = vec![
            inspection(1, 1, "2025-03-25T10:00:00Z", Condition::Good),
            inspection(2, 1, "2025-03-01T10:00:00Z", Condition::Fair),
        ];

        let report = compute_station_ops_report(&stations, &inspections, now(), 10);

        assert_eq!(report.total_stations, 2);
        assert_eq!(report.active_stations, 2);
        assert_eq!(report.summaries.len(), 2);

        let cr = &report.summaries[0];
        assert_eq!(cr.inspection_count, 2);
        assert_eq!(cr.staleness, Staleness::Current);
        assert_eq!(cr.last_condition, Some(Condition::Good));
        assert_eq!(cr.average_interval_days, Some(24));

        let uv = &report.summaries[1];
        assert_eq!(uv.inspection_count, 0);
        assert_eq!(uv.staleness, Staleness::Never);
        assert_eq!(uv.average_interval_days, None);
    }

    #[test]
    fn test_unmatched_inspections_excluded() {
        let stations = vec![station(1, "CR-001", StationKind::Rodent)];
        let inspections = vec![
            inspection(1, 1, "2025-03-25T10:00:00Z", Condition::Good),
            inspection(2, 999, "2025-03-26T10:00:00Z", Condition::Poor),
        ];

        let report = compute_station_ops_report(&stations, &inspections, now(), 10);
        assert_eq!(report.summaries[0].inspection_count, 1);
        // The orphan inspection contributes to no ranking either
        assert_eq!(report.most_inspected.len(), 1);
    }

    #[test]
    fn test_rankings_exclude_zero_count_stations() {
        let stations = vec![
            station(1, "CR-001", StationKind::Rodent),
            station(2, "CR-002", StationKind::Rodent),
        ];
        let inspections = vec![inspection(1, 1, "2025-03-25T10:00:00Z", Condition::Good)];

        let report = compute_station_ops_report(&stations, &inspections, now(), 10);
        assert_eq!(report.most_inspected.len(), 1);
        assert_eq!(report.least_inspected.len(), 1);
        assert_eq!(report.most_inspected[0].label, "CR-001");
    }

    #[test]
    fn test_distributions_cover_full_universe() {
        let stations = vec![station(1, "CR-001", StationKind::Rodent)];
        let report = compute_station_ops_report(&stations, &[], now(), 10);

        assert_eq!(report.kind_distribution.len(), StationKind::ALL.len());
        assert_eq!(report.condition_distribution.len(), Condition::ALL.len());
        assert_eq!(report.staleness_distribution.len(), Staleness::ALL.len());

        let never = report
            .staleness_distribution
            .iter()
            .find(|c| c.category == "Never")
            .unwrap();
        assert_eq!(never.count, 1);
    }

    #[test]
    fn test_station_detail_history_newest_first() {
        let s = station(1, "CR-001", StationKind::Rodent);
        let inspections = vec![
            inspection(1, 1, "2025-03-01T10:00:00Z", Condition::Good),
            inspection(2, 1, "2025-03-25T10:00:00Z", Condition::Fair),
        ];

        let detail = compute_station_detail(&s, &inspections, now());
        assert_eq!(detail.history.len(), 2);
        assert_eq!(detail.history[0].id.value(), 2);
        assert_eq!(detail.summary.last_condition, Some(Condition::Fair));
    }

    #[test]
    fn test_report_is_deterministic() {
        let stations = vec![
            station(1, "CR-001", StationKind::Rodent),
            station(2, "CR-002", StationKind::Rodent),
        ];
        let inspections = vec![
            inspection(1, 1, "2025-03-25T10:00:00Z", Condition::Good),
            inspection(2, 2, "2025-03-20T10:00:00Z", Condition::Poor),
        ];

        let a = compute_station_ops_report(&stations, &inspections, now(), 10);
        let b = compute_station_ops_report(&stations, &inspections, now(), 10);
        assert_eq!(a, b);
    }
}
