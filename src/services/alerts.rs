//! Alert classifiers: never-inspected, overdue, and condition-based buckets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::temporal::days_since;
use crate::api::StationId;
use crate::models::{Inspection, RoomFumigation, RoomStatus, Station};

/// Average-score cutoff below which an entity's condition is POOR.
pub const POOR_CONDITION_CUTOFF: f64 = 1.5;
/// Average-score cutoff below which an entity's condition is FAIR.
pub const FAIR_CONDITION_CUTOFF: f64 = 2.5;

/// Category of an alert bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    NeverInspected,
    Overdue,
    PoorCondition,
}

/// One entity inside an alert bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
}

/// A partition of entities sharing one alert condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertBucket {
    pub kind: AlertKind,
    pub entries: Vec<AlertEntry>,
}

/// Condition band derived from an entity's full inspection history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionBand {
    Good,
    Fair,
    Poor,
}

impl ConditionBand {
    pub const ALL: [ConditionBand; 3] =
        [ConditionBand::Good, ConditionBand::Fair, ConditionBand::Poor];

    pub fn label(&self) -> &'static str {
        match self {
            ConditionBand::Good => "Good",
            ConditionBand::Fair => "Fair",
            ConditionBand::Poor => "Poor",
        }
    }
}

/// Band an average condition score (GOOD=3, FAIR=2, POOR=1).
pub fn condition_band(average_score: f64) -> ConditionBand {
    if average_score < POOR_CONDITION_CUTOFF {
        ConditionBand::Poor
    } else if average_score < FAIR_CONDITION_CUTOFF {
        ConditionBand::Fair
    } else {
        ConditionBand::Good
    }
}

/// Mean condition score over a history of inspections; `None` when empty.
pub fn average_condition_score(inspections: &[&Inspection]) -> Option<f64> {
    if inspections.is_empty() {
        return None;
    }
    let sum: f64 = inspections.iter().map(|i| i.condition.score()).sum();
    Some(sum / inspections.len() as f64)
}

/// Stations with no inspection on record at all.
pub fn never_inspected(
    stations: &[Station],
    latest: &HashMap<StationId, &Inspection>,
) -> AlertBucket {
    let entries = stations
        .iter()
        .filter(|s| !latest.contains_key(&s.id))
        .map(|s| AlertEntry {
            label: s.code.clone(),
            days_overdue: None,
        })
        .collect();
    AlertBucket {
        kind: AlertKind::NeverInspected,
        entries,
    }
}

/// Stations whose last inspection is older than `threshold_days`, sorted by
/// days overdue descending and capped at `limit`.
pub fn overdue_stations(
    stations: &[Station],
    latest: &HashMap<StationId, &Inspection>,
    now: DateTime<Utc>,
    threshold_days: i64,
    limit: usize,
) -> AlertBucket {
    let mut entries: Vec<AlertEntry> = stations
        .iter()
        .filter_map(|station| {
            let inspection = latest.get(&station.id)?;
            let days = days_since(inspection.timestamp, now);
            (days > threshold_days).then(|| AlertEntry {
                label: station.code.clone(),
                days_overdue: Some(days),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    entries.truncate(limit);
    AlertBucket {
        kind: AlertKind::Overdue,
        entries,
    }
}

/// Rooms whose most recent completed fumigation is older than
/// `threshold_days`, keyed by room number across the supplied records.
pub fn overdue_rooms(
    rooms: &[RoomFumigation],
    now: DateTime<Utc>,
    threshold_days: i64,
    limit: usize,
) -> AlertBucket {
    let done: Vec<&RoomFumigation> = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Done && r.completed_at.is_some())
        .collect();

    // Latest completed service per room number
    let mut latest: HashMap<&str, DateTime<Utc>> = HashMap::new();
    for room in &done {
        let completed = room.completed_at.unwrap_or_default();
        let slot = latest.entry(room.room_number.as_str()).or_insert(completed);
        if *slot <= completed {
            *slot = completed;
        }
    }

    let mut entries: Vec<AlertEntry> = latest
        .into_iter()
        .filter_map(|(room_number, completed)| {
            let days = days_since(completed, now);
            (days > threshold_days).then(|| AlertEntry {
                label: room_number.to_string(),
                days_overdue: Some(days),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue).then(a.label.cmp(&b.label)));
    entries.truncate(limit);
    AlertBucket {
        kind: AlertKind::Overdue,
        entries,
    }
}

/// Stations whose average condition over their full history bands as POOR.
pub fn poor_condition_stations(
    stations: &[Station],
    history: &HashMap<StationId, Vec<&Inspection>>,
) -> AlertBucket {
    let entries = stations
        .iter()
        .filter_map(|station| {
            let inspections = history.get(&station.id)?;
            let average = average_condition_score(inspections)?;
            (condition_band(average) == ConditionBand::Poor).then(|| AlertEntry {
                label: station.code.clone(),
                days_overdue: None,
            })
        })
        .collect();
    AlertBucket {
        kind: AlertKind::PoorCondition,
        entries,
    }
}
