//! Wire-format adapter for the operations REST API.
//!
//! The collaborator API is inconsistent in ways the engine must never see:
//! booleans cross as native `true`/`false` in some payloads and as `0`/`1`
//! integers in others, timestamps cross as ISO-8601 strings of varying
//! precision, and one inspection field (`bait_replaced`) kept its legacy name
//! after its meaning changed. This module normalizes all of that at the
//! boundary: every record either becomes a clean domain value or is excluded
//! with a [`DataAnomaly`] explaining why. Invalid dates are never allowed to
//! reach the temporal reducers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{
    Condition, CycleStatus, FumigationCycle, GeoPoint, Inspection, RoomFumigation, RoomStatus,
    ServiceType, Station, StationKind,
};
use crate::api::{CycleId, InspectionId, RoomFumigationId, StationId};

// =========================================================
// Flexible boolean decoding
// =========================================================

/// Deserialize a boolean that may arrive as `true`/`false` or `0`/`1`.
fn flex_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }

    match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => Ok(b),
        BoolOrInt::Int(0) => Ok(false),
        BoolOrInt::Int(1) => Ok(true),
        BoolOrInt::Int(other) => Err(serde::de::Error::custom(format!(
            "expected boolean or 0/1, got {}",
            other
        ))),
    }
}

fn default_true() -> bool {
    true
}

// =========================================================
// Raw payload types
// =========================================================

/// A complete raw data snapshot as served by the collaborator API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub stations: Vec<RawStation>,
    #[serde(default)]
    pub inspections: Vec<RawInspection>,
    #[serde(default)]
    pub cycles: Vec<RawCycle>,
    #[serde(default)]
    pub rooms: Vec<RawRoomFumigation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStation {
    pub id: i64,
    pub code: String,
    #[serde(rename = "type")]
    pub station_type: String,
    #[serde(default = "default_true", deserialize_with = "flex_bool")]
    pub active: bool,
    #[serde(default)]
    pub installed_at: Option<String>,
    /// Longitude.
    #[serde(default)]
    pub x: Option<f64>,
    /// Latitude.
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub last_inspection_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInspection {
    pub id: i64,
    pub station_id: i64,
    pub timestamp: String,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub condition: String,
    #[serde(default, deserialize_with = "flex_bool")]
    pub bait_consumed: bool,
    /// Legacy wire name; semantically "evidence of activity observed".
    #[serde(default, rename = "bait_replaced", deserialize_with = "flex_bool")]
    pub droppings_present: bool,
    #[serde(default = "default_true", deserialize_with = "flex_bool")]
    pub location_correct: bool,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "flex_bool")]
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCycle {
    pub id: i64,
    pub label: String,
    pub period_start: String,
    pub period_end: String,
    pub status: String,
    #[serde(default)]
    pub total_rooms: u32,
    #[serde(default)]
    pub completed_rooms: u32,
    #[serde(default)]
    pub pending_rooms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoomFumigation {
    pub id: i64,
    pub cycle_id: i64,
    pub room_number: String,
    #[serde(default)]
    pub area: Option<String>,
    pub status: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =========================================================
// Anomalies and normalized output
// =========================================================

/// A data-quality problem found while normalizing a raw record.
///
/// Anomalies are flagged and the offending record (or field) excluded;
/// they are never fatal and never propagate NaN into the reducers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAnomaly {
    /// Entity type, e.g. `"inspection"`.
    pub entity: String,
    pub entity_id: String,
    pub field: String,
    pub message: String,
}

impl DataAnomaly {
    fn new(
        entity: &str,
        entity_id: impl ToString,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A fully normalized snapshot: clean domain records plus the anomalies
/// found while producing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSnapshot {
    pub stations: Vec<Station>,
    pub inspections: Vec<Inspection>,
    pub cycles: Vec<FumigationCycle>,
    pub rooms: Vec<RoomFumigation>,
    pub anomalies: Vec<DataAnomaly>,
}

impl NormalizedSnapshot {
    pub fn from_raw(raw: RawSnapshot) -> Self {
        let mut anomalies = Vec::new();
        let stations = normalize_stations(raw.stations, &mut anomalies);
        let inspections = normalize_inspections(raw.inspections, &mut anomalies);
        let cycles = normalize_cycles(raw.cycles, &mut anomalies);
        let rooms = normalize_rooms(raw.rooms, &mut anomalies);
        Self {
            stations,
            inspections,
            cycles,
            rooms,
            anomalies,
        }
    }
}

// =========================================================
// Parsing helpers
// =========================================================

/// Parse an ISO-8601 instant. Accepts full RFC 3339, a naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (assumed UTC), or a bare
/// date (midnight UTC).
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Parse a calendar date, tolerating a full timestamp by truncation.
fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    parse_timestamp(value).map(|dt| dt.date_naive())
}

/// A coordinate exists only when both components are present. A one-sided
/// pair is reported so it can be flagged upstream.
fn coordinate(x: Option<f64>, y: Option<f64>) -> (Option<GeoPoint>, bool) {
    match (x, y) {
        (Some(lon), Some(lat)) => (Some(GeoPoint::new(lon, lat)), false),
        (None, None) => (None, false),
        _ => (None, true),
    }
}

fn station_kind(code: &str) -> Option<StationKind> {
    match code {
        "RODENT" => Some(StationKind::Rodent),
        "UV_TRAP" => Some(StationKind::UvTrap),
        "OTHER" => Some(StationKind::Other),
        _ => None,
    }
}

fn condition(code: &str) -> Option<Condition> {
    match code {
        "GOOD" => Some(Condition::Good),
        "FAIR" => Some(Condition::Fair),
        "POOR" => Some(Condition::Poor),
        _ => None,
    }
}

fn cycle_status(code: &str) -> Option<CycleStatus> {
    match code {
        "OPEN" => Some(CycleStatus::Open),
        "CLOSED" => Some(CycleStatus::Closed),
        _ => None,
    }
}

fn room_status(code: &str) -> Option<RoomStatus> {
    match code {
        "PENDING" => Some(RoomStatus::Pending),
        "DONE" => Some(RoomStatus::Done),
        "NOT_APPLICABLE" => Some(RoomStatus::NotApplicable),
        _ => None,
    }
}

fn service_type(code: &str) -> Option<ServiceType> {
    match code {
        "PREVENTIVE" => Some(ServiceType::Preventive),
        "CORRECTIVE" => Some(ServiceType::Corrective),
        "FOGGING" => Some(ServiceType::Fogging),
        "SPRAY" => Some(ServiceType::Spray),
        "GEL" => Some(ServiceType::Gel),
        "OTHER" => Some(ServiceType::Other),
        _ => None,
    }
}

// =========================================================
// Per-entity normalization
// =========================================================

pub fn normalize_stations(raw: Vec<RawStation>, anomalies: &mut Vec<DataAnomaly>) -> Vec<Station> {
    let mut stations = Vec::with_capacity(raw.len());
    for r in raw {
        let kind = match station_kind(&r.station_type) {
            Some(kind) => kind,
            None => {
                anomalies.push(DataAnomaly::new(
                    "station",
                    r.id,
                    "type",
                    format!("unknown station type '{}', treated as OTHER", r.station_type),
                ));
                StationKind::Other
            }
        };

        let installed_at = match r.installed_at.as_deref() {
            Some(value) => {
                let parsed = parse_date(value);
                if parsed.is_none() {
                    anomalies.push(DataAnomaly::new(
                        "station",
                        r.id,
                        "installed_at",
                        format!("unparseable date '{}'", value),
                    ));
                }
                parsed
            }
            None => None,
        };

        let (location, one_sided) = coordinate(r.x, r.y);
        if one_sided {
            anomalies.push(DataAnomaly::new(
                "station",
                r.id,
                "x/y",
                "one-sided coordinate pair, treated as absent",
            ));
        }

        stations.push(Station {
            id: StationId::new(r.id),
            code: r.code,
            kind,
            active: r.active,
            installed_at,
            location,
            last_inspection_id: r.last_inspection_id.map(InspectionId::new),
        });
    }
    stations
}

pub fn normalize_inspections(
    raw: Vec<RawInspection>,
    anomalies: &mut Vec<DataAnomaly>,
) -> Vec<Inspection> {
    let mut inspections = Vec::with_capacity(raw.len());
    for r in raw {
        if r.deleted {
            continue;
        }

        let timestamp = match parse_timestamp(&r.timestamp) {
            Some(ts) => ts,
            None => {
                anomalies.push(DataAnomaly::new(
                    "inspection",
                    r.id,
                    "timestamp",
                    format!("unparseable timestamp '{}', record excluded", r.timestamp),
                ));
                continue;
            }
        };

        let condition = match condition(&r.condition) {
            Some(c) => c,
            None => {
                anomalies.push(DataAnomaly::new(
                    "inspection",
                    r.id,
                    "condition",
                    format!("unknown condition '{}', record excluded", r.condition),
                ));
                continue;
            }
        };

        let (location, one_sided) = coordinate(r.x, r.y);
        if one_sided {
            anomalies.push(DataAnomaly::new(
                "inspection",
                r.id,
                "x/y",
                "one-sided coordinate pair, treated as absent",
            ));
        }

        inspections.push(Inspection {
            id: InspectionId::new(r.id),
            station_id: StationId::new(r.station_id),
            timestamp,
            inspector: r.inspector.unwrap_or_default(),
            company: r.company,
            condition,
            bait_consumed: r.bait_consumed,
            droppings_present: r.droppings_present,
            location_correct: r.location_correct,
            location,
            photo_url: r.photo_url,
            notes: r.notes,
        });
    }
    inspections
}

pub fn normalize_cycles(
    raw: Vec<RawCycle>,
    anomalies: &mut Vec<DataAnomaly>,
) -> Vec<FumigationCycle> {
    let mut cycles = Vec::with_capacity(raw.len());
    for r in raw {
        let status = match cycle_status(&r.status) {
            Some(s) => s,
            None => {
                anomalies.push(DataAnomaly::new(
                    "cycle",
                    r.id,
                    "status",
                    format!("unknown cycle status '{}', record excluded", r.status),
                ));
                continue;
            }
        };

        let period_start = parse_date(&r.period_start);
        let period_end = parse_date(&r.period_end);
        let (period_start, period_end) = match (period_start, period_end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                anomalies.push(DataAnomaly::new(
                    "cycle",
                    r.id,
                    "period",
                    format!(
                        "unparseable period '{}'..'{}', record excluded",
                        r.period_start, r.period_end
                    ),
                ));
                continue;
            }
        };

        if period_end < period_start {
            anomalies.push(DataAnomaly::new(
                "cycle",
                r.id,
                "period",
                "period_end precedes period_start",
            ));
        }

        cycles.push(FumigationCycle {
            id: CycleId::new(r.id),
            label: r.label,
            period_start,
            period_end,
            status,
            total_rooms: r.total_rooms,
            completed_rooms: r.completed_rooms,
            pending_rooms: r.pending_rooms,
        });
    }
    cycles
}

pub fn normalize_rooms(
    raw: Vec<RawRoomFumigation>,
    anomalies: &mut Vec<DataAnomaly>,
) -> Vec<RoomFumigation> {
    let mut rooms = Vec::with_capacity(raw.len());
    for r in raw {
        let status = match room_status(&r.status) {
            Some(s) => s,
            None => {
                anomalies.push(DataAnomaly::new(
                    "room_fumigation",
                    r.id,
                    "status",
                    format!("unknown room status '{}', record excluded", r.status),
                ));
                continue;
            }
        };

        let service = match r.service_type.as_deref() {
            Some(code) => match service_type(code) {
                Some(s) => s,
                None => {
                    anomalies.push(DataAnomaly::new(
                        "room_fumigation",
                        r.id,
                        "service_type",
                        format!("unknown service type '{}', treated as OTHER", code),
                    ));
                    ServiceType::Other
                }
            },
            None => ServiceType::Other,
        };

        let completed_at = match r.completed_at.as_deref() {
            Some(value) => {
                let parsed = parse_timestamp(value);
                if parsed.is_none() {
                    anomalies.push(DataAnomaly::new(
                        "room_fumigation",
                        r.id,
                        "completed_at",
                        format!("unparseable timestamp '{}', treated as absent", value),
                    ));
                }
                parsed
            }
            None => None,
        };

        let (location, one_sided) = coordinate(r.x, r.y);
        if one_sided {
            anomalies.push(DataAnomaly::new(
                "room_fumigation",
                r.id,
                "x/y",
                "one-sided coordinate pair, treated as absent",
            ));
        }

        rooms.push(RoomFumigation {
            id: RoomFumigationId::new(r.id),
            cycle_id: CycleId::new(r.cycle_id),
            room_number: r.room_number,
            area: r.area,
            status,
            completed_at,
            service_type: service,
            location,
            operator: r.operator,
            company: r.company,
            photos: r.photos,
            notes: r.notes,
        });
    }
    rooms
}
