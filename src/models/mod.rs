//! Domain entities for hotel pest-control operations.
//!
//! These are immutable value snapshots of externally owned records: the
//! collaborator REST API persists them, this crate only aggregates them.
//! All wire-format quirks (0/1 booleans, string timestamps, legacy field
//! names) are handled in [`wire`] so the engine only ever sees these types.

pub mod wire;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{CycleId, InspectionId, RoomFumigationId, StationId};

/// Geographic coordinate in decimal degrees (`x` = longitude, `y` = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Kind of fixed pest-control device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationKind {
    /// Outdoor rodent-bait station. GPS coordinates are expected on visits.
    Rodent,
    /// Indoor UV insect trap. Indoor GPS is unreliable, so missing
    /// coordinates are not a data-quality defect for this kind.
    UvTrap,
    Other,
}

impl StationKind {
    pub const ALL: [StationKind; 3] = [StationKind::Rodent, StationKind::UvTrap, StationKind::Other];

    /// Wire-format code used by the collaborator API.
    pub fn as_code(&self) -> &'static str {
        match self {
            StationKind::Rodent => "RODENT",
            StationKind::UvTrap => "UV_TRAP",
            StationKind::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StationKind::Rodent => "Rodent bait",
            StationKind::UvTrap => "UV trap",
            StationKind::Other => "Other",
        }
    }
}

/// Physical condition recorded during an inspection.
///
/// Ordinal: GOOD > FAIR > POOR. [`Condition::score`] maps the levels to
/// 3/2/1 for history-wide averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Good, Condition::Fair, Condition::Poor];

    pub fn score(&self) -> f64 {
        match self {
            Condition::Good => 3.0,
            Condition::Fair => 2.0,
            Condition::Poor => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

/// Lifecycle status of a fumigation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleStatus {
    Open,
    Closed,
}

/// Status of a single room within a fumigation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Pending,
    Done,
    NotApplicable,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 3] = [
        RoomStatus::Pending,
        RoomStatus::Done,
        RoomStatus::NotApplicable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Pending => "Pending",
            RoomStatus::Done => "Done",
            RoomStatus::NotApplicable => "Not applicable",
        }
    }
}

/// Kind of pest-control service applied to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Preventive,
    Corrective,
    Fogging,
    Spray,
    Gel,
    Other,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Preventive,
        ServiceType::Corrective,
        ServiceType::Fogging,
        ServiceType::Spray,
        ServiceType::Gel,
        ServiceType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Preventive => "Preventive",
            ServiceType::Corrective => "Corrective",
            ServiceType::Fogging => "Fogging",
            ServiceType::Spray => "Spray",
            ServiceType::Gel => "Gel",
            ServiceType::Other => "Other",
        }
    }
}

/// A fixed physical pest-control device at a hotel location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// Unique human-readable label, e.g. `"CR-012"`.
    pub code: String,
    pub kind: StationKind,
    pub active: bool,
    pub installed_at: Option<NaiveDate>,
    /// Fixed position of the device, when surveyed.
    pub location: Option<GeoPoint>,
    /// Denormalized pointer maintained by the collaborator. The engine
    /// recomputes "most recent inspection" itself and never trusts this.
    pub last_inspection_id: Option<InspectionId>,
}

/// A field record of a technician's visit to a station.
///
/// Created once per visit and never mutated; soft-deleted records are
/// dropped during wire normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: InspectionId,
    pub station_id: StationId,
    pub timestamp: DateTime<Utc>,
    pub inspector: String,
    pub company: Option<String>,
    pub condition: Condition,
    pub bait_consumed: bool,
    /// Evidence of pest activity observed at the station. Crosses the wire
    /// as `bait_replaced` for legacy reasons.
    pub droppings_present: bool,
    pub location_correct: bool,
    /// Coordinate reported by the technician's device, when captured.
    pub location: Option<GeoPoint>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

/// A time-boxed batch of room-fumigation work, usually monthly.
///
/// The `total_rooms` / `completed_rooms` / `pending_rooms` counters are
/// materialized by the collaborator; the engine only cross-checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FumigationCycle {
    pub id: CycleId,
    pub label: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: CycleStatus,
    pub total_rooms: u32,
    pub completed_rooms: u32,
    pub pending_rooms: u32,
}

/// The record of (or pending need for) a service visit to one hotel room
/// within a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFumigation {
    pub id: RoomFumigationId,
    pub cycle_id: CycleId,
    pub room_number: String,
    pub area: Option<String>,
    pub status: RoomStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub service_type: ServiceType,
    pub location: Option<GeoPoint>,
    pub operator: Option<String>,
    pub company: Option<String>,
    pub photos: Vec<String>,
    pub notes: Option<String>,
}
