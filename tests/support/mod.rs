//! Shared fixtures for integration tests.

// Not every suite uses every fixture
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::json;

use hotelops_rust::api::{CycleId, InspectionId, RoomFumigationId, StationId};
use hotelops_rust::models::{
    Condition, CycleStatus, FumigationCycle, GeoPoint, Inspection, RoomFumigation, RoomStatus,
    ServiceType, Station, StationKind,
};

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid test timestamp")
}

pub fn station(id: i64, code: &str, kind: StationKind) -> Station {
    Station {
        id: StationId::new(id),
        code: code.to_string(),
        kind,
        active: true,
        installed_at: Some("2024-01-15".parse().unwrap()),
        location: Some(GeoPoint::new(-86.85, 21.16)),
        last_inspection_id: None,
    }
}

pub fn inspection(id: i64, station_id: i64, timestamp: &str, condition: Condition) -> Inspection {
    Inspection {
        id: InspectionId::new(id),
        station_id: StationId::new(station_id),
        timestamp: ts(timestamp),
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

pub fn cycle(id: i64, start: &str, end: &str, total: u32, completed: u32) -> FumigationCycle {
    FumigationCycle {
        id: CycleId::new(id),
        label: format!("Cycle {}", id),
        period_start: start.parse().unwrap(),
        period_end: end.parse().unwrap(),
        status: CycleStatus::Open,
        total_rooms: total,
        completed_rooms: completed,
        pending_rooms: total.saturating_sub(completed),
    }
}

pub fn room(
    id: i64,
    cycle_id: i64,
    number: &str,
    status: RoomStatus,
    completed_at: Option<&str>,
) -> RoomFumigation {
    RoomFumigation {
        id: RoomFumigationId::new(id),
        cycle_id: CycleId::new(cycle_id),
        room_number: number.to_string(),
        area: Some("Tower A".to_string()),
        status,
        completed_at: completed_at.map(ts),
        service_type: ServiceType::Preventive,
        location: None,
        operator: Some("Luis".to_string()),
        company: Some("PlagaStop".to_string()),
        photos: Vec::new(),
        notes: None,
    }
}

/// A raw snapshot document exercising the wire-format quirks: 0/1 booleans,
/// a malformed timestamp, a soft-deleted record, and an orphan inspection.
pub fn messy_snapshot_json() -> String {
    json!({
        "stations": [
            {"id": 1, "code": "CR-001", "type": "RODENT", "active": 1,
             "installed_at": "2024-01-15", "x": -86.85, "y": 21.16},
            {"id": 2, "code": "CR-002", "type": "RODENT", "active": true,
             "x": -86.84, "y": 21.17},
            {"id": 3, "code": "UV-001", "type": "UV_TRAP", "active": 0}
        ],
        "inspections": [
            {"id": 10, "station_id": 1, "timestamp": "2025-03-20T10:00:00Z",
             "inspector": "Ana", "condition": "GOOD", "bait_consumed": 1,
             "bait_replaced": 0, "location_correct": 1,
             "x": -86.85, "y": 21.16},
            {"id": 11, "station_id": 1, "timestamp": "2025-02-10 09:30:00",
             "inspector": "Ana", "condition": "FAIR", "bait_consumed": true,
             "bait_replaced": true, "location_correct": true},
            {"id": 12, "station_id": 2, "timestamp": "not-a-timestamp",
             "inspector": "Luis", "condition": "GOOD", "bait_consumed": 0,
             "bait_replaced": 0, "location_correct": 1},
            {"id": 13, "station_id": 2, "timestamp": "2025-01-05T08:00:00Z",
             "inspector": "Luis", "condition": "POOR", "bait_consumed": 0,
             "bait_replaced": 1, "location_correct": 0},
            {"id": 14, "station_id": 99, "timestamp": "2025-03-01T12:00:00Z",
             "inspector": "Luis", "condition": "GOOD", "bait_consumed": 0,
             "bait_replaced": 0, "location_correct": 1},
            {"id": 15, "station_id": 1, "timestamp": "2025-03-25T10:00:00Z",
             "inspector": "Ana", "condition": "GOOD", "bait_consumed": 0,
             "bait_replaced": 0, "location_correct": 1, "deleted": 1}
        ],
        "cycles": [
            {"id": 5, "label": "March 2025", "period_start": "2025-03-01",
             "period_end": "2025-03-31", "status": "OPEN",
             "total_rooms": 100, "completed_rooms": 40, "pending_rooms": 60}
        ],
        "rooms": [
            {"id": 100, "cycle_id": 5, "room_number": "101", "status": "DONE",
             "completed_at": "2025-03-05T09:00:00Z", "service_type": "PREVENTIVE"},
            {"id": 101, "cycle_id": 5, "room_number": "102", "status": "PENDING"},
            {"id": 102, "cycle_id": 5, "room_number": "103",
             "status": "NOT_APPLICABLE"}
        ]
    })
    .to_string()
}
