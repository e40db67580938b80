//! Tests for the data-access services over the local backend.

use super::repository::{CycleFilter, StationFilter};
use super::repositories::LocalRepository;
use super::services;
use crate::models::StationKind;

fn snapshot_json() -> String {
    serde_json::json!({
        "stations": [
            {"id": 1, "code": "CR-001", "type": "RODENT", "active": 1},
            {"id": 2, "code": "UV-001", "type": "UV_TRAP", "active": 0}
        ],
        "inspections": [
            {"id": 10, "station_id": 1, "timestamp": "2025-03-01T10:00:00Z",
             "inspector": "Ana", "condition": "GOOD", "bait_consumed": 0,
             "bait_replaced": 0, "location_correct": 1},
            {"id": 11, "station_id": 1, "timestamp": "not-a-date",
             "inspector": "Ana", "condition": "GOOD", "bait_consumed": 0,
             "bait_replaced": 0, "location_correct": 1}
        ],
        "cycles": [
            {"id": 5, "label": "March 2025", "period_start": "2025-03-01",
             "period_end": "2025-03-31", "status": "OPEN",
             "total_rooms": 10, "completed_rooms": 4, "pending_rooms": 6}
        ],
        "rooms": []
    })
    .to_string()
}

#[tokio::test]
async fn test_import_then_list() {
    let repo = LocalRepository::new();
    let summary = services::import_snapshot(&repo, &snapshot_json())
        .await
        .unwrap();
    assert_eq!(summary.stations, 2);
    // The malformed-timestamp inspection is excluded, not imported
    assert_eq!(summary.inspections, 1);
    assert_eq!(summary.anomalies, 1);

    let stations = services::list_stations(&repo, &StationFilter::default())
        .await
        .unwrap();
    assert_eq!(stations.len(), 2);

    let active_rodents = services::list_stations(
        &repo,
        &StationFilter {
            kind: Some(StationKind::Rodent),
            active: Some(true),
        },
    )
    .await
    .unwrap();
    assert_eq!(active_rodents.len(), 1);

    let cycles = services::list_cycles(&repo, &CycleFilter::default())
        .await
        .unwrap();
    assert_eq!(cycles.len(), 1);
}

#[tokio::test]
async fn test_anomalies_survive_import() {
    let repo = LocalRepository::new();
    services::import_snapshot(&repo, &snapshot_json())
        .await
        .unwrap();

    let anomalies = services::list_anomalies(&repo).await.unwrap();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].entity, "inspection");
    assert_eq!(anomalies[0].field, "timestamp");
}

#[tokio::test]
async fn test_health_check_local() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.is_ok());
}
