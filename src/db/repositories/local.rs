//! In-memory repository over a normalized snapshot.
//!
//! The default backend for development and tests. Holds one snapshot behind
//! a `parking_lot::RwLock`; every fetch clones out of it, so read locks are
//! held only for the duration of the copy.

use async_trait::async_trait;
use chrono::Datelike;
use parking_lot::RwLock;

use crate::api::CycleId;
use crate::db::checksum::calculate_checksum;
use crate::db::repository::{
    CycleFilter, ErrorContext, InspectionFilter, OpsRepository, RepositoryError, RepositoryResult,
    RoomFilter, SnapshotStore, SnapshotSummary, StationFilter,
};
use crate::models::wire::{DataAnomaly, NormalizedSnapshot, RawSnapshot};
use crate::models::{FumigationCycle, Inspection, RoomFumigation, Station};

#[derive(Default)]
struct Store {
    snapshot: NormalizedSnapshot,
    checksum: Option<String>,
}

/// In-memory snapshot repository.
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-loaded with normalized records. Test seam.
    pub fn with_data(
        stations: Vec<Station>,
        inspections: Vec<Inspection>,
        cycles: Vec<FumigationCycle>,
        rooms: Vec<RoomFumigation>,
    ) -> Self {
        Self {
            store: RwLock::new(Store {
                snapshot: NormalizedSnapshot {
                    stations,
                    inspections,
                    cycles,
                    rooms,
                    anomalies: Vec::new(),
                },
                checksum: None,
            }),
        }
    }
}

fn matches_station(station: &Station, filter: &StationFilter) -> bool {
    filter.kind.is_none_or(|k| station.kind == k)
        && filter.active.is_none_or(|a| station.active == a)
}

fn matches_inspection(inspection: &Inspection, filter: &InspectionFilter) -> bool {
    filter.station_id.is_none_or(|id| inspection.station_id == id)
        && filter.since.is_none_or(|since| inspection.timestamp >= since)
        && filter.until.is_none_or(|until| inspection.timestamp <= until)
}

fn matches_cycle(cycle: &FumigationCycle, filter: &CycleFilter) -> bool {
    filter.status.is_none_or(|s| cycle.status == s)
        && filter.year.is_none_or(|y| cycle.period_start.year() == y)
}

fn matches_room(room: &RoomFumigation, filter: &RoomFilter) -> bool {
    filter.status.is_none_or(|s| room.status == s)
        && filter
            .area
            .as_deref()
            .is_none_or(|area| room.area.as_deref() == Some(area))
}

#[async_trait]
impl OpsRepository for LocalRepository {
    async fn fetch_stations(&self, filter: &StationFilter) -> RepositoryResult<Vec<Station>> {
        let store = self.store.read();
        Ok(store
            .snapshot
            .stations
            .iter()
            .filter(|s| matches_station(s, filter))
            .cloned()
            .collect())
    }

    async fn fetch_inspections(
        &self,
        filter: &InspectionFilter,
    ) -> RepositoryResult<Vec<Inspection>> {
        let store = self.store.read();
        let mut inspections: Vec<Inspection> = store
            .snapshot
            .inspections
            .iter()
            .filter(|i| matches_inspection(i, filter))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            inspections.truncate(limit);
        }
        Ok(inspections)
    }

    async fn fetch_cycles(&self, filter: &CycleFilter) -> RepositoryResult<Vec<FumigationCycle>> {
        let store = self.store.read();
        Ok(store
            .snapshot
            .cycles
            .iter()
            .filter(|c| matches_cycle(c, filter))
            .cloned()
            .collect())
    }

    async fn fetch_cycle(&self, id: CycleId) -> RepositoryResult<FumigationCycle> {
        let store = self.store.read();
        store
            .snapshot
            .cycles
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("cycle {} not found", id),
                    ErrorContext::new("fetch_cycle")
                        .with_entity("cycle")
                        .with_entity_id(id),
                )
            })
    }

    async fn fetch_cycle_rooms(
        &self,
        id: CycleId,
        filter: &RoomFilter,
    ) -> RepositoryResult<Vec<RoomFumigation>> {
        let store = self.store.read();
        Ok(store
            .snapshot
            .rooms
            .iter()
            .filter(|r| r.cycle_id == id && matches_room(r, filter))
            .cloned()
            .collect())
    }

    async fn fetch_anomalies(&self) -> RepositoryResult<Vec<DataAnomaly>> {
        let store = self.store.read();
        Ok(store.snapshot.anomalies.clone())
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for LocalRepository {
    async fn store_snapshot(&self, raw_json: &str) -> RepositoryResult<SnapshotSummary> {
        let checksum = calculate_checksum(raw_json);

        {
            let store = self.store.read();
            if store.checksum.as_deref() == Some(checksum.as_str()) {
                log::debug!("snapshot unchanged, checksum {}", checksum);
                let snapshot = &store.snapshot;
                return Ok(SnapshotSummary {
                    stations: snapshot.stations.len(),
                    inspections: snapshot.inspections.len(),
                    cycles: snapshot.cycles.len(),
                    rooms: snapshot.rooms.len(),
                    anomalies: snapshot.anomalies.len(),
                    checksum,
                    unchanged: true,
                });
            }
        }

        let raw: RawSnapshot = serde_json::from_str(raw_json).map_err(|e| {
            RepositoryError::validation_with_context(
                format!("invalid snapshot document: {}", e),
                ErrorContext::new("store_snapshot").with_entity("snapshot"),
            )
        })?;

        let normalized = NormalizedSnapshot::from_raw(raw);
        for anomaly in &normalized.anomalies {
            log::warn!(
                "data anomaly: {} {} field {}: {}",
                anomaly.entity,
                anomaly.entity_id,
                anomaly.field,
                anomaly.message
            );
        }

        let summary = SnapshotSummary {
            stations: normalized.stations.len(),
            inspections: normalized.inspections.len(),
            cycles: normalized.cycles.len(),
            rooms: normalized.rooms.len(),
            anomalies: normalized.anomalies.len(),
            checksum: checksum.clone(),
            unchanged: false,
        };

        let mut store = self.store.write();
        store.snapshot = normalized;
        store.checksum = Some(checksum);

        log::info!(
            "snapshot imported: {} stations, {} inspections, {} cycles, {} rooms, {} anomalies",
            summary.stations,
            summary.inspections,
            summary.cycles,
            summary.rooms,
            summary.anomalies
        );

        Ok(summary)
    }
}
