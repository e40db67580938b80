//! Repository abstraction for operational data access.
//!
//! The engine never fetches anything itself; it is handed slices by the
//! `get_*` report twins, which pull from whichever [`OpsRepository`]
//! implementation was injected. Implementations live in
//! [`crate::db::repositories`].

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{CycleId, StationId};
use crate::models::wire::DataAnomaly;
use crate::models::{
    CycleStatus, FumigationCycle, Inspection, RoomFumigation, RoomStatus, Station, StationKind,
};

/// Filter for station listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilter {
    pub kind: Option<StationKind>,
    pub active: Option<bool>,
}

/// Filter for inspection listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionFilter {
    pub station_id: Option<StationId>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    /// Cap on the number of records returned, applied after filtering.
    pub limit: Option<usize>,
}

/// Filter for cycle listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleFilter {
    pub status: Option<CycleStatus>,
    /// Match cycles whose period starts in this calendar year.
    pub year: Option<i32>,
}

/// Filter for room listings within a cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
    pub area: Option<String>,
}

/// Outcome of a snapshot import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub stations: usize,
    pub inspections: usize,
    pub cycles: usize,
    pub rooms: usize,
    pub anomalies: usize,
    /// SHA-256 of the raw payload, used for import deduplication.
    pub checksum: String,
    /// True when the payload matched the previous import and nothing changed.
    pub unchanged: bool,
}

/// Read access to normalized operational records.
#[async_trait]
pub trait OpsRepository: Send + Sync {
    async fn fetch_stations(&self, filter: &StationFilter) -> RepositoryResult<Vec<Station>>;

    async fn fetch_inspections(
        &self,
        filter: &InspectionFilter,
    ) -> RepositoryResult<Vec<Inspection>>;

    async fn fetch_cycles(&self, filter: &CycleFilter) -> RepositoryResult<Vec<FumigationCycle>>;

    /// Fetch one cycle; `NotFound` when the id is unknown.
    async fn fetch_cycle(&self, id: CycleId) -> RepositoryResult<FumigationCycle>;

    async fn fetch_cycle_rooms(
        &self,
        id: CycleId,
        filter: &RoomFilter,
    ) -> RepositoryResult<Vec<RoomFumigation>>;

    /// Data-quality anomalies recorded during the last normalization.
    async fn fetch_anomalies(&self) -> RepositoryResult<Vec<DataAnomaly>>;

    async fn health_check(&self) -> RepositoryResult<()>;
}

/// Write access for raw snapshot imports.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Parse, normalize, and store a raw snapshot JSON document.
    ///
    /// Imports are deduplicated by payload checksum: re-importing an
    /// identical document is a no-op reported via
    /// [`SnapshotSummary::unchanged`].
    async fn store_snapshot(&self, raw_json: &str) -> RepositoryResult<SnapshotSummary>;
}

/// Everything a report handler needs from a backend.
pub trait FullRepository: OpsRepository + SnapshotStore {}

impl<T: OpsRepository + SnapshotStore> FullRepository for T {}
