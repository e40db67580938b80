//! Request and response DTOs for the reporting API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::wire::DataAnomaly;
use crate::models::{CycleStatus, FumigationCycle, Inspection, Station, StationKind};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Raw snapshot import request. The document is passed through verbatim to
/// the snapshot store, which owns parsing and normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportSnapshotRequest {
    pub snapshot: serde_json::Value,
}

/// Query parameters for report endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    /// Display cap for rankings and alert lists.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Pins "now" for deterministic output; defaults to the current time.
    pub as_of: Option<DateTime<Utc>>,
}

fn default_limit() -> usize {
    10
}

/// Query parameters for the station detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailQuery {
    pub as_of: Option<DateTime<Utc>>,
}

/// Query parameters for station listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationListQuery {
    pub kind: Option<StationKind>,
    pub active: Option<bool>,
}

/// Query parameters for inspection listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectionListQuery {
    pub station_id: Option<i64>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

/// Query parameters for cycle listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycleListQuery {
    pub status: Option<CycleStatus>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationListResponse {
    pub stations: Vec<Station>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionListResponse {
    pub inspections: Vec<Inspection>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleListResponse {
    pub cycles: Vec<FumigationCycle>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyListResponse {
    pub anomalies: Vec<DataAnomaly>,
    pub total: usize,
}
