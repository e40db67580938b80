//! REST repository backed by the collaborator's pest-control API.
//!
//! Fetches raw records per request and normalizes them at the boundary, so
//! the engine sees the same shapes regardless of backend. Anomalies found
//! during normalization are logged, not persisted; the collaborator owns the
//! data and re-serves it on every call.

use async_trait::async_trait;
use chrono::Datelike;
use serde::Deserialize;
use std::time::Duration;

use crate::api::CycleId;
use crate::db::repository::{
    CycleFilter, ErrorContext, InspectionFilter, OpsRepository, RepositoryError, RepositoryResult,
    RoomFilter, SnapshotStore, SnapshotSummary, StationFilter,
};
use crate::models::wire::{
    normalize_cycles, normalize_inspections, normalize_rooms, normalize_stations, DataAnomaly,
    RawCycle, RawInspection, RawRoomFumigation, RawStation,
};
use crate::models::{FumigationCycle, Inspection, RoomFumigation, Station};

/// Connection settings for the collaborator API.
#[derive(Debug, Clone, Deserialize)]
pub struct RestConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token, when the deployment requires one.
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Read-only repository over the collaborator REST API.
pub struct RestRepository {
    client: reqwest::Client,
    config: RestConfig,
}

impl RestRepository {
    pub fn new(config: RestConfig) -> RepositoryResult<Self> {
        if config.base_url.is_empty() {
            return Err(RepositoryError::configuration(
                "rest repository requires 'rest.base_url'",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::configuration(format!("http client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        operation: &str,
    ) -> RepositoryResult<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(RepositoryError::from)?
            .error_for_status()
            .map_err(|e| RepositoryError::from(e).with_operation(operation))?;

        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(operation))
    }

    fn log_anomalies(anomalies: &[DataAnomaly]) {
        for anomaly in anomalies {
            log::warn!(
                "data anomaly: {} {} field {}: {}",
                anomaly.entity,
                anomaly.entity_id,
                anomaly.field,
                anomaly.message
            );
        }
    }
}

#[async_trait]
impl OpsRepository for RestRepository {
    async fn fetch_stations(&self, filter: &StationFilter) -> RepositoryResult<Vec<Station>> {
        let raw: Vec<RawStation> = self.get_json("stations", "fetch_stations").await?;
        let mut anomalies = Vec::new();
        let stations = normalize_stations(raw, &mut anomalies);
        Self::log_anomalies(&anomalies);

        Ok(stations
            .into_iter()
            .filter(|s| {
                filter.kind.is_none_or(|k| s.kind == k)
                    && filter.active.is_none_or(|a| s.active == a)
            })
            .collect())
    }

    async fn fetch_inspections(
        &self,
        filter: &InspectionFilter,
    ) -> RepositoryResult<Vec<Inspection>> {
        let path = match filter.station_id {
            Some(id) => format!("stations/{}/inspections", id),
            None => "inspections".to_string(),
        };
        let raw: Vec<RawInspection> = self.get_json(&path, "fetch_inspections").await?;
        let mut anomalies = Vec::new();
        let inspections = normalize_inspections(raw, &mut anomalies);
        Self::log_anomalies(&anomalies);

        let mut inspections: Vec<Inspection> = inspections
            .into_iter()
            .filter(|i| {
                filter.since.is_none_or(|since| i.timestamp >= since)
                    && filter.until.is_none_or(|until| i.timestamp <= until)
            })
            .collect();
        if let Some(limit) = filter.limit {
            inspections.truncate(limit);
        }
        Ok(inspections)
    }

    async fn fetch_cycles(&self, filter: &CycleFilter) -> RepositoryResult<Vec<FumigationCycle>> {
        let raw: Vec<RawCycle> = self.get_json("fumigation/cycles", "fetch_cycles").await?;
        let mut anomalies = Vec::new();
        let cycles = normalize_cycles(raw, &mut anomalies);
        Self::log_anomalies(&anomalies);

        Ok(cycles
            .into_iter()
            .filter(|c| {
                filter.status.is_none_or(|s| c.status == s)
                    && filter.year.is_none_or(|y| c.period_start.year() == y)
            })
            .collect())
    }

    async fn fetch_cycle(&self, id: CycleId) -> RepositoryResult<FumigationCycle> {
        let raw: RawCycle = self
            .get_json(&format!("fumigation/cycles/{}", id), "fetch_cycle")
            .await?;
        let mut anomalies = Vec::new();
        let mut cycles = normalize_cycles(vec![raw], &mut anomalies);
        Self::log_anomalies(&anomalies);

        cycles.pop().ok_or_else(|| {
            RepositoryError::validation_with_context(
                format!("cycle {} failed normalization", id),
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
        let raw: Vec<RawRoomFumigation> = self
            .get_json(&format!("fumigation/cycles/{}/rooms", id), "fetch_cycle_rooms")
            .await?;
        let mut anomalies = Vec::new();
        let rooms = normalize_rooms(raw, &mut anomalies);
        Self::log_anomalies(&anomalies);

        Ok(rooms
            .into_iter()
            .filter(|r| {
                r.cycle_id == id
                    && filter.status.is_none_or(|s| r.status == s)
                    && filter
                        .area
                        .as_deref()
                        .is_none_or(|area| r.area.as_deref() == Some(area))
            })
            .collect())
    }

    async fn fetch_anomalies(&self) -> RepositoryResult<Vec<DataAnomaly>> {
        // Anomalies are computed per fetch and logged; nothing is retained.
        Ok(Vec::new())
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        self.get_json::<serde_json::Value>("health", "health_check")
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl SnapshotStore for RestRepository {
    async fn store_snapshot(&self, _raw_json: &str) -> RepositoryResult<SnapshotSummary> {
        Err(RepositoryError::configuration(
            "rest repository is read-only; snapshot import requires the local backend",
        ))
    }
}
