//! Thin data-access services over an injected repository.
//!
//! The HTTP handlers call these instead of the repository traits directly,
//! so operation names land in error context and logs in one place.

use crate::db::repository::{
    CycleFilter, FullRepository, InspectionFilter, RepositoryResult, SnapshotSummary,
    StationFilter,
};
use crate::models::wire::DataAnomaly;
use crate::models::{FumigationCycle, Inspection, Station};

/// Check backend availability.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<()> {
    repo.health_check()
        .await
        .map_err(|e| e.with_operation("health_check"))
}

/// Import a raw snapshot document.
pub async fn import_snapshot(
    repo: &dyn FullRepository,
    raw_json: &str,
) -> RepositoryResult<SnapshotSummary> {
    let summary = repo
        .store_snapshot(raw_json)
        .await
        .map_err(|e| e.with_operation("import_snapshot"))?;

    if summary.unchanged {
        log::debug!("snapshot import skipped, payload unchanged");
    }
    Ok(summary)
}

/// List stations matching a filter.
pub async fn list_stations(
    repo: &dyn FullRepository,
    filter: &StationFilter,
) -> RepositoryResult<Vec<Station>> {
    repo.fetch_stations(filter)
        .await
        .map_err(|e| e.with_operation("list_stations"))
}

/// List inspections matching a filter.
pub async fn list_inspections(
    repo: &dyn FullRepository,
    filter: &InspectionFilter,
) -> RepositoryResult<Vec<Inspection>> {
    repo.fetch_inspections(filter)
        .await
        .map_err(|e| e.with_operation("list_inspections"))
}

/// List fumigation cycles matching a filter.
pub async fn list_cycles(
    repo: &dyn FullRepository,
    filter: &CycleFilter,
) -> RepositoryResult<Vec<FumigationCycle>> {
    repo.fetch_cycles(filter)
        .await
        .map_err(|e| e.with_operation("list_cycles"))
}

/// Data-quality anomalies from the last import.
pub async fn list_anomalies(repo: &dyn FullRepository) -> RepositoryResult<Vec<DataAnomaly>> {
    repo.fetch_anomalies()
        .await
        .map_err(|e| e.with_operation("list_anomalies"))
}
