//! HTTP handlers for the reporting API.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;

use super::dto::{
    AnomalyListResponse, CycleListQuery, CycleListResponse, DetailQuery, HealthResponse,
    ImportSnapshotRequest, InspectionListQuery, InspectionListResponse, ReportQuery,
    StationListQuery, StationListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{CycleId, StationId};
use crate::db::repository::{CycleFilter, InspectionFilter, SnapshotSummary, StationFilter};
use crate::db::services;
use crate::services::cycle_report::{get_cycle_report, CycleReport};
use crate::services::station_report::{
    get_station_detail, get_station_ops_report, StationDetail, StationOpsReport,
};

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    services::health_check(state.repository.as_ref()).await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// POST /v1/snapshot
pub async fn import_snapshot(
    State(state): State<AppState>,
    Json(request): Json<ImportSnapshotRequest>,
) -> Result<Json<SnapshotSummary>, AppError> {
    let raw = serde_json::to_string(&request.snapshot)
        .map_err(|e| AppError::BadRequest(format!("unserializable snapshot: {}", e)))?;

    let summary = services::import_snapshot(state.repository.as_ref(), &raw).await?;
    Ok(Json(summary))
}

/// GET /v1/stations
pub async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationListQuery>,
) -> Result<Json<StationListResponse>, AppError> {
    let filter = StationFilter {
        kind: query.kind,
        active: query.active,
    };
    let stations = services::list_stations(state.repository.as_ref(), &filter).await?;
    let total = stations.len();
    Ok(Json(StationListResponse { stations, total }))
}

/// GET /v1/inspections
pub async fn list_inspections(
    State(state): State<AppState>,
    Query(query): Query<InspectionListQuery>,
) -> Result<Json<InspectionListResponse>, AppError> {
    let filter = InspectionFilter {
        station_id: query.station_id.map(StationId::new),
        since: query.since,
        until: query.until,
        limit: query.limit,
    };
    let inspections = services::list_inspections(state.repository.as_ref(), &filter).await?;
    let total = inspections.len();
    Ok(Json(InspectionListResponse { inspections, total }))
}

/// GET /v1/stations/report
pub async fn station_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<StationOpsReport>, AppError> {
    let now = query.as_of.unwrap_or_else(Utc::now);
    let report = get_station_ops_report(state.repository.as_ref(), now, query.limit).await?;
    Ok(Json(report))
}

/// GET /v1/stations/{station_id}/detail
pub async fn station_detail(
    State(state): State<AppState>,
    Path(station_id): Path<i64>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<StationDetail>, AppError> {
    let now = query.as_of.unwrap_or_else(Utc::now);
    let detail =
        get_station_detail(state.repository.as_ref(), StationId::new(station_id), now).await?;
    Ok(Json(detail))
}

/// GET /v1/cycles
pub async fn list_cycles(
    State(state): State<AppState>,
    Query(query): Query<CycleListQuery>,
) -> Result<Json<CycleListResponse>, AppError> {
    let filter = CycleFilter {
        status: query.status,
        year: query.year,
    };
    let cycles = services::list_cycles(state.repository.as_ref(), &filter).await?;
    let total = cycles.len();
    Ok(Json(CycleListResponse { cycles, total }))
}

/// GET /v1/cycles/{cycle_id}/report
pub async fn cycle_report(
    State(state): State<AppState>,
    Path(cycle_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<CycleReport>, AppError> {
    let now = query.as_of.unwrap_or_else(Utc::now);
    let report = get_cycle_report(
        state.repository.as_ref(),
        CycleId::new(cycle_id),
        now,
        query.limit,
    )
    .await?;
    Ok(Json(report))
}

/// GET /v1/anomalies
pub async fn list_anomalies(
    State(state): State<AppState>,
) -> Result<Json<AnomalyListResponse>, AppError> {
    let anomalies = services::list_anomalies(state.repository.as_ref()).await?;
    let total = anomalies.len();
    Ok(Json(AnomalyListResponse { anomalies, total }))
}
