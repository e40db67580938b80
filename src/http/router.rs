//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Snapshot import
        .route("/snapshot", post(handlers::import_snapshot))
        // Station reporting
        .route("/stations", get(handlers::list_stations))
        .route("/stations/report", get(handlers::station_report))
        .route("/stations/{station_id}/detail", get(handlers::station_detail))
        .route("/inspections", get(handlers::list_inspections))
        // Fumigation cycles
        .route("/cycles", get(handlers::list_cycles))
        .route("/cycles/{cycle_id}/report", get(handlers::cycle_report))
        // Data quality
        .route("/anomalies", get(handlers::list_anomalies));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", api_v1)
        // Full-property snapshots can be large.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
