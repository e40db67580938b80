//! HTTP serving layer (feature `http-server`).
//!
//! A read-only reporting API over the aggregation engine plus a snapshot
//! import endpoint. Handlers hold no logic of their own; they parse query
//! parameters, pin `now`, and delegate to the report services.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
