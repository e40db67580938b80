//! # Hotel Operations Analytics Backend
//!
//! Analytics engine for hotel pest-control operations: rodent-bait and UV-trap
//! station inspections, room-fumigation cycles, and the executive reports built
//! on top of them. The engine is a set of pure, deterministic reducers that
//! turn flat record arrays (stations, inspections, cycles, room records) into
//! ranked summaries, staleness alerts, velocity projections, and data-quality
//! flags. A thin axum REST layer exposes the computed reports.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: ID newtypes and the DTO types produced by the engine
//! - [`models`]: Domain entities and the wire-format normalization adapter
//! - [`services`]: The aggregation pipeline stages and report assemblers
//! - [`db`]: Repository pattern over the operations data (in-memory or REST)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Purity
//!
//! Every pipeline stage in [`services`] is a stateless function over slices
//! already resident in memory. Data fetching happens-before the engine runs;
//! recomputation with the same inputs always yields the same outputs, which is
//! what makes the reports trivially testable.

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
