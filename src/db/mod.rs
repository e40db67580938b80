//! Data access layer.
//!
//! Built around the repository pattern: [`repository`] defines the traits
//! and error types, [`repositories`] holds the backends, [`factory`] and
//! [`repo_config`] pick one at startup. There is no global repository
//! instance; callers receive theirs by injection and hand it down to the
//! report services.

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    CycleFilter, ErrorContext, FullRepository, InspectionFilter, OpsRepository, RepositoryError,
    RepositoryResult, RoomFilter, SnapshotStore, SnapshotSummary, StationFilter,
};

#[cfg(feature = "rest-repo")]
pub use repositories::{RestConfig, RestRepository};
