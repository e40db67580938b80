//! Concrete repository backends.

pub mod local;

#[cfg(feature = "rest-repo")]
pub mod rest;

pub use local::LocalRepository;

#[cfg(feature = "rest-repo")]
pub use rest::{RestConfig, RestRepository};
