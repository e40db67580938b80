//! Shared application state for HTTP handlers.

use std::sync::Arc;

use crate::db::FullRepository;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self { repository }
    }
}
