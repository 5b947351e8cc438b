//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::ReferenceCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for data access
    pub repository: Arc<dyn FullRepository>,
    /// Cached reference data for the day timeline
    pub reference_cache: Arc<ReferenceCache>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            reference_cache: Arc::new(ReferenceCache::new()),
        }
    }

    /// Create a state with a preconfigured reference cache.
    pub fn with_cache(repository: Arc<dyn FullRepository>, cache: Arc<ReferenceCache>) -> Self {
        Self {
            repository,
            reference_cache: cache,
        }
    }
}
