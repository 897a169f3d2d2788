//! Application state for movie service.

use std::sync::Arc;

use common::config::AppConfig;
use crate::connection::GraphHandle;
use crate::service::{MovieService, MovieServiceTrait};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub movies: Arc<dyn MovieServiceTrait>,
}

impl AppState {
    /// Creates the state around an already opened driver handle.
    pub fn new(config: AppConfig, handle: GraphHandle) -> Self {
        Self::with_service(config, Arc::new(MovieService::new(handle)))
    }

    /// Creates the state around any movie service implementation.
    pub fn with_service(config: AppConfig, movies: Arc<dyn MovieServiceTrait>) -> Self {
        Self { config, movies }
    }
}
