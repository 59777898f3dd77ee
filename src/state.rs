//! Shared application state
//!
//! Passed through the axum router. The external collaborators live here as
//! trait objects so tests and alternative providers can swap them out.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::event_sync::EventImporter;
use crate::services::url_shortener::UrlShortener;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub event_importer: Arc<dyn EventImporter>,
    pub url_shortener: Arc<dyn UrlShortener>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        event_importer: Arc<dyn EventImporter>,
        url_shortener: Arc<dyn UrlShortener>,
    ) -> Self {
        Self {
            pool,
            config,
            event_importer,
            url_shortener,
        }
    }
}
