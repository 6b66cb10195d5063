//! Opt-in logging for axum services: one line per request at a configurable
//! detail level, plus wrappers that log a method's errors, return values and
//! execution time.

pub mod aspect;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use config::{AppConfig, LogConfig};
use routes::items::ItemCatalog;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub web_log: Arc<LogConfig>,
    pub catalog: Arc<ItemCatalog>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: ItemCatalog) -> Self {
        let web_log = Arc::new(config.web_log().clone());
        Self {
            config: Arc::new(config),
            web_log,
            catalog: Arc::new(catalog),
        }
    }
}
