use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub web_logging: WebLoggingInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebLoggingInfo {
    pub enabled: bool,
    pub detailing: String,
}

/// Liveness endpoint. Not wrapped by the request logger.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check requested");

    let web_log = state.config.web_log();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        web_logging: WebLoggingInfo {
            enabled: web_log.enabled,
            detailing: web_log.detailing.to_string(),
        },
    })
}
