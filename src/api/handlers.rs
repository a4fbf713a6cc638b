//! HTTP request handlers for the gateway's own endpoints

use crate::api::models::{DocsResponse, EndpointEntry, ErrorResponse, HealthResponse};
use crate::SharedState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};

/// Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs_f64(),
        routes: state.load_report.loaded_count(),
        failed: state.load_report.failed_count(),
        maintenance: state.settings.maintenance.enabled,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// List every mounted endpoint with the module that owns it
pub async fn api_docs(State(state): State<SharedState>) -> Json<DocsResponse> {
    Json(DocsResponse {
        status: "success".to_string(),
        message: format!("{} Documentation", state.settings.api.creator),
        version: env!("CARGO_PKG_VERSION").to_string(),
        creator: state.settings.api.creator.clone(),
        endpoints: state
            .endpoints
            .iter()
            .cloned()
            .map(EndpointEntry::from)
            .collect(),
    })
}

/// Fallback for unmatched requests
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            status: "error".to_string(),
            success: false,
            message: "Endpoint not found".to_string(),
        }),
    )
}
