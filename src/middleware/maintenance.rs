//! Maintenance mode gate

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::SharedState;

/// Paths still served while maintenance mode is on
const EXEMPT_PATHS: &[&str] = &["/health"];

/// Middleware answering 503 for everything but the health check while
/// maintenance mode is enabled
pub async fn maintenance(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let config = &state.settings.maintenance;
    if !config.enabled || EXEMPT_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "status": "maintenance",
            "success": false,
            "creator": state.settings.api.creator,
            "message": config.message,
        })),
    )
        .into_response()
}
