//! Fixed JSON endpoints described entirely by module options

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::provider::{parse_method, MountContext, ProviderError, RouteProvider, RouteSpec};
use crate::response::envelope;
use crate::SharedState;

/// Serves configured JSON bodies wrapped in the response envelope
pub struct StaticJsonProvider;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StaticJsonOptions {
    Many { endpoints: Vec<StaticEndpoint> },
    One(StaticEndpoint),
}

#[derive(Debug, Clone, Deserialize)]
struct StaticEndpoint {
    #[serde(default = "default_method")]
    method: String,
    path: String,
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    body: Value,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status() -> u16 {
    200
}

impl RouteProvider for StaticJsonProvider {
    fn name(&self) -> &str {
        "static_json"
    }

    fn description(&self) -> &str {
        "Fixed JSON documents"
    }

    fn routes(&self, ctx: &MountContext<'_>) -> Result<Vec<RouteSpec>, ProviderError> {
        let endpoints = match ctx.options::<StaticJsonOptions>()? {
            StaticJsonOptions::Many { endpoints } => endpoints,
            StaticJsonOptions::One(endpoint) => vec![endpoint],
        };

        if endpoints.is_empty() {
            return Err(ProviderError::InvalidOptions(
                "at least one endpoint is required".to_string(),
            ));
        }

        endpoints.into_iter().map(build_route).collect()
    }
}

fn build_route(endpoint: StaticEndpoint) -> Result<RouteSpec, ProviderError> {
    let method = parse_method(&endpoint.method)?;
    let status = StatusCode::from_u16(endpoint.status).map_err(|_| {
        ProviderError::InvalidOptions(format!("invalid status code {}", endpoint.status))
    })?;
    let body = Arc::new(endpoint.body);

    let handler = move |State(state): State<SharedState>| {
        let body = body.clone();
        async move {
            let payload = envelope(&state.settings.api.creator, body.as_ref().clone());
            (status, Json(payload))
        }
    };

    RouteSpec::new(method, endpoint.path, handler)
}
