//! HTTP route definitions and application assembly

use crate::api::handlers;
use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::loader::{LoadReport, MountError, RouteLoader, RouteTable};
use crate::middleware::{self, RateLimitState};
use crate::provider::ProviderRegistry;
use crate::{AppState, SharedState};
use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Claim the gateway's own endpoints before any module is loaded
pub fn reserve_gateway_routes(table: &mut RouteTable) -> Result<()> {
    let internal = |e: MountError| AppError::Internal(e.to_string());

    table
        .reserve(Method::GET, "/health", get(handlers::health_check))
        .map_err(internal)?;
    table
        .reserve(Method::GET, "/api/docs", get(handlers::api_docs))
        .map_err(internal)?;
    Ok(())
}

/// Load route modules and assemble the full application router.
///
/// Module failures never fail this call; they are reported in the returned
/// [`LoadReport`].
pub fn build_app(settings: Settings, providers: Arc<ProviderRegistry>) -> Result<(Router, LoadReport)> {
    let mut table = RouteTable::new();
    reserve_gateway_routes(&mut table)?;

    let loader = RouteLoader::new(settings.clone(), providers);
    let report = loader.load(&mut table);

    info!(
        modules = report.loaded_count(),
        routes = table.len(),
        "Route table ready"
    );

    let state = Arc::new(AppState {
        endpoints: table.endpoints(),
        settings,
        load_report: report.clone(),
        started_at: Instant::now(),
    });

    Ok((create_router(state, table), report))
}

/// Create the main application router from a populated route table
pub fn create_router(state: SharedState, table: RouteTable) -> Router {
    let settings = &state.settings;

    let mut router: Router<SharedState> = table.into_router().fallback(handlers::not_found);

    if settings.rate_limit.enabled {
        let limiter = Arc::new(RateLimitState::from_config(&settings.rate_limit));
        RateLimitState::spawn_cleanup(
            &limiter,
            Duration::from_secs(settings.rate_limit.window_secs),
        );
        router = router.layer(axum::middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit,
        ));
    }

    if settings.maintenance.enabled {
        router = router.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::maintenance,
        ));
    }

    let timeout = Duration::from_secs(settings.server.request_timeout_secs);
    let cors = settings.server.cors;

    let router = router
        .with_state(state)
        .layer(TimeoutLayer::new(timeout));

    let router = if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}
