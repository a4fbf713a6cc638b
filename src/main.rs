//! Main entry point for the Hookrest Gateway

use hookrest_gateway::{
    api,
    config::{LoggingConfig, Settings},
    provider::ProviderRegistry,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    init_tracing(&settings.logging);

    info!("Starting Hookrest Gateway");
    info!(
        "Loaded configuration: server={}:{} routes={}",
        settings.server.host,
        settings.server.port,
        settings.routes.directory.display()
    );

    let providers = Arc::new(ProviderRegistry::with_builtins());
    info!(providers = ?providers.names(), "Registered route providers");

    let addr = settings.bind_address();

    // Build the router; module failures are logged, not fatal
    let (app, report) = api::routes::build_app(settings, providers)?;
    if !report.is_clean() {
        warn!(
            failed = report.failed_count(),
            "Some route modules failed to load"
        );
    }

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
