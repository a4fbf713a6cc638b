//! Dry-run the route loader and report what would be mounted

use clap::Parser;
use hookrest_gateway::{
    api::routes::reserve_gateway_routes,
    config::Settings,
    loader::{LoadReport, RouteLoader, RouteTable},
    provider::ProviderRegistry,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hookrest-scan")]
#[command(about = "Scan a route directory and report which modules load", long_about = None)]
struct Cli {
    /// Route directory to scan (overrides configuration)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = "config/gateway.yaml")]
    config: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::load_from_path(&cli.config)?;
    if let Some(dir) = cli.dir {
        settings.routes.directory = dir;
    }

    let mut table = RouteTable::new();
    reserve_gateway_routes(&mut table)?;

    let loader = RouteLoader::new(settings, Arc::new(ProviderRegistry::with_builtins()));
    let report = loader.load(&mut table);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &LoadReport) {
    println!("Route directory: {}", report.directory.display());
    if report.created_directory {
        println!("  (created)");
    }
    if let Some(err) = &report.scan_error {
        println!("Scan failed: {}", err);
        return;
    }

    println!("Loaded {} module(s):", report.loaded_count());
    for module in &report.loaded {
        println!("  {} [{}]", module.module, module.provider);
        for route in &module.routes {
            println!("    {} {}", route.method, route.path);
        }
    }

    if !report.skipped.is_empty() {
        println!("Skipped {} disabled module(s):", report.skipped.len());
        for module in &report.skipped {
            println!("  {}", module);
        }
    }

    if report.failed_count() > 0 {
        println!("Failed {} module(s):", report.failed_count());
        for failure in &report.failures {
            println!("  {}: {}", failure.module, failure.error);
        }
    }
}
