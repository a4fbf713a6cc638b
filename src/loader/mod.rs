//! Route loader - discovers route modules on disk and mounts their routes
//!
//! The loader runs once at startup, before the listener is bound. Every
//! failure is isolated to the module that caused it: the scan always goes on
//! to the next module and never aborts startup.

pub mod descriptor;
pub mod discovery;
pub mod table;

pub use descriptor::{DescriptorFormat, ModuleDescriptor};
pub use discovery::{discover, DiscoveredModule, Discovery};
pub use table::{EndpointInfo, MountError, RouteKey, RouteTable, GATEWAY_OWNER};

use serde::Serialize;
use std::any::Any;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::provider::{MountContext, ProviderError, ProviderRegistry};

/// Why a single module failed to load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read module: {0}")]
    Read(#[source] io::Error),

    #[error("failed to parse module: {0}")]
    Parse(String),

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("provider '{provider}' failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: ProviderError,
    },

    #[error("provider '{provider}' panicked: {message}")]
    Panicked { provider: String, message: String },

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("failed to list directory: {0}")]
    Unreadable(#[source] io::Error),
}

/// A module whose routes were mounted
#[derive(Debug, Clone, Serialize)]
pub struct LoadedModule {
    pub module: String,
    pub provider: String,
    pub routes: Vec<RouteKey>,
}

/// A module that could not be mounted
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub module: String,
    pub error: String,
}

/// Outcome of one loader run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub directory: PathBuf,
    /// The directory did not exist and was created by this run
    pub created_directory: bool,
    pub loaded: Vec<LoadedModule>,
    /// Modules whose descriptor is disabled
    pub skipped: Vec<String>,
    pub failures: Vec<LoadFailure>,
    /// Set when the scan itself could not run to completion
    pub scan_error: Option<String>,
}

impl LoadReport {
    /// Number of successfully loaded modules
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether the run finished without any failure
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.scan_error.is_none()
    }

    fn fail(&mut self, module: &str, err: &LoadError) {
        warn!(module = %module, error = %err, "Failed to load route module");
        self.failures.push(LoadFailure {
            module: module.to_string(),
            error: err.to_string(),
        });
    }
}

enum Outcome {
    Loaded(LoadedModule),
    Disabled,
}

/// Discovers route modules and mounts them onto a [`RouteTable`]
pub struct RouteLoader {
    settings: Settings,
    providers: Arc<ProviderRegistry>,
}

impl RouteLoader {
    pub fn new(settings: Settings, providers: Arc<ProviderRegistry>) -> Self {
        Self {
            settings,
            providers,
        }
    }

    /// The base directory this loader scans
    pub fn directory(&self) -> &Path {
        &self.settings.routes.directory
    }

    /// Scan the route directory and mount every module that loads cleanly.
    ///
    /// Never fails: problems end up in the returned report and in the log.
    pub fn load(&self, table: &mut RouteTable) -> LoadReport {
        let directory = self.directory().to_path_buf();
        let mut report = LoadReport {
            directory: directory.clone(),
            ..Default::default()
        };

        if !directory.exists() {
            warn!(directory = %directory.display(), "Route directory not found, creating it");
            if let Err(e) = fs::create_dir_all(&directory) {
                error!(directory = %directory.display(), error = %e, "Failed to create route directory");
                report.scan_error = Some(e.to_string());
                return report;
            }
            report.created_directory = true;
        }

        let discovery = match discover(&directory, &self.settings.routes.extensions) {
            Ok(discovery) => discovery,
            Err(e) => {
                error!(directory = %directory.display(), error = %e, "Failed to scan route directory");
                report.scan_error = Some(e.to_string());
                return report;
            }
        };

        for (entry, e) in discovery.unreadable {
            report.fail(&entry, &LoadError::Unreadable(e));
        }

        for module in &discovery.modules {
            match self.load_module(module, table) {
                Ok(Outcome::Loaded(loaded)) => {
                    info!(
                        module = %loaded.module,
                        provider = %loaded.provider,
                        routes = loaded.routes.len(),
                        "Loaded route module"
                    );
                    report.loaded.push(loaded);
                }
                Ok(Outcome::Disabled) => {
                    info!(module = %module.relative, "Skipping disabled route module");
                    report.skipped.push(module.relative.clone());
                }
                Err(e) => report.fail(&module.relative, &e),
            }
        }

        info!(
            loaded = report.loaded_count(),
            failed = report.failed_count(),
            skipped = report.skipped.len(),
            "Route loading complete"
        );

        report
    }

    fn load_module(
        &self,
        module: &DiscoveredModule,
        table: &mut RouteTable,
    ) -> Result<Outcome, LoadError> {
        let descriptor = ModuleDescriptor::from_path(&module.path)?;
        if !descriptor.enabled {
            return Ok(Outcome::Disabled);
        }

        let provider = self
            .providers
            .get(&descriptor.provider)
            .ok_or_else(|| LoadError::UnknownProvider(descriptor.provider.clone()))?;

        let ctx = MountContext::new(&module.relative, &descriptor.options, &self.settings);

        let routes = panic::catch_unwind(AssertUnwindSafe(|| provider.routes(&ctx)))
            .map_err(|payload| LoadError::Panicked {
                provider: descriptor.provider.clone(),
                message: panic_message(payload.as_ref()),
            })?
            .map_err(|source| LoadError::Provider {
                provider: descriptor.provider.clone(),
                source,
            })?;

        let routes = match descriptor.prefix.as_deref() {
            Some(prefix) => routes.into_iter().map(|r| r.with_prefix(prefix)).collect(),
            None => routes,
        };

        let mounted = table.mount(&module.relative, routes)?;

        Ok(Outcome::Loaded(LoadedModule {
            module: module.relative.clone(),
            provider: descriptor.provider,
            routes: mounted,
        }))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
