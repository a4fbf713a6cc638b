//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub routes: RoutesConfig,
    pub rate_limit: RateLimitConfig,
    pub maintenance: MaintenanceConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub cors: bool,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

/// Route module discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutesConfig {
    /// Directory scanned for route module descriptors
    #[serde(default = "default_routes_directory")]
    pub directory: PathBuf,
    /// File extensions recognized as route modules (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_routes_directory() -> PathBuf {
    PathBuf::from("src/api")
}

fn default_extensions() -> Vec<String> {
    vec![
        "toml".to_string(),
        "yaml".to_string(),
        "yml".to_string(),
        "json".to_string(),
    ]
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests allowed per client within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_secs() -> u64 {
    15 * 60
}

/// Maintenance mode configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_maintenance_message")]
    pub message: String,
}

fn default_maintenance_message() -> String {
    "Service is under maintenance, please try again later".to_string()
}

/// Public API presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_creator")]
    pub creator: String,
}

fn default_creator() -> String {
    "Hookrest API".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/gateway.yaml")
    }

    /// Load settings from a specific configuration file (YAML or TOML by extension).
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml")
        {
            FileFormat::Yaml
        } else {
            FileFormat::Toml
        };

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.cors", true)?
            .set_default("server.request_timeout_secs", default_request_timeout() as i64)?
            .set_default("routes.directory", "src/api")?
            .set_default("routes.extensions", default_extensions())?
            .set_default("rate_limit.enabled", true)?
            .set_default("rate_limit.max_requests", i64::from(default_max_requests()))?
            .set_default("rate_limit.window_secs", default_window_secs() as i64)?
            .set_default("maintenance.enabled", false)?
            .set_default("maintenance.message", default_maintenance_message())?
            .set_default("api.creator", default_creator())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix("HOOKREST")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("routes.extensions")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        if self.routes.directory.as_os_str().is_empty() {
            return Err(invalid("Route directory cannot be empty"));
        }

        if self.routes.extensions.is_empty() {
            return Err(invalid("At least one route module extension is required"));
        }

        if self
            .routes
            .extensions
            .iter()
            .any(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(invalid(
                "Route module extensions must be non-empty and given without a leading dot",
            ));
        }

        if self.rate_limit.enabled
            && (self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0)
        {
            return Err(invalid(
                "Rate limit requires max_requests and window_secs greater than 0",
            ));
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Config(config::ConfigError::Message(message.to_string()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                cors: true,
                request_timeout_secs: default_request_timeout(),
            },
            routes: RoutesConfig {
                directory: default_routes_directory(),
                extensions: default_extensions(),
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                max_requests: default_max_requests(),
                window_secs: default_window_secs(),
            },
            maintenance: MaintenanceConfig {
                enabled: false,
                message: default_maintenance_message(),
            },
            api: ApiConfig {
                creator: default_creator(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
