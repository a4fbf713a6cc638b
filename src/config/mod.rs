//! Configuration module

pub mod settings;

pub use settings::{
    ApiConfig, LoggingConfig, MaintenanceConfig, RateLimitConfig, RoutesConfig, ServerConfig,
    Settings,
};
