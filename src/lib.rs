//! Hookrest Gateway
//!
//! An HTTP API gateway whose endpoints are contributed by route modules.
//! At startup the route directory is scanned for module descriptors; each one
//! names a registered route provider whose routes are then mounted. A module
//! that fails to load is logged and skipped, never taking the server down.

pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod middleware;
pub mod provider;
pub mod response;

pub use error::{AppError, Result};

use std::sync::Arc;
use std::time::Instant;

use loader::{EndpointInfo, LoadReport};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: config::Settings,
    /// Outcome of the startup module scan
    pub load_report: LoadReport,
    /// Every mounted endpoint, in registration order
    pub endpoints: Vec<EndpointInfo>,
    pub started_at: Instant,
}

/// State handle passed to every handler
pub type SharedState = Arc<AppState>;
