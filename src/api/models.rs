//! Response models for the gateway's own endpoints

use serde::{Deserialize, Serialize};

use crate::loader::EndpointInfo;

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving
    pub status: String,
    pub version: String,
    pub uptime_secs: f64,
    /// Number of route modules loaded at startup
    pub routes: usize,
    /// Number of route modules that failed to load
    pub failed: usize,
    pub maintenance: bool,
    pub timestamp: String,
}

/// Endpoint listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub creator: String,
    pub endpoints: Vec<EndpointEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointEntry {
    pub method: String,
    pub path: String,
    pub module: String,
}

impl From<EndpointInfo> for EndpointEntry {
    fn from(info: EndpointInfo) -> Self {
        Self {
            method: info.method,
            path: info.path,
            module: info.module,
        }
    }
}

/// Generic error body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub success: bool,
    pub message: String,
}
