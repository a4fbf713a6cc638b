//! Route providers - the units that contribute endpoints to the gateway
//!
//! A provider never touches the router directly. It returns a declarative
//! list of [`RouteSpec`]s which the loader validates and mounts as a whole.

pub mod builtin;
pub mod registry;

pub use registry::ProviderRegistry;

use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodFilter, MethodRouter},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::config::Settings;
use crate::SharedState;

/// Errors a provider can report while producing its routes
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),

    #[error("{0}")]
    Failed(String),
}

impl ProviderError {
    /// Shorthand for a free-form provider failure
    pub fn failed(message: impl Into<String>) -> Self {
        ProviderError::Failed(message.into())
    }
}

/// Capability contract for anything that contributes routes
pub trait RouteProvider: Send + Sync {
    /// Name referenced by module descriptors
    fn name(&self) -> &str;

    /// One-line human readable description
    fn description(&self) -> &str {
        ""
    }

    /// Produce the routes for one module. Called exactly once per module.
    fn routes(&self, ctx: &MountContext<'_>) -> Result<Vec<RouteSpec>, ProviderError>;
}

/// Everything a provider is told about the module it is mounting
#[derive(Debug, Clone, Copy)]
pub struct MountContext<'a> {
    /// Module path relative to the route directory, e.g. `sub/c.toml`
    pub module: &'a str,
    pub options: &'a Value,
    pub settings: &'a Settings,
}

impl<'a> MountContext<'a> {
    pub fn new(module: &'a str, options: &'a Value, settings: &'a Settings) -> Self {
        Self {
            module,
            options,
            settings,
        }
    }

    /// Deserialize the module options into a typed structure.
    /// Absent options deserialize as an empty table.
    pub fn options<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        let value = match self.options {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };

        serde_json::from_value(value).map_err(|e| ProviderError::InvalidOptions(e.to_string()))
    }
}

/// A single (method, path, handler) registration
pub struct RouteSpec {
    pub method: Method,
    pub path: String,
    handler: MethodRouter<SharedState>,
}

impl RouteSpec {
    /// Build a route for an arbitrary method
    pub fn new<H, T>(method: Method, path: impl Into<String>, handler: H) -> Result<Self, ProviderError>
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        let filter = method_filter(&method)?;
        Ok(Self {
            method,
            path: path.into(),
            handler: routing::on(filter, handler),
        })
    }

    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path: path.into(),
            handler: routing::get(handler),
        }
    }

    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        Self {
            method: Method::POST,
            path: path.into(),
            handler: routing::post(handler),
        }
    }

    /// Prepend a module-level prefix to the path
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return self;
        }

        self.path = if self.path == "/" {
            prefix.to_string()
        } else if self.path.starts_with('/') {
            format!("{}{}", prefix, self.path)
        } else {
            format!("{}/{}", prefix, self.path)
        };
        self
    }

    pub(crate) fn into_handler(self) -> MethodRouter<SharedState> {
        self.handler
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Parse a method name as written in module options
pub fn parse_method(name: &str) -> Result<Method, ProviderError> {
    let method = Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| ProviderError::UnsupportedMethod(name.to_string()))?;
    method_filter(&method)?;
    Ok(method)
}

fn method_filter(method: &Method) -> Result<MethodFilter, ProviderError> {
    let filter = match *method {
        Method::GET => MethodFilter::GET,
        Method::POST => MethodFilter::POST,
        Method::PUT => MethodFilter::PUT,
        Method::PATCH => MethodFilter::PATCH,
        Method::DELETE => MethodFilter::DELETE,
        Method::HEAD => MethodFilter::HEAD,
        Method::OPTIONS => MethodFilter::OPTIONS,
        Method::TRACE => MethodFilter::TRACE,
        _ => return Err(ProviderError::UnsupportedMethod(method.to_string())),
    };
    Ok(filter)
}
