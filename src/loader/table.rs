//! Route table - declarative collection of mounted routes with collision detection
//!
//! Routes are collected per module and applied onto the axum router only after
//! loading finishes. A module's batch is validated in full before any of it is
//! inserted, so a rejected module leaves nothing behind.

use axum::{http::Method, routing::MethodRouter, Router};
use serde::Serialize;
use thiserror::Error;

use crate::provider::RouteSpec;
use crate::SharedState;

/// Owner recorded for routes the gateway itself serves
pub const GATEWAY_OWNER: &str = "<gateway>";

/// Errors raised when a route cannot be mounted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("{method} {path} is already registered by '{owner}'")]
    Duplicate {
        method: String,
        path: String,
        owner: String,
    },

    #[error("path '{path}' conflicts with '{existing}' registered by '{owner}'")]
    Conflict {
        path: String,
        existing: String,
        owner: String,
    },
}

/// Method and path of a mounted route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteKey {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
}

fn serialize_method<S: serde::Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

/// Public listing entry for a mounted route
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub module: String,
}

struct Entry {
    key: RouteKey,
    owner: String,
    handler: MethodRouter<SharedState>,
}

/// Ordered set of (method, path) registrations
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gateway-owned route; modules can never shadow it
    pub fn reserve(
        &mut self,
        method: Method,
        path: &str,
        handler: MethodRouter<SharedState>,
    ) -> Result<(), MountError> {
        validate_path(path)?;
        let key = RouteKey {
            method,
            path: path.to_string(),
        };
        self.check(&key, &[], GATEWAY_OWNER)?;
        self.entries.push(Entry {
            key,
            owner: GATEWAY_OWNER.to_string(),
            handler,
        });
        Ok(())
    }

    /// Mount every route of one module, or none of them.
    /// The first registration of a method+path wins; later ones are rejected.
    pub fn mount(&mut self, owner: &str, routes: Vec<RouteSpec>) -> Result<Vec<RouteKey>, MountError> {
        let mut batch: Vec<RouteKey> = Vec::with_capacity(routes.len());
        for route in &routes {
            validate_path(&route.path)?;
            let key = RouteKey {
                method: route.method.clone(),
                path: route.path.clone(),
            };
            self.check(&key, &batch, owner)?;
            batch.push(key);
        }

        for (route, key) in routes.into_iter().zip(batch.iter()) {
            self.entries.push(Entry {
                key: key.clone(),
                owner: owner.to_string(),
                handler: route.into_handler(),
            });
        }

        Ok(batch)
    }

    fn check(&self, key: &RouteKey, batch: &[RouteKey], owner: &str) -> Result<(), MountError> {
        let existing = self
            .entries
            .iter()
            .map(|e| (&e.key, e.owner.as_str()))
            .chain(batch.iter().map(|k| (k, owner)));

        for (other, other_owner) in existing {
            if other.path == key.path {
                if other.method == key.method {
                    return Err(MountError::Duplicate {
                        method: key.method.to_string(),
                        path: key.path.clone(),
                        owner: other_owner.to_string(),
                    });
                }
                continue;
            }

            if paths_conflict(&other.path, &key.path) {
                return Err(MountError::Conflict {
                    path: key.path.clone(),
                    existing: other.path.clone(),
                    owner: other_owner.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Whether a method+path is registered (gateway routes included)
    pub fn contains(&self, method: &Method, path: &str) -> bool {
        self.entries
            .iter()
            .any(|e| &e.key.method == method && e.key.path == path)
    }

    /// Number of module routes (gateway routes excluded)
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.owner != GATEWAY_OWNER)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registration in the order it was made
    pub fn endpoints(&self) -> Vec<EndpointInfo> {
        self.entries
            .iter()
            .map(|e| EndpointInfo {
                method: e.key.method.to_string(),
                path: e.key.path.clone(),
                module: e.owner.clone(),
            })
            .collect()
    }

    /// Apply every route onto a fresh router, one merged method router per path
    pub fn into_router(self) -> Router<SharedState> {
        let mut grouped: Vec<(String, Vec<MethodRouter<SharedState>>)> = Vec::new();

        for entry in self.entries {
            match grouped.iter_mut().find(|(path, _)| *path == entry.key.path) {
                Some((_, handlers)) => handlers.push(entry.handler),
                None => grouped.push((entry.key.path, vec![entry.handler])),
            }
        }

        grouped
            .into_iter()
            .fold(Router::new(), |router, (path, handlers)| {
                match handlers.into_iter().reduce(|acc, h| acc.merge(h)) {
                    Some(handler) => router.route(&path, handler),
                    None => router,
                }
            })
    }
}

/// Structural checks that keep the router from rejecting a path at apply time
pub fn validate_path(path: &str) -> Result<(), MountError> {
    let invalid = |reason: &str| MountError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path.contains("//") {
        return Err(invalid("contains an empty segment"));
    }

    let segments: Vec<&str> = path[1..].split('/').collect();
    let last = segments.len().saturating_sub(1);
    for (i, segment) in segments.iter().enumerate() {
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return Err(invalid("parameter without a name"));
            }
            if name.contains([':', '*']) {
                return Err(invalid("malformed parameter"));
            }
        } else if let Some(name) = segment.strip_prefix('*') {
            if name.is_empty() {
                return Err(invalid("wildcard without a name"));
            }
            if i != last {
                return Err(invalid("wildcard must be the last segment"));
            }
            if name.contains([':', '*']) {
                return Err(invalid("malformed wildcard"));
            }
        } else if segment.contains([':', '*']) {
            return Err(invalid("':' and '*' are only allowed at the start of a segment"));
        }
    }

    Ok(())
}

/// Two distinct paths the router cannot hold side by side: parameters with
/// different names at the same position, or a wildcard overlapping another route.
fn paths_conflict(a: &str, b: &str) -> bool {
    for (sa, sb) in a.split('/').zip(b.split('/')) {
        if sa == sb {
            continue;
        }
        if sa.starts_with('*') || sb.starts_with('*') {
            return true;
        }
        return sa.starts_with(':') && sb.starts_with(':');
    }
    false
}
