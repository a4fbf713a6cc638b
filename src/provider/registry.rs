//! Provider registry - the closed set of route providers module descriptors can name

use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::provider::builtin;
use crate::provider::RouteProvider;

/// Registry for route providers, keyed by provider name
pub struct ProviderRegistry {
    providers: DashMap<String, Arc<dyn RouteProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty provider registry
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Create a registry holding every built-in provider
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for provider in builtin::all() {
            let name = provider.name().to_string();
            registry.providers.insert(name.clone(), provider);
            debug!(provider = %name, "Registered built-in provider");
        }
        registry
    }

    /// Register a provider. Names are unique; the first registration is kept.
    pub fn register(&self, provider: Arc<dyn RouteProvider>) -> Result<()> {
        let name = provider.name().to_string();
        if name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Provider name cannot be empty".to_string(),
            ));
        }
        if self.providers.contains_key(&name) {
            return Err(AppError::DuplicateProvider(name));
        }

        self.providers.insert(name.clone(), provider);
        info!(provider = %name, "Registered route provider");
        Ok(())
    }

    /// Get a provider by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn RouteProvider>> {
        self.providers.get(name).map(|r| r.value().clone())
    }

    /// Sorted provider names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Get the number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Check if a provider exists
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
