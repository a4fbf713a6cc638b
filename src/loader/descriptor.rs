//! Route module descriptors
//!
//! A module file names the provider that supplies its routes, plus options:
//!
//! ```toml
//! provider = "static_json"
//! prefix = "/api"
//!
//! [options]
//! path = "/info"
//! body = { name = "hookrest" }
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::loader::LoadError;

/// Parsed module descriptor
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    pub provider: String,
    /// Prepended to every route path the provider returns
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub options: Value,
}

fn default_true() -> bool {
    true
}

/// Serialization format of a descriptor file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Toml,
    Yaml,
    Json,
}

impl DescriptorFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(DescriptorFormat::Toml),
            "yaml" | "yml" => Some(DescriptorFormat::Yaml),
            "json" => Some(DescriptorFormat::Json),
            _ => None,
        }
    }
}

impl ModuleDescriptor {
    /// Read and parse a descriptor file
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let format = DescriptorFormat::from_path(path).ok_or_else(|| {
            LoadError::Parse(format!(
                "unsupported descriptor format '{}'",
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ))
        })?;

        let content = fs::read_to_string(path).map_err(LoadError::Read)?;
        Self::parse(&content, format)
    }

    /// Parse descriptor text in the given format
    pub fn parse(content: &str, format: DescriptorFormat) -> Result<Self, LoadError> {
        let descriptor: ModuleDescriptor = match format {
            DescriptorFormat::Toml => {
                toml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))?
            }
            DescriptorFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))?
            }
            DescriptorFormat::Json => {
                serde_json::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))?
            }
        };

        if descriptor.provider.trim().is_empty() {
            return Err(LoadError::Parse("provider cannot be empty".to_string()));
        }

        Ok(descriptor)
    }
}
