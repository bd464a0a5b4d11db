//! Configuration types and parsing for plotdim.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main configuration from plotdim.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Metadata slice limits
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Per index type keying policy. Index types not listed here are keyed by
    /// label and carry no alias.
    #[serde(default = "default_index_types")]
    pub index_types: HashMap<String, IndexPolicy>,
}

/// Data API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token
    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Metadata slice limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataConfig {
    /// Largest number of distinct non-null values a metadata slice may have
    #[serde(default = "default_max_distinct_values")]
    pub max_distinct_values: usize,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            max_distinct_values: default_max_distinct_values(),
        }
    }
}

/// Whether index entries are identified by id or by display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexKeying {
    /// Display labels (default)
    #[default]
    Label,
    /// Internal ids, for types whose labels are not unique
    Id,
}

/// Keying policy of one index type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IndexPolicy {
    #[serde(default)]
    pub keying: IndexKeying,

    /// Label of the id-to-display-label alias emitted for id-keyed indexes
    #[serde(default)]
    pub alias_label: Option<String>,
}

/// Index type keyed by model id in the default configuration
pub const DEPMAP_MODEL: &str = "depmap_model";

/// Alias label emitted for `depmap_model` indexes
pub const CELL_LINE_NAME: &str = "Cell Line Name";

const DEFAULT_MAX_DISTINCT_VALUES: usize = 100;

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_max_distinct_values() -> usize {
    DEFAULT_MAX_DISTINCT_VALUES
}

fn default_index_types() -> HashMap<String, IndexPolicy> {
    let mut types = HashMap::new();
    types.insert(
        DEPMAP_MODEL.to_string(),
        IndexPolicy {
            keying: IndexKeying::Id,
            alias_label: Some(CELL_LINE_NAME.to_string()),
        },
    );
    types
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            metadata: MetadataConfig::default(),
            index_types: default_index_types(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for plotdim.yml or plotdim.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("plotdim.yml");
        let yaml_path = dir.join("plotdim.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "api.base_url cannot be empty".to_string(),
            });
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "api.base_url must be an http(s) URL, found '{}'",
                    self.api.base_url
                ),
            });
        }

        if self.metadata.max_distinct_values == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "metadata.max_distinct_values must be at least 1".to_string(),
            });
        }

        for (name, policy) in &self.index_types {
            if policy.alias_label.is_some() && policy.keying == IndexKeying::Label {
                log::warn!(
                    "index type '{}' is keyed by label; its alias_label is ignored",
                    name
                );
            }
        }

        Ok(())
    }

    /// Keying policy for an index type
    pub fn index_policy(&self, index_type: &str) -> IndexPolicy {
        self.index_types
            .get(index_type)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
