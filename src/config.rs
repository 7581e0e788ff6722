//! Configuration for the graph store and its tooling
//!
//! Values come from defaults, then an optional YAML file, then environment
//! variables:
//!
//! | Variable                  | Field                  |
//! |---------------------------|------------------------|
//! | `SANTOK_LOG_LEVEL`        | `log_level`            |
//! | `SANTOK_DUPLICATE_NODES`  | `graph.duplicate_nodes`|
//! | `SANTOK_EDGE_VALIDATION`  | `graph.edge_validation`|
//! | `SANTOK_SNAPSHOT_FORMAT`  | `snapshot_format`      |

use crate::persistence::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What `add_node` does when the id is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNodePolicy {
    /// Replace the stored node (last write wins)
    #[default]
    Overwrite,
    /// Fail with `NodeAlreadyExists`
    Reject,
    /// Take label and type from the new node and merge attributes
    Merge,
}

/// How `add_edge` treats endpoints that are not stored nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeValidation {
    /// Fail with `UnknownNode`
    #[default]
    Strict,
    /// Store the dangling edge and log a warning
    Permissive,
}

/// Graph store policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub duplicate_nodes: DuplicateNodePolicy,

    #[serde(default)]
    pub edge_validation: EdgeValidation,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub graph: GraphConfig,

    /// Format used for snapshots whose extension does not name one
    #[serde(default)]
    pub snapshot_format: SnapshotFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            graph: GraphConfig::default(),
            snapshot_format: SnapshotFormat::default(),
        }
    }
}

impl Config {
    /// Parse configuration from YAML; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `SANTOK_*` overrides looked up through `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(level) = lookup("SANTOK_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(value) = lookup("SANTOK_DUPLICATE_NODES") {
            self.graph.duplicate_nodes = parse_override("SANTOK_DUPLICATE_NODES", &value)?;
        }
        if let Some(value) = lookup("SANTOK_EDGE_VALIDATION") {
            self.graph.edge_validation = parse_override("SANTOK_EDGE_VALIDATION", &value)?;
        }
        if let Some(value) = lookup("SANTOK_SNAPSHOT_FORMAT") {
            self.snapshot_format = parse_override("SANTOK_SNAPSHOT_FORMAT", &value)?;
        }
        Ok(self)
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| {
        warn!("Invalid {} value: {}", key, value);
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    })
}

impl FromStr for DuplicateNodePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(DuplicateNodePolicy::Overwrite),
            "reject" => Ok(DuplicateNodePolicy::Reject),
            "merge" => Ok(DuplicateNodePolicy::Merge),
            _ => Err(ConfigError::InvalidValue {
                key: "duplicate_nodes".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for EdgeValidation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(EdgeValidation::Strict),
            "permissive" => Ok(EdgeValidation::Permissive),
            _ => Err(ConfigError::InvalidValue {
                key: "edge_validation".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DuplicateNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DuplicateNodePolicy::Overwrite => "overwrite",
            DuplicateNodePolicy::Reject => "reject",
            DuplicateNodePolicy::Merge => "merge",
        })
    }
}

impl fmt::Display for EdgeValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgeValidation::Strict => "strict",
            EdgeValidation::Permissive => "permissive",
        })
    }
}
