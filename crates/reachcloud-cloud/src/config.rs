//! Run configuration for reachability sampling.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_sample_count() -> usize {
    1000
}
fn default_link_name() -> String {
    "end_effector".into()
}

// ---------------------------------------------------------------------------
// CloudConfig
// ---------------------------------------------------------------------------

/// Sampling-run configuration.
///
/// Every field has a default matching the tool's classic built-in
/// constants, so an empty TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Number of configurations to draw (default: 1000).
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Link whose global pose is sampled (default: "end_effector").
    #[serde(default = "default_link_name")]
    pub link_name: String,

    /// Seed for the random stream. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Output path for the PCD record. `None` writes to stdout.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            link_name: default_link_name(),
            seed: None,
            output: None,
        }
    }
}

impl CloudConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link_name.is_empty() {
            return Err(ConfigError::EmptyLinkName);
        }
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
