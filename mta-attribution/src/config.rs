//! Configuration for attribution runs
//!
//! Stored as TOML. Every section is optional and falls back to its defaults:
//!
//! ```toml
//! parallel_touchpoints = true
//!
//! [engine]
//! max_touchpoints = 20
//! parallel = true
//! parallel_threshold = 12
//!
//! [sampling]
//! permutations = 5000
//! seed = 42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use mta_shapley::{EngineConfig, SamplingConfig};

use crate::error::{AttributionError, Result};

/// Configuration for an [`Attributor`](crate::Attributor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Compute touchpoints of a batch in parallel (default: true)
    #[serde(default = "default_parallel_touchpoints")]
    pub parallel_touchpoints: bool,
    /// Exact Shapley engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Sampled Shapley settings
    #[serde(default)]
    pub sampling: SamplingConfig,
}

fn default_parallel_touchpoints() -> bool {
    true
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            parallel_touchpoints: default_parallel_touchpoints(),
            engine: EngineConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl AttributionConfig {
    /// Load configuration from a TOML file
    ///
    /// Returns the default configuration if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AttributionError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AttributionError::Config(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
