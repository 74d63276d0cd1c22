//! # Harness Configuration
//!
//! Explicit configuration for the harness execution context. The ambient
//! application identifier the engine reads is carried here and passed into
//! the harness constructor rather than living in mutable global state, so
//! parallel suites against separate engines stay independent.
//!
//! Loading layers defaults, an optional `weft-harness` file (TOML/YAML/JSON,
//! discovered by the `config` crate), and `WEFT_HARNESS_*` environment
//! overrides.

use crate::constants::system;
use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Harness-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Application identifier scoping the execution context the engine
    /// associates with every call this harness makes
    pub app_id: String,

    /// Root directory for test resources; the reset scratch file lives
    /// directly under it
    pub resource_root: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            app_id: system::DEFAULT_APP_ID.to_string(),
            resource_root: PathBuf::from(system::DEFAULT_RESOURCE_ROOT),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from the optional `weft-harness` file and
    /// `WEFT_HARNESS_*` environment variables, falling back to defaults
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("app_id", system::DEFAULT_APP_ID)
            .map_err(|e| HarnessError::configuration(e.to_string()))?
            .set_default("resource_root", system::DEFAULT_RESOURCE_ROOT)
            .map_err(|e| HarnessError::configuration(e.to_string()))?
            .add_source(config::File::with_name("weft-harness").required(false))
            .add_source(config::Environment::with_prefix("WEFT_HARNESS"))
            .build()
            .map_err(|e| HarnessError::configuration(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| HarnessError::configuration(e.to_string()))
    }

    /// Create a configuration rooted at the given resource directory
    pub fn with_resource_root(resource_root: impl Into<PathBuf>) -> Self {
        Self {
            resource_root: resource_root.into(),
            ..Self::default()
        }
    }

    /// Path of the scratch file truncated by every reset
    pub fn scratch_file(&self) -> PathBuf {
        self.resource_root.join(system::SCRATCH_INPUT_FILE)
    }
}
