//! Configuration for the simulator.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline values used when a field is omitted.
//! 2. **Structures:** A `general` section for run control and reporting.
//! 3. **Loading:** Parsing from JSON text or a JSON file.
//!
//! Use `Config::default()` when no file is supplied; command-line flags override file values.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Step budget per run.
    pub const MAX_STEPS: u64 = crate::common::DEFAULT_MAX_STEPS;

    /// Per-step trace printing.
    pub const TRACE_INSTRUCTIONS: bool = true;
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Run control and reporting settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Parses a configuration from JSON text; omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Maximum steps a single `run` may execute before stopping.
    #[serde(default = "GeneralConfig::default_max_steps")]
    pub max_steps: u64,

    /// Print a state line for every executed step.
    #[serde(default = "GeneralConfig::default_trace_instructions")]
    pub trace_instructions: bool,

    /// Print execution statistics after the run.
    #[serde(default)]
    pub print_stats: bool,
}

impl GeneralConfig {
    const fn default_max_steps() -> u64 {
        defaults::MAX_STEPS
    }

    const fn default_trace_instructions() -> bool {
        defaults::TRACE_INSTRUCTIONS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_steps: defaults::MAX_STEPS,
            trace_instructions: defaults::TRACE_INSTRUCTIONS,
            print_stats: false,
        }
    }
}
