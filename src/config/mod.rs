//! Configuration management module
//!
//! Handles loading, saving, and validation of the command-line
//! presentation settings. The run budget and seed are fixed in the
//! benchmark engine and are not configurable here.

use crate::{Result, RnBenchError, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod history;

/// How progress is rendered while the benchmark runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStyle {
    /// Progress bar with percentage
    Bar,
    /// "Benchmarking" followed by a row of dots
    Dots,
}

/// Command-line settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Progress rendering
    pub progress_style: ProgressStyle,
    /// Dots renderer prints one dot per reported percentage divisible by this
    pub dot_step: u8,
    /// Run the verification pass before timing
    pub verify: bool,
    /// Append every finished run to the run history
    pub save_results: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            progress_style: ProgressStyle::Dots,
            dot_step: 3,
            verify: false,
            save_results: true,
        }
    }
}

impl BenchmarkConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.dot_step == 0 {
            return Err(RnBenchError::ConfigError(
                "Dot step must be greater than 0".to_string(),
            ));
        }

        if self.dot_step > 100 {
            return Err(RnBenchError::ConfigError(format!(
                "Dot step too large: {} (max: 100)",
                self.dot_step
            )));
        }

        Ok(())
    }

    /// Set the progress style
    pub fn with_progress_style(mut self, style: ProgressStyle) -> Self {
        self.progress_style = style;
        self
    }

    /// Set the dot step
    pub fn with_dot_step(mut self, step: u8) -> Self {
        self.dot_step = step;
        self
    }

    /// Set whether to run the verification pass
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Set whether finished runs go to the history
    pub fn with_save_results(mut self, save: bool) -> Self {
        self.save_results = save;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            RnBenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            RnBenchError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RnBenchError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            RnBenchError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            RnBenchError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/rnbench/rnbench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            RnBenchError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
