//! RNBENCH - Retro Nano Bench
//!
//! A deterministic, time-boxed CPU micro-benchmark. Five small synthetic
//! workloads are picked at random from a fixed-seed generator and executed
//! until the wall-clock budget runs out; the number of completed workloads
//! is the score.

use std::fmt;

pub mod bench;
pub mod cli;
pub mod config;
pub mod models;
pub mod util;

pub use bench::scheduler::{Progress, RunState, Scheduler, PROGRESS_FINISHED};

// Common error types
#[derive(Debug)]
pub enum RnBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Run history could not be read or written
    HistoryError(String),
    /// Benchmark was started without a progress callback
    MissingProgressCallback,
    /// Benchmark execution error
    BenchmarkError(String),
}

impl fmt::Display for RnBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RnBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            RnBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RnBenchError::HistoryError(msg) => write!(f, "Run history error: {}", msg),
            RnBenchError::MissingProgressCallback => {
                write!(f, "Benchmark error: progress function not provided")
            }
            RnBenchError::BenchmarkError(msg) => write!(f, "Benchmark error: {}", msg),
        }
    }
}

impl std::error::Error for RnBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RnBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RnBenchError {
    fn from(err: std::io::Error) -> Self {
        RnBenchError::IoError(err)
    }
}

impl From<serde_json::Error> for RnBenchError {
    fn from(err: serde_json::Error) -> Self {
        RnBenchError::HistoryError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for RnBenchError {
    fn from(err: toml::de::Error) -> Self {
        RnBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for RnBenchError {
    fn from(err: toml::ser::Error) -> Self {
        RnBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for RNBENCH operations
pub type Result<T> = std::result::Result<T, RnBenchError>;

/// Error handling utilities
pub mod error {
    use super::RnBenchError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &RnBenchError) -> String {
        match error {
            RnBenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            RnBenchError::HistoryError(msg) => {
                format!("Run history unavailable: {}. Run with --no-save or remove the file.", msg)
            }
            RnBenchError::MissingProgressCallback => {
                "The benchmark needs a progress handler to run.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "rnbench";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CONFIG_FILE: &str = "rnbench.toml";
pub const HISTORY_FILE: &str = "history.jsonl";
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Run a full benchmark against the monotonic clock.
///
/// Returns the number of workloads executed within the budget, or `0` when
/// `progress` is `None`.
pub fn run<F>(progress: Option<F>) -> u32
where
    F: FnMut(Progress),
{
    Scheduler::new().run(progress)
}
