//! Utility functions module
//!
//! Contains helpers for formatting durations, rates and scores.

pub mod units;

// Re-export commonly used functions
pub use units::{format_duration, format_rate, iterations_per_second};
