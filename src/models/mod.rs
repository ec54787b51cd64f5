//! Data models module
//!
//! Contains the workload kinds, kernel result values and the
//! serializable run records.

pub mod result;

// Re-export commonly used types
pub use result::{BenchmarkKind, KernelResult, KindTally, RunRecord, SystemInfo};
