//! Benchmark engine module
//!
//! Contains the deterministic generator, the workload kernels, the
//! time-budgeted scheduler and the verification pass.

pub mod clock;
pub mod kernels;
pub mod rng;
pub mod scheduler;
pub mod verify;

/// Fixed seed so every run executes the same kernel sequence on the same inputs
pub const BENCH_RND_SEED: i32 = 2137;

/// Wall-clock budget of one run, in seconds
pub const RUN_DURATION_SECS: f64 = 30.0;

// Re-export commonly used types
pub use clock::{Clock, MonotonicClock};
pub use kernels::{run_kernel, Scratch};
pub use rng::BenchRng;
pub use scheduler::{Progress, RunState, Scheduler, PROGRESS_FINISHED};
