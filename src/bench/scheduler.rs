//! Time-budgeted benchmark scheduler
//!
//! Seeds the generator, then keeps dispatching randomly chosen kernels until
//! the wall-clock budget is spent, reporting whole-percent progress to the
//! caller's callback along the way.

use crate::bench::clock::{Clock, MonotonicClock};
use crate::bench::kernels::{run_kernel, Scratch};
use crate::bench::rng::BenchRng;
use crate::bench::{BENCH_RND_SEED, RUN_DURATION_SECS};
use crate::models::{BenchmarkKind, KernelResult};
use crate::{Result, RnBenchError};
use tracing::{error, info, warn};

/// Raw progress value signalling that the run has finished
pub const PROGRESS_FINISHED: i32 = 999;

/// Progress notification passed to the run callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Share of the time budget spent, `0..=100`
    Percent(u8),
    /// The run is over; always the last notification
    Finished,
}

impl Progress {
    /// Integer form: the percentage, or [`PROGRESS_FINISHED`]
    pub fn as_raw(self) -> i32 {
        match self {
            Progress::Percent(p) => p as i32,
            Progress::Finished => PROGRESS_FINISHED,
        }
    }
}

/// Lifecycle of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Finished,
}

/// Share of the budget covered by `elapsed` seconds, clamped to `0..=100`
fn percent_of_budget(elapsed: f64) -> u8 {
    ((elapsed / RUN_DURATION_SECS) * 100.0).clamp(0.0, 100.0) as u8
}

/// Benchmark scheduler. Owns the generator, the kernel scratch buffers and
/// the statistics of a single run.
pub struct Scheduler<C: Clock = MonotonicClock> {
    clock: C,
    rng: BenchRng,
    scratch: Scratch,
    state: RunState,
    score: u32,
    elapsed: f64,
    dispatch_counts: [u32; BenchmarkKind::COUNT],
    latest_results: [Option<KernelResult>; BenchmarkKind::COUNT],
}

impl Scheduler<MonotonicClock> {
    /// Create a scheduler timed by the monotonic clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Scheduler<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Scheduler<C> {
    /// Create a scheduler timed by `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            rng: BenchRng::default(),
            scratch: Scratch::new(),
            state: RunState::NotStarted,
            score: 0,
            elapsed: 0.0,
            dispatch_counts: [0; BenchmarkKind::COUNT],
            latest_results: [None; BenchmarkKind::COUNT],
        }
    }

    /// Execute the run and return the number of kernels executed.
    ///
    /// Returns `0` and logs a diagnostic when `progress` is `None` or the
    /// scheduler has already finished.
    pub fn run<F>(&mut self, progress: Option<F>) -> u32
    where
        F: FnMut(Progress),
    {
        match self.try_run(progress) {
            Ok(score) => score,
            Err(RnBenchError::MissingProgressCallback) => {
                error!("rnbench run: progress function not provided, returning 0");
                0
            }
            Err(err) => {
                warn!(%err, "rnbench run: not started, returning 0");
                0
            }
        }
    }

    /// Like [`Scheduler::run`], but reports why a run did not start
    pub fn try_run<F>(&mut self, progress: Option<F>) -> Result<u32>
    where
        F: FnMut(Progress),
    {
        let mut progress = progress.ok_or(RnBenchError::MissingProgressCallback)?;
        if self.state != RunState::NotStarted {
            return Err(RnBenchError::BenchmarkError(
                "scheduler has already completed its run".to_string(),
            ));
        }

        self.rng.seed(BENCH_RND_SEED);
        self.state = RunState::Running;
        info!(
            seed = BENCH_RND_SEED,
            budget_secs = RUN_DURATION_SECS,
            "Starting benchmark run"
        );

        let start = self.clock.now();
        let mut now = start;

        progress(Progress::Percent(0));
        let mut last_percent = 0u8;

        while now - start < RUN_DURATION_SECS {
            let choice = self.rng.next_range(0, BenchmarkKind::COUNT as i32);
            let kind = BenchmarkKind::ALL[choice as usize];

            let result = run_kernel(kind, &mut self.rng, &mut self.scratch);
            self.latest_results[kind.index()] = Some(result);
            self.dispatch_counts[kind.index()] += 1;
            self.score += 1;

            now = self.clock.now();

            let percent = percent_of_budget(now - start);
            if percent != last_percent {
                progress(Progress::Percent(percent));
                last_percent = percent;
            }
        }

        self.elapsed = now - start;
        progress(Progress::Finished);
        self.state = RunState::Finished;

        info!(
            score = self.score,
            elapsed_secs = self.elapsed,
            "Benchmark run finished"
        );

        Ok(self.score)
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Kernels executed so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds between the first and last clock reading of the run
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    /// Dispatches per kind, indexed by ordinal
    pub fn dispatch_counts(&self) -> &[u32; BenchmarkKind::COUNT] {
        &self.dispatch_counts
    }

    /// Most recent result per kind, indexed by ordinal
    pub fn latest_results(&self) -> &[Option<KernelResult>; BenchmarkKind::COUNT] {
        &self.latest_results
    }

    /// Generator owned by this scheduler
    pub fn rng(&self) -> &BenchRng {
        &self.rng
    }
}
