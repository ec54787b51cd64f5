//! Time source used by the scheduler to enforce the run budget

use std::time::Instant;

/// Source of the current time in seconds.
///
/// Successive readings must never decrease, otherwise the budget check may
/// not terminate.
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Monotonic clock measuring seconds since its creation
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl<F> Clock for F
where
    F: FnMut() -> f64,
{
    fn now(&mut self) -> f64 {
        self()
    }
}
