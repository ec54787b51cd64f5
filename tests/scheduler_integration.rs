//! End-to-end checks of the scheduler through the public API

use rnbench::bench::BENCH_RND_SEED;
use rnbench::models::{BenchmarkKind, RunRecord};
use rnbench::{Progress, RunState, Scheduler, PROGRESS_FINISHED};
use std::time::{Duration, Instant};

fn step_clock(step: f64) -> impl FnMut() -> f64 {
    let mut t = -step;
    move || {
        t += step;
        t
    }
}

#[test]
fn test_callback_contract() {
    let mut raw = Vec::new();
    let mut scheduler = Scheduler::with_clock(step_clock(0.07));
    let score = scheduler.run(Some(|p: Progress| raw.push(p.as_raw())));

    assert!(score > 0);
    assert_eq!(raw[0], 0);
    assert_eq!(*raw.last().unwrap(), PROGRESS_FINISHED);
    assert_eq!(raw.iter().filter(|&&v| v == PROGRESS_FINISHED).count(), 1);

    let percents = &raw[..raw.len() - 1];
    assert!(percents.iter().all(|&v| (0..=100).contains(&v)));
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_record_reflects_run() {
    let mut scheduler = Scheduler::with_clock(step_clock(0.25));
    let score = scheduler.run(Some(|_: Progress| {}));
    assert_eq!(scheduler.state(), RunState::Finished);

    let record = RunRecord::from_scheduler(&scheduler);
    assert_eq!(record.score, score);
    assert_eq!(record.total_dispatches(), score as u64);
    assert_eq!(record.elapsed, Duration::from_secs(30));
    assert_eq!(record.kinds.len(), BenchmarkKind::COUNT);
    for (tally, kind) in record.kinds.iter().zip(BenchmarkKind::ALL) {
        assert_eq!(tally.kind, kind);
        assert_eq!(tally.last_result.is_some(), tally.dispatches > 0);
    }
}

#[test]
fn test_seed_is_fixed() {
    let mut scheduler = Scheduler::with_clock(step_clock(100.0));
    scheduler.run(Some(|_: Progress| {}));

    // One RandomNumbers dispatch after the selection draw: 1 + 1000 draws from the seed.
    let mut expected = rnbench::bench::BenchRng::new(BENCH_RND_SEED);
    for _ in 0..1001 {
        expected.next_int();
    }
    assert_eq!(scheduler.rng(), &expected);
}

#[test]
#[ignore = "runs for the full 30 second budget"]
fn test_full_run_with_monotonic_clock() {
    let started = Instant::now();
    let mut calls = 0;
    let score = rnbench::run(Some(|_: Progress| calls += 1));

    let elapsed = started.elapsed();
    assert!(score > 0);
    assert!(calls >= 2 && calls <= 102);
    assert!(elapsed >= Duration::from_secs(30));
    assert!(elapsed < Duration::from_secs(35));
}
