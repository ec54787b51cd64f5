//! Progress rendering and run plumbing for the command-line tool
//!
//! The scheduler runs on a blocking worker thread; its progress callback
//! forwards every notification over a channel to a renderer task.

use std::io::{self, Write};

use indicatif::{ProgressBar, ProgressStyle as BarStyle};
use tokio::sync::mpsc;

use crate::bench::clock::Clock;
use crate::bench::scheduler::{Progress, Scheduler};
use crate::config::{BenchmarkConfig, ProgressStyle};
use crate::models::RunRecord;
use crate::{Result, RnBenchError};

/// Progress notifications fit comfortably: at most 101 percentages plus the sentinel
const PROGRESS_CHANNEL_CAPACITY: usize = 128;

/// Consumer of progress notifications
pub trait ProgressSink {
    fn handle(&mut self, progress: Progress) -> Result<()>;
}

impl<S: ProgressSink + ?Sized> ProgressSink for Box<S> {
    fn handle(&mut self, progress: Progress) -> Result<()> {
        (**self).handle(progress)
    }
}

/// Classic renderer: `Benchmarking` followed by a dot per reported step
pub struct DotRenderer<W: Write> {
    out: W,
    dot_step: u8,
}

impl<W: Write> DotRenderer<W> {
    pub fn new(out: W, dot_step: u8) -> Self {
        Self {
            out,
            dot_step: dot_step.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for DotRenderer<W> {
    fn handle(&mut self, progress: Progress) -> Result<()> {
        let Progress::Percent(percent) = progress else {
            return Ok(());
        };

        if percent == 0 {
            write!(self.out, "Benchmarking")?;
        }
        if percent % self.dot_step == 0 {
            write!(self.out, ".")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Progress bar over the 0-100 range
pub struct BarRenderer {
    bar: ProgressBar,
}

impl BarRenderer {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = BarStyle::with_template("{spinner} [{bar:40}] {pos:>3}% ({elapsed})") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarRenderer {
    fn handle(&mut self, progress: Progress) -> Result<()> {
        match progress {
            Progress::Percent(percent) => self.bar.set_position(percent as u64),
            Progress::Finished => self.bar.finish(),
        }
        Ok(())
    }
}

/// Discards every notification
#[derive(Debug, Default)]
pub struct Silent;

impl ProgressSink for Silent {
    fn handle(&mut self, _progress: Progress) -> Result<()> {
        Ok(())
    }
}

/// Pick the renderer described by `config`
pub fn renderer_for(config: &BenchmarkConfig) -> Box<dyn ProgressSink + Send> {
    match config.progress_style {
        ProgressStyle::Bar => Box::new(BarRenderer::new()),
        ProgressStyle::Dots => Box::new(DotRenderer::new(io::stdout(), config.dot_step)),
    }
}

/// Run `scheduler` on a blocking worker while `sink` renders its progress.
///
/// Returns the record of the finished run together with the sink.
pub async fn run_with_progress<C, S>(scheduler: Scheduler<C>, mut sink: S) -> Result<(RunRecord, S)>
where
    C: Clock + Send + 'static,
    S: ProgressSink + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Progress>(PROGRESS_CHANNEL_CAPACITY);

    let render_handle = tokio::spawn(async move {
        let mut outcome = Ok(());
        while let Some(progress) = rx.recv().await {
            if outcome.is_ok() {
                outcome = sink.handle(progress);
            }
        }
        outcome.map(|_| sink)
    });

    let bench_handle = tokio::task::spawn_blocking(move || {
        let mut scheduler = scheduler;
        scheduler.run(Some(|progress: Progress| {
            // A closed channel only means nobody is rendering anymore.
            let _ = tx.blocking_send(progress);
        }));
        RunRecord::from_scheduler(&scheduler)
    });

    let record = bench_handle
        .await
        .map_err(|e| RnBenchError::BenchmarkError(format!("Benchmark worker failed: {}", e)))?;
    let sink = render_handle
        .await
        .map_err(|e| RnBenchError::BenchmarkError(format!("Progress renderer failed: {}", e)))??;

    Ok((record, sink))
}
