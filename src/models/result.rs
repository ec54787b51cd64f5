//! Benchmark result data models
//!
//! Contains the workload kinds, the per-kernel result value, and the
//! serializable record of a complete run.

use crate::bench::clock::Clock;
use crate::bench::scheduler::Scheduler;
use crate::util::units::{format_duration, format_rate, iterations_per_second};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Workload kinds. Ordinals are stable and double as selection indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BenchmarkKind {
    /// Decaying average over the generator output
    RandomNumbers = 0,
    /// Synthetic text building and word counting
    WordCount = 1,
    /// CRC-32 over random printable bytes
    Crc32 = 2,
    /// Run-length encoding of random runs
    RunLengthEncode = 3,
    /// Quicksort of a small integer array
    QuickSort = 4,
}

impl BenchmarkKind {
    /// Number of kinds; the upper bound for random selection
    pub const COUNT: usize = 5;

    /// All kinds in ordinal order
    pub const ALL: [BenchmarkKind; Self::COUNT] = [
        BenchmarkKind::RandomNumbers,
        BenchmarkKind::WordCount,
        BenchmarkKind::Crc32,
        BenchmarkKind::RunLengthEncode,
        BenchmarkKind::QuickSort,
    ];

    /// Ordinal of this kind
    pub fn index(self) -> usize {
        self as usize
    }


    /// Human-readable label used in logs and reports
    pub fn label(self) -> &'static str {
        match self {
            BenchmarkKind::RandomNumbers => "Random numbers",
            BenchmarkKind::WordCount => "Word count",
            BenchmarkKind::Crc32 => "CRC32 hash",
            BenchmarkKind::RunLengthEncode => "RLE compression factor",
            BenchmarkKind::QuickSort => "Quicksort array sum",
        }
    }

    /// Column heading for tables
    pub fn short_label(self) -> &'static str {
        match self {
            BenchmarkKind::RandomNumbers => "rnd",
            BenchmarkKind::WordCount => "words",
            BenchmarkKind::Crc32 => "crc",
            BenchmarkKind::RunLengthEncode => "rle",
            BenchmarkKind::QuickSort => "sort",
        }
    }

    /// Format a result the way this kind reports it
    pub fn describe(self, result: KernelResult) -> String {
        match (self, result) {
            (BenchmarkKind::Crc32, KernelResult::Unsigned(hash)) => {
                format!("{}: 0x{:08X}", self.label(), hash)
            }
            (BenchmarkKind::RunLengthEncode, KernelResult::Float(pct)) => {
                format!("{}: {:.6}%", self.label(), pct)
            }
            _ => format!("{}: {}", self.label(), result),
        }
    }
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value produced by one kernel invocation.
///
/// Only the shape belonging to the producing kind is meaningful; values of
/// different kinds are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum KernelResult {
    Float(f64),
    Unsigned(u32),
    Signed(i32),
}

impl KernelResult {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            KernelResult::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(self) -> Option<u32> {
        match self {
            KernelResult::Unsigned(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(self) -> Option<i32> {
        match self {
            KernelResult::Signed(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for KernelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelResult::Float(v) => write!(f, "{:.6}", v),
            KernelResult::Unsigned(v) => write!(f, "{}", v),
            KernelResult::Signed(v) => write!(f, "{}", v),
        }
    }
}

/// Per-kind summary of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindTally {
    /// Workload kind
    pub kind: BenchmarkKind,
    /// How many times the scheduler dispatched this kind
    pub dispatches: u32,
    /// Result of the most recent dispatch, if any
    pub last_result: Option<KernelResult>,
}

/// Complete record of one benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Timestamp when the run finished
    pub timestamp: DateTime<Utc>,
    /// Version of the tool that produced the score
    pub version: String,
    /// Number of workloads completed within the budget
    pub score: u32,
    /// Measured wall-clock time of the run
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
    /// Score divided by elapsed seconds
    pub iterations_per_second: f64,
    /// Dispatch counts and latest results by kind
    pub kinds: Vec<KindTally>,
    /// Host information at time of run
    pub system_info: SystemInfo,
}

/// Host information captured at run time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system family
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Logical CPUs available to the process
    pub logical_cpus: usize,
}

impl RunRecord {
    /// Build a record from a finished scheduler
    pub fn from_scheduler<C: Clock>(scheduler: &Scheduler<C>) -> Self {
        let kinds = BenchmarkKind::ALL
            .iter()
            .map(|&kind| KindTally {
                kind,
                dispatches: scheduler.dispatch_counts()[kind.index()],
                last_result: scheduler.latest_results()[kind.index()],
            })
            .collect();

        Self::new(
            scheduler.score(),
            Duration::from_secs_f64(scheduler.elapsed_secs().max(0.0)),
            kinds,
        )
    }

    /// Create a record stamped with the current time and host info
    pub fn new(score: u32, elapsed: Duration, kinds: Vec<KindTally>) -> Self {
        Self {
            timestamp: Utc::now(),
            version: crate::VERSION.to_string(),
            score,
            elapsed,
            iterations_per_second: iterations_per_second(score, elapsed),
            kinds,
            system_info: SystemInfo::detect(),
        }
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} - score {} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.score,
            format_duration(self.elapsed),
            format_rate(self.iterations_per_second)
        )
    }

    /// Sum of per-kind dispatches; equals the score for a consistent record
    pub fn total_dispatches(&self) -> u64 {
        self.kinds.iter().map(|k| k.dispatches as u64).sum()
    }
}

impl SystemInfo {
    /// Detect the current host
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            logical_cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::detect()
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_nanos() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
