//! Run history
//!
//! Every finished run is condensed to a [`HistoryEntry`] and appended as one
//! JSON line to `history.jsonl` under the data directory. The file keeps the
//! newest [`MAX_HISTORY_ENTRIES`] lines; older ones are compacted away on the
//! append that crosses the limit.

use crate::models::{BenchmarkKind, RunRecord};
use crate::{Result, RnBenchError, APP_NAME, HISTORY_FILE, MAX_HISTORY_ENTRIES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Condensed run: what the history view shows and nothing more
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub score: u32,
    pub elapsed_ms: u64,
    /// Dispatches per kind, indexed by ordinal
    pub dispatches: [u32; BenchmarkKind::COUNT],
}

impl HistoryEntry {
    pub fn from_record(record: &RunRecord) -> Self {
        let mut dispatches = [0; BenchmarkKind::COUNT];
        for tally in &record.kinds {
            dispatches[tally.kind.index()] = tally.dispatches;
        }

        Self {
            timestamp: record.timestamp,
            version: record.version.clone(),
            score: record.score,
            elapsed_ms: record.elapsed.as_millis() as u64,
            dispatches,
        }
    }
}

/// Append-only history file
#[derive(Debug)]
pub struct RunHistory {
    path: PathBuf,
}

impl RunHistory {
    /// History at `$DATA_HOME/rnbench/history.jsonl`
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            RnBenchError::HistoryError("no data directory on this platform".to_string())
        })?;
        Ok(Self::at(data_dir.join(APP_NAME).join(HISTORY_FILE)))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Condense `record` and add it to the history
    pub fn record(&self, record: &RunRecord) -> Result<HistoryEntry> {
        let entry = HistoryEntry::from_record(record);
        let mut entries = self.entries()?;

        if entries.len() < MAX_HISTORY_ENTRIES {
            self.append_line(&entry)?;
        } else {
            entries.push(entry.clone());
            entries.drain(..entries.len() - MAX_HISTORY_ENTRIES);
            self.rewrite(&entries)?;
        }

        Ok(entry)
    }

    /// The newest `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.entries()?;
        if entries.len() > limit {
            entries.drain(..entries.len() - limit);
        }
        Ok(entries)
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.history_error(format_args!("unreadable: {}", e)))?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .map_err(|e| self.history_error(format_args!("line {}: {}", n + 1, e)))
            })
            .collect()
    }

    fn append_line(&self, entry: &HistoryEntry) -> Result<()> {
        self.ensure_parent()?;
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.history_error(format_args!("cannot open for append: {}", e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| self.history_error(format_args!("append failed: {}", e)))
    }

    fn rewrite(&self, entries: &[HistoryEntry]) -> Result<()> {
        self.ensure_parent()?;
        let mut content = String::new();
        for entry in entries {
            content.push_str(&serde_json::to_string(entry)?);
            content.push('\n');
        }
        fs::write(&self.path, content)
            .map_err(|e| self.history_error(format_args!("compaction failed: {}", e)))
    }

    fn ensure_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) => fs::create_dir_all(parent)
                .map_err(|e| self.history_error(format_args!("cannot create directory: {}", e))),
            None => Ok(()),
        }
    }

    fn history_error(&self, detail: std::fmt::Arguments<'_>) -> RnBenchError {
        RnBenchError::HistoryError(format!("{}: {}", self.path.display(), detail))
    }
}

/// Table of `entries` with per-kind dispatch columns; the best score is starred
pub fn render_table(entries: &[HistoryEntry]) -> String {
    let mut out = String::new();
    let Some(best) = entries.iter().map(|e| e.score).max() else {
        return out;
    };

    let _ = write!(out, "{:<19}  {:<8} {:>6}", "Finished (UTC)", "Version", "Score");
    for kind in BenchmarkKind::ALL {
        let _ = write!(out, " {:>6}", kind.short_label());
    }
    out.push('\n');

    for entry in entries {
        let _ = write!(
            out,
            "{:<19}  {:<8} {:>6}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.version,
            entry.score
        );
        for count in entry.dispatches {
            let _ = write!(out, " {:>6}", count);
        }
        if entry.score == best {
            out.push_str("  *");
        }
        out.push('\n');
    }

    let mean = entries.iter().map(|e| e.score as f64).sum::<f64>() / entries.len() as f64;
    let _ = writeln!(out, "{} runs, best {}, mean {:.1}", entries.len(), best, mean);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KindTally;
    use std::time::Duration;
    use tempfile::TempDir;

    fn run_record(score: u32) -> RunRecord {
        // Tallies deliberately out of ordinal order
        let kinds = BenchmarkKind::ALL
            .iter()
            .rev()
            .map(|&kind| KindTally {
                kind,
                dispatches: score + kind.index() as u32,
                last_result: None,
            })
            .collect();
        RunRecord::new(score, Duration::from_millis(30_004), kinds)
    }

    fn history_in(dir: &TempDir) -> RunHistory {
        RunHistory::at(dir.path().join("nested").join("history.jsonl"))
    }

    #[test]
    fn test_entry_places_tallies_by_kind() {
        let entry = HistoryEntry::from_record(&run_record(10));
        assert_eq!(entry.dispatches, [10, 11, 12, 13, 14]);
        assert_eq!(entry.elapsed_ms, 30_004);
        assert_eq!(entry.score, 10);
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        assert!(history_in(&dir).recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_record_appends_one_line_per_run() {
        let dir = TempDir::new().unwrap();
        let history = history_in(&dir);

        let first = history.record(&run_record(120)).unwrap();
        history.record(&run_record(118)).unwrap();

        let content = fs::read_to_string(history.path()).unwrap();
        assert_eq!(content.lines().count(), 2);

        let entries = history.recent(10).unwrap();
        assert_eq!(entries[0], first);
        assert_eq!(entries[1].score, 118);
        assert_eq!(history.recent(1).unwrap()[0].score, 118);
    }

    #[test]
    fn test_history_is_compacted_to_newest_entries() {
        let dir = TempDir::new().unwrap();
        let history = history_in(&dir);

        for score in 0..(MAX_HISTORY_ENTRIES + 5) as u32 {
            history.record(&run_record(score)).unwrap();
        }

        let content = fs::read_to_string(history.path()).unwrap();
        assert_eq!(content.lines().count(), MAX_HISTORY_ENTRIES);

        let entries = history.recent(usize::MAX).unwrap();
        assert_eq!(entries.first().map(|e| e.score), Some(5));
        assert_eq!(
            entries.last().map(|e| e.score),
            Some((MAX_HISTORY_ENTRIES + 4) as u32)
        );
    }

    #[test]
    fn test_corrupt_line_names_its_position() {
        let dir = TempDir::new().unwrap();
        let history = history_in(&dir);
        history.record(&run_record(1)).unwrap();

        let mut file = OpenOptions::new().append(true).open(history.path()).unwrap();
        writeln!(file, "{{not json").unwrap();

        match history.recent(10) {
            Err(RnBenchError::HistoryError(msg)) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("expected a history error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_table_marks_best_score() {
        let entries: Vec<HistoryEntry> = [100, 130, 115]
            .iter()
            .map(|&s| HistoryEntry::from_record(&run_record(s)))
            .collect();
        let table = render_table(&entries);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Score"));
        assert!(lines[0].contains("crc"));
        assert!(!lines[1].ends_with('*'));
        assert!(lines[2].ends_with('*'));
        assert!(lines[2].contains(" 130 "));
        assert_eq!(lines[4], "3 runs, best 130, mean 115.0");
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[]), "");
    }
}
