//! Append-only run log
//!
//! One line per processed file (UTC timestamp, file name, outcome, error
//! detail if failed) plus a summary line at run end. The log survives across
//! runs; lines are only ever appended.

use crate::error::{Result, TagprepError};
use crate::types::{Outcome, ProcessingResult};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only text log for a tagging run
pub struct RunLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RunLog {
    /// Open (or create) the log file in append mode
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TagprepError::output_error(path, e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TagprepError::output_error(path, e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for a processed file
    pub fn record(&mut self, result: &ProcessingResult) -> Result<()> {
        let line = match &result.outcome {
            Outcome::Done => format!("{} {} DONE", timestamp(), result.file_name()),
            Outcome::Skipped { reason } => {
                format!("{} {} SKIPPED: {}", timestamp(), result.file_name(), reason)
            }
            Outcome::Failed { at, reason } => format!(
                "{} {} FAILED at {}: {}",
                timestamp(),
                result.file_name(),
                at,
                flatten(reason)
            ),
        };
        self.write_line(&line)
    }

    /// Append the end-of-run summary line
    pub fn record_summary(&mut self, done: usize, failed: usize, skipped: usize) -> Result<()> {
        let line = format!(
            "{} SUMMARY done={} failed={} skipped={}",
            timestamp(),
            done,
            failed,
            skipped
        );
        self.write_line(&line)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| TagprepError::output_error(&self.path, e))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| TagprepError::output_error(&self.path, e))
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Error messages can be multi-line (they carry tips); keep log lines single-line
fn flatten(reason: &str) -> String {
    reason
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn result(name: &str, outcome: Outcome) -> ProcessingResult {
        ProcessingResult {
            path: PathBuf::from(name),
            outcome,
        }
    }

    #[test]
    fn writes_one_line_per_result_plus_summary() {
        let dir = TempDir::new().expect("temp dir");
        let log_path = dir.path().join("run.log");

        let mut log = RunLog::open(&log_path).expect("open log");
        log.record(&result("a.mp3", Outcome::Done)).expect("record");
        log.record(&result(
            "b.mp3",
            Outcome::Failed {
                at: Stage::Inferred,
                reason: "network error".into(),
            },
        ))
        .expect("record");
        log.record_summary(1, 1, 0).expect("summary");
        log.flush().expect("flush");

        let content = std::fs::read_to_string(&log_path).expect("read log");
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("a.mp3 DONE"));
        assert!(lines[1].contains("b.mp3 FAILED at INFERRED: network error"));
        assert!(lines[2].contains("SUMMARY done=1 failed=1 skipped=0"));
    }

    #[test]
    fn reopening_appends_instead_of_truncating() {
        let dir = TempDir::new().expect("temp dir");
        let log_path = dir.path().join("run.log");

        for _ in 0..2 {
            let mut log = RunLog::open(&log_path).expect("open log");
            log.record(&result("a.mp3", Outcome::Done)).expect("record");
            log.flush().expect("flush");
        }

        let content = std::fs::read_to_string(&log_path).expect("read log");
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn multi_line_errors_are_flattened() {
        assert_eq!(flatten("bad file\n  Tip: check it"), "bad file Tip: check it");
    }
}
