//! Per-gate append log - sequential text files, one per gate
//!
//! Each gate owns one log file under the configured directory, created on
//! first write. Sequence numbers are derived by counting existing marker
//! lines at append time; counting and writing happen under one in-process
//! lock so a single process never double-numbers. Concurrent *processes*
//! can still collide, which is accepted best-effort behavior: the append
//! itself is never lost, only the cosmetic number can repeat.

use crate::domain::entry::{EntryDraft, LogEntry, ENTRY_MARKER};
use crate::domain::types::GateId;
use anyhow::Context;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct GateLogStore {
    log_dir: PathBuf,
    append_lock: Mutex<()>,
}

impl GateLogStore {
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        let log_dir = log_dir.as_ref().to_path_buf();
        debug!(log_dir = %log_dir.display(), "gate_log_store_initialized");
        Self { log_dir, append_lock: Mutex::new(()) }
    }

    /// Path of the log file for a gate
    pub fn log_file(&self, gate: GateId) -> PathBuf {
        self.log_dir.join(format!("vehicle_log_gate{gate}.txt"))
    }

    /// Next sequence number: count of existing marker lines plus one.
    /// A missing file counts as empty.
    pub fn next_sequence(&self, gate: GateId) -> anyhow::Result<u64> {
        let path = self.log_file(gate);
        if !path.exists() {
            return Ok(1);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read log file {}", path.display()))?;
        let count = content.lines().filter(|line| line.contains(ENTRY_MARKER)).count() as u64;
        Ok(count + 1)
    }

    /// Number a draft and append it as one line.
    ///
    /// Sequence derivation and the write share the append lock, so
    /// appends within this process are serialized.
    pub fn append_entry(&self, draft: EntryDraft) -> anyhow::Result<LogEntry> {
        let _guard = self.append_lock.lock();

        let sequence_no = self.next_sequence(draft.gate)?;
        let entry = draft.into_entry(sequence_no);
        self.append_line(entry.gate, &entry.format_line())?;

        info!(
            gate = %entry.gate,
            sequence_no = entry.sequence_no,
            vehicle = %entry.vehicle_id,
            action = %entry.action,
            "entry_appended"
        );
        Ok(entry)
    }

    /// Full log content for a gate, oldest first. Missing file reads as
    /// empty.
    pub fn read(&self, gate: GateId) -> anyhow::Result<Vec<String>> {
        let path = self.log_file(gate);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read log file {}", path.display()))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Truncate a gate's log to empty, creating the file if absent
    pub fn clear(&self, gate: GateId) -> anyhow::Result<()> {
        let _guard = self.append_lock.lock();

        let path = self.log_file(gate);
        self.ensure_log_dir()?;
        File::create(&path)
            .with_context(|| format!("Failed to clear log file {}", path.display()))?;
        info!(gate = %gate, "log_cleared");
        Ok(())
    }

    fn append_line(&self, gate: GateId, line: &str) -> anyhow::Result<()> {
        self.ensure_log_dir()?;
        let path = self.log_file(gate);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        writeln!(file, "{line}")
            .with_context(|| format!("Failed to append to log file {}", path.display()))?;
        Ok(())
    }

    fn ensure_log_dir(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.log_dir).with_context(|| {
            format!("Failed to create log directory {}", self.log_dir.display())
        })
    }
}
