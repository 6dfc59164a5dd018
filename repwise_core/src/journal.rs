//! Append-only journal for logged workouts, meals, and sleep.
//!
//! Entries are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. The journal is the system of
//! record; daily summaries are derived from it, never stored.

use crate::{Meal, Result, SleepRecord, Workout};
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One logged event
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalEntry {
    Workout(Workout),
    Meal(Meal),
    Sleep(SleepRecord),
}

impl JournalEntry {
    pub fn id(&self) -> Uuid {
        match self {
            JournalEntry::Workout(w) => w.id,
            JournalEntry::Meal(m) => m.id,
            JournalEntry::Sleep(s) => s.id,
        }
    }

    /// The calendar day this entry belongs to
    pub fn date(&self) -> NaiveDate {
        match self {
            JournalEntry::Workout(w) => w.date,
            JournalEntry::Meal(m) => m.date,
            JournalEntry::Sleep(s) => s.date,
        }
    }

    pub fn logged_at(&self) -> DateTime<Utc> {
        match self {
            JournalEntry::Workout(w) => w.logged_at,
            JournalEntry::Meal(m) => m.logged_at,
            JournalEntry::Sleep(s) => s.logged_at,
        }
    }
}

/// Entry sink trait for persisting journal entries
pub trait EntrySink {
    fn append(&mut self, entry: &JournalEntry) -> Result<()>;
}

/// JSONL-based journal with file locking
pub struct JsonlJournal {
    path: PathBuf,
}

impl JsonlJournal {
    /// Create a new JSONL journal for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl EntrySink for JsonlJournal {
    fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        // Open file for appending
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        // Write entry as JSON line
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended entry {} to journal", entry.id());
        Ok(())
    }
}

/// Read all entries from a journal file
///
/// Malformed lines are skipped with a warning so one bad write cannot
/// take the whole history down.
pub fn read_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<JournalEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse journal entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from journal", entries.len());
    Ok(entries)
}
