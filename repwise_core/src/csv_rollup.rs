//! CSV rollup functionality for archiving journal entries.
//!
//! This module implements atomic journal-to-CSV conversion with proper
//! error handling to prevent data loss. One CSV row per entry; workout
//! sets are stored as a JSON payload in their own column so nothing is
//! lost across the archive boundary.

use crate::{journal::JournalEntry, Error, Meal, Result, SleepRecord, Workout};
use chrono::{DateTime, NaiveDate, Utc};
use std::fs::OpenOptions;
use std::path::Path;
use uuid::Uuid;

/// A row in the CSV archive
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct CsvRow {
    pub id: String,
    pub kind: String,
    pub date: NaiveDate,
    pub logged_at: String,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub calories: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub completed: Option<bool>,
    pub sets: Option<String>,
}

impl TryFrom<&JournalEntry> for CsvRow {
    type Error = Error;

    fn try_from(entry: &JournalEntry) -> Result<Self> {
        let mut row = CsvRow {
            id: entry.id().to_string(),
            kind: String::new(),
            date: entry.date(),
            logged_at: entry.logged_at().to_rfc3339(),
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            calories: None,
            sleep_hours: None,
            completed: None,
            sets: None,
        };

        match entry {
            JournalEntry::Workout(w) => {
                row.kind = "workout".into();
                row.completed = Some(w.completed);
                row.sets = Some(serde_json::to_string(&w.sets)?);
            }
            JournalEntry::Meal(m) => {
                row.kind = "meal".into();
                row.protein_g = Some(m.protein_g);
                row.carbs_g = Some(m.carbs_g);
                row.fat_g = Some(m.fat_g);
                row.calories = Some(m.calories);
            }
            JournalEntry::Sleep(s) => {
                row.kind = "sleep".into();
                row.sleep_hours = Some(s.hours);
            }
        }

        Ok(row)
    }
}

impl TryFrom<CsvRow> for JournalEntry {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| Error::Other(format!("Invalid UUID: {}", e)))?;
        let logged_at = DateTime::parse_from_rfc3339(&row.logged_at)
            .map_err(|e| Error::Other(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        match row.kind.as_str() {
            "workout" => {
                let sets = match row.sets.as_deref() {
                    Some(json) => serde_json::from_str(json)?,
                    None => Vec::new(),
                };
                Ok(JournalEntry::Workout(Workout {
                    id,
                    date: row.date,
                    logged_at,
                    completed: row.completed.unwrap_or(true),
                    sets,
                }))
            }
            "meal" => Ok(JournalEntry::Meal(Meal {
                id,
                date: row.date,
                logged_at,
                protein_g: row.protein_g.unwrap_or(0.0),
                carbs_g: row.carbs_g.unwrap_or(0.0),
                fat_g: row.fat_g.unwrap_or(0.0),
                calories: row.calories.unwrap_or(0.0),
            })),
            "sleep" => Ok(JournalEntry::Sleep(SleepRecord {
                id,
                date: row.date,
                logged_at,
                hours: row.sleep_hours.unwrap_or(0.0),
            })),
            other => Err(Error::Other(format!("Unknown entry kind: {}", other))),
        }
    }
}

/// Roll up journal entries into CSV and archive the journal atomically
///
/// This function:
/// 1. Reads all entries from the journal
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the journal to .processed
/// 5. Returns the number of entries processed
///
/// # Safety
/// - CSV is fsynced before the journal is renamed
/// - The journal is renamed (not deleted) to allow manual recovery
pub fn journal_to_csv_and_archive(journal_path: &Path, csv_path: &Path) -> Result<usize> {
    let entries = crate::journal::read_entries(journal_path)?;

    if entries.is_empty() {
        tracing::info!("No entries in journal to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Only write headers when the file is brand new
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &entries {
        let row = CsvRow::try_from(entry)?;
        writer.serialize(row)?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} entries to CSV", entries.len());

    // Atomically archive the journal by renaming it
    let processed_path = journal_path.with_extension("jsonl.processed");
    std::fs::rename(journal_path, &processed_path)?;

    tracing::info!("Archived journal to {:?}", processed_path);

    Ok(entries.len())
}

/// Clean up old processed journal files
///
/// This removes all .jsonl.processed files in the given directory.
pub fn cleanup_processed_journals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed journal: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed journal files", count);
    }

    Ok(count)
}
