//! History queries over the journal and CSV archive.
//!
//! Daily summaries are derived here by folding meal and sleep entries
//! per calendar day; they are never stored. Entries that appear in both
//! the live journal and the archive are deduplicated by id.

use crate::{csv_rollup::CsvRow, journal::JournalEntry, DailySummary, Result, Workout};
use chrono::{Days, NaiveDate};
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Load all entries from the journal and the CSV archive, deduplicated
/// by entry id (journal wins).
pub fn load_entries(journal_path: &Path, csv_path: &Path) -> Result<Vec<JournalEntry>> {
    let mut entries = Vec::new();
    let mut seen_ids = HashSet::new();

    if journal_path.exists() {
        for entry in crate::journal::read_entries(journal_path)? {
            seen_ids.insert(entry.id());
            entries.push(entry);
        }
        tracing::debug!("Loaded {} entries from journal", entries.len());
    }

    if csv_path.exists() {
        let mut csv_count = 0;
        for entry in load_entries_from_csv(csv_path)? {
            if seen_ids.insert(entry.id()) {
                entries.push(entry);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} entries from CSV archive", csv_count);
    }

    Ok(entries)
}

/// Daily summaries for an inclusive date range, ordered by date
/// ascending. Days with no logged entries are omitted; consumers that
/// need a dense series zero-fill downstream.
pub fn daily_summaries(
    journal_path: &Path,
    csv_path: &Path,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailySummary>> {
    let entries = load_entries(journal_path, csv_path)?;

    let mut by_date: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();
    // Track when each day's sleep was logged so the latest record wins
    let mut sleep_logged_at = BTreeMap::new();

    for entry in entries {
        let date = entry.date();
        if date < start || date > end {
            continue;
        }
        let summary = by_date
            .entry(date)
            .or_insert_with(|| DailySummary::empty(date));

        match entry {
            JournalEntry::Meal(meal) => {
                summary.protein_g += meal.protein_g;
                summary.carbs_g += meal.carbs_g;
                summary.fat_g += meal.fat_g;
                summary.calories += meal.calories;
            }
            JournalEntry::Sleep(sleep) => {
                let newer = sleep_logged_at
                    .get(&date)
                    .map_or(true, |prev| sleep.logged_at >= *prev);
                if newer {
                    sleep_logged_at.insert(date, sleep.logged_at);
                    summary.sleep_hours = Some(sleep.hours);
                }
            }
            JournalEntry::Workout(_) => {}
        }
    }

    let summaries: Vec<DailySummary> = by_date.into_values().collect();
    tracing::debug!(
        "Built {} daily summaries over [{}, {}]",
        summaries.len(),
        start,
        end
    );
    Ok(summaries)
}

/// Completed workouts from the last `days` calendar days ending at
/// `as_of`, ordered by date descending.
pub fn recent_workouts(
    journal_path: &Path,
    csv_path: &Path,
    days: u64,
    as_of: NaiveDate,
) -> Result<Vec<Workout>> {
    let cutoff = as_of
        .checked_sub_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(as_of);

    let mut workouts: Vec<Workout> = load_entries(journal_path, csv_path)?
        .into_iter()
        .filter_map(|entry| match entry {
            JournalEntry::Workout(w) if w.completed && w.date >= cutoff && w.date <= as_of => {
                Some(w)
            }
            _ => None,
        })
        .collect();

    workouts.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::debug!("Loaded {} completed workouts from last {} days", workouts.len(), days);
    Ok(workouts)
}

/// Load all entries from a CSV archive file
fn load_entries_from_csv(path: &Path) -> Result<Vec<JournalEntry>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match JournalEntry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(entries)
}
