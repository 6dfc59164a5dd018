//! Protein-vs-volume correlation series for charting.
//!
//! Builds a dense daily series over a requested window: exactly one
//! point per calendar day, ascending, with zeros for days that have no
//! summary or no completed workout. Downstream charting never has to
//! special-case holes.

use crate::{CorrelationData, CorrelationPoint, DailySummary, Workout};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// Build the correlation series for the `days` calendar days ending at
/// `as_of` (inclusive).
///
/// `days` of zero yields an empty series with a degenerate window.
pub fn build_correlation(
    days: u32,
    as_of: NaiveDate,
    summaries: &[DailySummary],
    workouts: &[Workout],
) -> CorrelationData {
    let start = as_of
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(as_of);

    let protein_by_date: HashMap<NaiveDate, f64> = summaries
        .iter()
        .map(|s| (s.date, s.protein_g))
        .collect();

    let mut volume_by_date: HashMap<NaiveDate, f64> = HashMap::new();
    for workout in workouts.iter().filter(|w| w.completed) {
        *volume_by_date.entry(workout.date).or_insert(0.0) += workout.volume();
    }

    let mut points = Vec::with_capacity(days as usize);
    let mut date = start;
    while date <= as_of && points.len() < days as usize {
        points.push(CorrelationPoint {
            date,
            protein_intake_g: protein_by_date.get(&date).copied().unwrap_or(0.0),
            workout_volume: volume_by_date.get(&date).copied().unwrap_or(0.0),
        });
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    tracing::debug!(
        "Built correlation series: {} points over [{}, {}]",
        points.len(),
        start,
        as_of
    );

    CorrelationData {
        start,
        end: as_of,
        points,
    }
}
