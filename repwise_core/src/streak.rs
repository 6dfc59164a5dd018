//! Streak tracking state machine.
//!
//! This module implements the daily status check over [`StreakData`]:
//! - Per-dimension consecutive-day counters (workout, nutrition, combined)
//! - A one-time, one-day grace window per streak lifetime
//! - Milestone crossing detection gated by a monotonic watermark
//!
//! A calendar day only counts as missed once it has fully passed: a
//! status check run on a day with no activity yet leaves a live streak
//! untouched until the gap grows beyond the grace window.

use crate::{
    milestones, DayActivity, DimensionStreak, StreakData, StreakDimension, StreakMilestone,
};
use chrono::{Days, NaiveDate};

/// Snapshot returned by [`check_streak_status`]
#[derive(Clone, Debug)]
pub struct StreakReport {
    /// The updated streak state, identical to what was written back
    pub data: StreakData,
    /// Workout-streak milestones newly crossed by this check, ascending.
    /// Empty when the watermark already covers the current streak length.
    pub crossed_milestones: Vec<StreakMilestone>,
}

/// Run the daily streak status check as of a local calendar day.
///
/// Mutates `data` in place and returns the updated snapshot plus any
/// newly crossed milestones. Idempotent against repeated calls on the
/// same day. This is the single stateful operation in the core; callers
/// must ensure at most one invocation is in flight per user.
pub fn check_streak_status(
    data: &mut StreakData,
    activity: &DayActivity,
    as_of: NaiveDate,
) -> StreakReport {
    advance_dimension(
        &mut data.workout,
        activity.workout,
        as_of,
        StreakDimension::Workout,
    );
    advance_dimension(
        &mut data.nutrition,
        activity.nutrition,
        as_of,
        StreakDimension::Nutrition,
    );
    advance_dimension(
        &mut data.combined,
        activity.workout && activity.nutrition,
        as_of,
        StreakDimension::Combined,
    );

    let crossed_milestones = detect_crossings(data);

    StreakReport {
        data: data.clone(),
        crossed_milestones,
    }
}

/// Apply the gap/grace/reset rule to one dimension
fn advance_dimension(
    dim: &mut DimensionStreak,
    active_today: bool,
    as_of: NaiveDate,
    which: StreakDimension,
) {
    let label = which.as_str();
    repair(dim, label);

    // The grace token covers one missed day, so the gap is measured from
    // whichever is later: real activity or the covered day.
    let effective_last = match (dim.last_activity, dim.grace_date) {
        (Some(last), Some(grace)) => Some(last.max(grace)),
        (Some(last), None) => Some(last),
        (None, _) => None,
    };

    let Some(last) = effective_last else {
        if active_today {
            dim.current = 1;
            dim.last_activity = Some(as_of);
            dim.longest = dim.longest.max(dim.current);
            tracing::debug!("{} streak started at {}", label, as_of);
        }
        return;
    };

    let gap = (as_of - last).num_days();

    if gap <= 0 {
        // Activity already recorded for as_of (or a backwards clock);
        // repeated checks on the same day are no-ops.
        return;
    }

    match gap {
        1 => {
            if active_today {
                dim.current += 1;
                dim.last_activity = Some(as_of);
                tracing::debug!("{} streak extended to {}", label, dim.current);
            }
            // No activity yet today: the streak is still alive.
        }
        2 if !dim.grace_used => {
            // One full day was missed and the grace token is available:
            // spend it and carry the count forward.
            dim.grace_used = true;
            dim.grace_date = last.checked_add_days(Days::new(1));
            if active_today {
                dim.current += 1;
                dim.last_activity = Some(as_of);
            }
            tracing::debug!(
                "{} streak grace consumed for {:?}, count carried at {}",
                label,
                dim.grace_date,
                dim.current
            );
        }
        _ => {
            // Gap beyond the grace window, or grace already spent
            let broken_at = dim.current;
            dim.current = u32::from(active_today);
            dim.last_activity = active_today.then_some(as_of);
            dim.grace_used = false;
            dim.grace_date = None;
            tracing::debug!(
                "{} streak broken at {} after {}-day gap, now {}",
                label,
                broken_at,
                gap,
                dim.current
            );
        }
    }

    dim.longest = dim.longest.max(dim.current);
}

/// Clamp counters that violate invariants instead of propagating a fault
fn repair(dim: &mut DimensionStreak, label: &str) {
    if dim.current > 0 && dim.last_activity.is_none() {
        tracing::warn!(
            "{} streak had count {} with no activity date, resetting",
            label,
            dim.current
        );
        dim.current = 0;
        dim.grace_used = false;
        dim.grace_date = None;
    }
    if dim.longest < dim.current {
        tracing::warn!(
            "{} streak had longest {} < current {}, repairing",
            label,
            dim.longest,
            dim.current
        );
        dim.longest = dim.current;
    }
}

/// Report workout-streak milestones newly passed since the watermark and
/// advance the watermark to the highest of them.
fn detect_crossings(data: &mut StreakData) -> Vec<StreakMilestone> {
    let current = data.workout.current;
    let crossed: Vec<StreakMilestone> = milestones::all_milestones()
        .iter()
        .filter(|m| m.days > data.last_celebrated_milestone && m.days <= current)
        .cloned()
        .collect();

    if let Some(highest) = crossed.last() {
        tracing::info!(
            "Milestone reached: {} ({} days)",
            highest.name,
            highest.days
        );
        data.last_celebrated_milestone = highest.days;
    }

    crossed
}
