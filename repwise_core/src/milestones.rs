//! Static streak-milestone reference table.
//!
//! Milestones mark celebratory streak lengths at 7/14/30/60/100/365
//! days. The table is ordered ascending and never changes at runtime.

use crate::StreakMilestone;
use once_cell::sync::Lazy;

/// Cached milestone table - built once and reused across all operations
static MILESTONES: Lazy<Vec<StreakMilestone>> = Lazy::new(build_milestones);

fn build_milestones() -> Vec<StreakMilestone> {
    let entries: [(u32, &str, &str); 6] = [
        (7, "One Week Strong", "🔥"),
        (14, "Two Week Warrior", "⚡"),
        (30, "Monthly Master", "🏆"),
        (60, "Sixty Day Streak", "💎"),
        (100, "Century Club", "💯"),
        (365, "Year of Dedication", "👑"),
    ];

    entries
        .iter()
        .map(|(days, name, icon)| StreakMilestone {
            days: *days,
            name: (*name).to_string(),
            icon: (*icon).to_string(),
        })
        .collect()
}

/// Get a reference to the ordered milestone table
pub fn all_milestones() -> &'static [StreakMilestone] {
    &MILESTONES
}

/// The greatest milestone threshold ≤ `streak_days`, or None below 7
pub fn current_milestone(streak_days: u32) -> Option<&'static StreakMilestone> {
    MILESTONES
        .iter()
        .rev()
        .find(|m| m.days <= streak_days)
}

/// The smallest milestone threshold > `streak_days`, or None beyond 365
pub fn next_milestone(streak_days: u32) -> Option<&'static StreakMilestone> {
    MILESTONES.iter().find(|m| m.days > streak_days)
}
