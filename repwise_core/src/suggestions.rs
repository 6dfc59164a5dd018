//! Behavioral suggestion rule set.
//!
//! A fixed, ordered list of side-effect-free rules is evaluated against
//! recent summaries, the recovery score, and streak state. Every rule
//! that matches fires exactly once per call. The output is sorted by
//! priority tier and, within a tier, by rule evaluation order, so the
//! result is fully deterministic for identical inputs.
//!
//! Missing daily summaries inside the lookback window count as zero
//! intake, per the data-gap convention used throughout the core.

use crate::{
    config::SuggestionConfig, milestones, DailySummary, SmartSuggestion, StreakData,
    SuggestionKind, SuggestionPriority, UserProfile,
};
use chrono::{Days, NaiveDate};

/// Days a milestone may be away before the nudge rule fires
const MILESTONE_NUDGE_DAYS: u32 = 2;

/// Combined streak length that earns positive reinforcement
const PRAISE_COMBINED_STREAK: u32 = 14;

/// Workout streak required before a progression nudge makes sense
const PROGRESSION_MIN_STREAK: u32 = 3;

/// Calendar days of intake history the chronic-calorie rule looks at
const CALORIE_LOOKBACK_DAYS: u64 = 7;

/// Immutable inputs to one generation pass
#[derive(Clone, Copy, Debug)]
pub struct SuggestionInputs<'a> {
    pub as_of: NaiveDate,
    /// None before onboarding completes; suggestions are then unavailable
    pub profile: Option<&'a UserProfile>,
    /// Daily summaries for the recent window, any order
    pub recent_summaries: &'a [DailySummary],
    pub recovery_score: Option<f64>,
    pub streak: &'a StreakData,
}

/// Evaluate the rule set and return the ranked suggestion list.
///
/// Returns an empty list when no profile is configured; that is the
/// documented "unavailable" result, not an error.
pub fn generate_suggestions(
    inputs: &SuggestionInputs<'_>,
    config: &SuggestionConfig,
) -> Vec<SmartSuggestion> {
    let Some(profile) = inputs.profile else {
        tracing::debug!("No profile configured, skipping suggestion generation");
        return Vec::new();
    };

    // Rule evaluation order is part of the contract: stable sort below
    // preserves it within each priority tier.
    let rules: [fn(&RuleContext<'_>) -> Option<SmartSuggestion>; 8] = [
        rule_low_recovery,
        rule_sleep_below_goal,
        rule_protein_shortfall,
        rule_calories_chronically_under,
        rule_overdue_workout,
        rule_milestone_within_reach,
        rule_combined_streak_praise,
        rule_progression_ready,
    ];

    let ctx = RuleContext {
        inputs,
        profile,
        config,
    };

    let mut suggestions: Vec<SmartSuggestion> =
        rules.iter().filter_map(|rule| rule(&ctx)).collect();
    suggestions.sort_by_key(|s| s.priority.rank());

    tracing::debug!("Generated {} suggestions", suggestions.len());
    suggestions
}

struct RuleContext<'a> {
    inputs: &'a SuggestionInputs<'a>,
    profile: &'a UserProfile,
    config: &'a SuggestionConfig,
}

impl RuleContext<'_> {
    fn summary_for(&self, date: NaiveDate) -> Option<&DailySummary> {
        self.inputs.recent_summaries.iter().find(|s| s.date == date)
    }

    /// Protein intake for a day, zero when no summary exists
    fn protein_on(&self, date: NaiveDate) -> f64 {
        self.summary_for(date).map_or(0.0, |s| s.protein_g)
    }
}

fn suggestion(
    id: &str,
    kind: SuggestionKind,
    priority: SuggestionPriority,
    title: &str,
    message: String,
    actionable: bool,
) -> SmartSuggestion {
    SmartSuggestion {
        id: id.to_string(),
        kind,
        priority,
        title: title.to_string(),
        message,
        actionable,
    }
}

fn rule_low_recovery(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let score = ctx.inputs.recovery_score?;
    if score >= ctx.config.low_recovery_threshold {
        return None;
    }
    Some(suggestion(
        "low-recovery",
        SuggestionKind::Recovery,
        SuggestionPriority::High,
        "Take it easy today",
        format!(
            "Your recovery score is {:.0}. A light session or full rest day will pay off.",
            score
        ),
        true,
    ))
}

fn rule_sleep_below_goal(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let today = ctx.summary_for(ctx.inputs.as_of)?;
    let hours = today.sleep_hours?;
    if hours >= ctx.profile.sleep_goal_hours {
        return None;
    }
    Some(suggestion(
        "sleep-below-goal",
        SuggestionKind::Sleep,
        SuggestionPriority::Medium,
        "Short on sleep",
        format!(
            "You slept {:.1}h against a {:.1}h goal. An earlier night helps recovery more than any supplement.",
            hours, ctx.profile.sleep_goal_hours
        ),
        true,
    ))
}

fn rule_protein_shortfall(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let days = ctx.config.protein_shortfall_days;
    if days == 0 {
        return None;
    }

    let all_under = (0..days).all(|back| {
        let date = ctx.inputs.as_of - Days::new(back as u64);
        ctx.protein_on(date) < ctx.profile.target_protein_g
    });
    if !all_under {
        return None;
    }

    Some(suggestion(
        "protein-shortfall",
        SuggestionKind::Nutrition,
        SuggestionPriority::High,
        "Protein is lagging",
        format!(
            "Protein has been under your {:.0}g target for {} days running. Front-load it at breakfast.",
            ctx.profile.target_protein_g, days
        ),
        true,
    ))
}

fn rule_calories_chronically_under(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    // Needs some logged intake to say anything meaningful
    if !ctx.inputs.recent_summaries.iter().any(|s| s.has_nutrition()) {
        return None;
    }

    let total: f64 = (0..CALORIE_LOOKBACK_DAYS)
        .map(|back| {
            let date = ctx.inputs.as_of - Days::new(back);
            ctx.summary_for(date).map_or(0.0, |s| s.calories)
        })
        .sum();
    let mean = total / CALORIE_LOOKBACK_DAYS as f64;

    if mean >= ctx.profile.target_calories * ctx.config.calorie_adequacy_ratio {
        return None;
    }

    Some(suggestion(
        "calories-under",
        SuggestionKind::Nutrition,
        SuggestionPriority::Medium,
        "Eating below target",
        format!(
            "Average intake over the last week is {:.0} kcal against a {:.0} kcal target.",
            mean, ctx.profile.target_calories
        ),
        true,
    ))
}

fn rule_overdue_workout(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let window = ctx.profile.activity_level.rest_window_days();
    let overdue = match ctx.inputs.streak.workout.last_activity {
        Some(last) => (ctx.inputs.as_of - last).num_days() > window,
        None => true,
    };
    if !overdue {
        return None;
    }
    Some(suggestion(
        "overdue-workout",
        SuggestionKind::Consistency,
        SuggestionPriority::High,
        "Time to train",
        format!(
            "No workout logged in over {} days. Even a short session keeps the habit alive.",
            window
        ),
        true,
    ))
}

fn rule_milestone_within_reach(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let current = ctx.inputs.streak.workout.current;
    if current == 0 {
        return None;
    }
    let next = milestones::next_milestone(current)?;
    let remaining = next.days - current;
    if remaining > MILESTONE_NUDGE_DAYS {
        return None;
    }
    Some(suggestion(
        "milestone-within-reach",
        SuggestionKind::Consistency,
        SuggestionPriority::Medium,
        "Milestone in sight",
        format!(
            "{} more day(s) to {} {}. Don't break the chain now.",
            remaining, next.name, next.icon
        ),
        false,
    ))
}

fn rule_combined_streak_praise(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let current = ctx.inputs.streak.combined.current;
    if current < PRAISE_COMBINED_STREAK {
        return None;
    }
    Some(suggestion(
        "combined-streak-praise",
        SuggestionKind::Consistency,
        SuggestionPriority::Low,
        "Training and nutrition in sync",
        format!(
            "{} straight days of logging both workouts and meals. This is how results happen.",
            current
        ),
        false,
    ))
}

fn rule_progression_ready(ctx: &RuleContext<'_>) -> Option<SmartSuggestion> {
    let score = ctx.inputs.recovery_score?;
    if score < ctx.config.high_recovery_threshold
        || ctx.inputs.streak.workout.current < PROGRESSION_MIN_STREAK
    {
        return None;
    }
    Some(suggestion(
        "progression-ready",
        SuggestionKind::Progression,
        SuggestionPriority::Low,
        "Ready to push",
        format!(
            "Recovery is at {:.0} and your streak is {} days. Consider adding a set or a little weight.",
            score, ctx.inputs.streak.workout.current
        ),
        true,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityLevel, DimensionStreak, PrimaryGoal};

    fn test_profile() -> UserProfile {
        UserProfile {
            target_protein_g: 150.0,
            target_carbs_g: 250.0,
            target_fat_g: 70.0,
            target_calories: 2400.0,
            body_weight_kg: 80.0,
            sleep_goal_hours: 8.0,
            activity_level: ActivityLevel::ModeratelyActive,
            primary_goal: PrimaryGoal::GainMuscle,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
    }

    fn summary(back: u64, protein: f64, calories: f64, sleep: Option<f64>) -> DailySummary {
        DailySummary {
            date: today().checked_sub_days(Days::new(back)).unwrap(),
            protein_g: protein,
            carbs_g: 0.0,
            fat_g: 0.0,
            calories,
            sleep_hours: sleep,
        }
    }

    fn streak_with_workout(current: u32, last_back: u64) -> StreakData {
        StreakData {
            workout: DimensionStreak {
                current,
                longest: current,
                last_activity: Some(today().checked_sub_days(Days::new(last_back)).unwrap()),
                grace_used: false,
                grace_date: None,
            },
            ..StreakData::default()
        }
    }

    #[test]
    fn test_no_profile_yields_empty_list() {
        let streak = StreakData::default();
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: None,
            recent_summaries: &[],
            recovery_score: Some(30.0),
            streak: &streak,
        };

        let out = generate_suggestions(&inputs, &SuggestionConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_low_recovery_fires_high_priority() {
        let profile = test_profile();
        let summaries = [summary(0, 160.0, 2500.0, Some(8.0))];
        let streak = streak_with_workout(5, 0);
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &summaries,
            recovery_score: Some(25.0),
            streak: &streak,
        };

        let out = generate_suggestions(&inputs, &SuggestionConfig::default());
        assert_eq!(out[0].id, "low-recovery");
        assert_eq!(out[0].priority, SuggestionPriority::High);
    }

    #[test]
    fn test_protein_shortfall_needs_consecutive_days() {
        let profile = test_profile();
        let streak = streak_with_workout(5, 0);
        let config = SuggestionConfig::default();

        // Three straight days under target (missing days count as zero)
        let under = [summary(0, 90.0, 2500.0, None), summary(2, 80.0, 2500.0, None)];
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &under,
            recovery_score: Some(60.0),
            streak: &streak,
        };
        let out = generate_suggestions(&inputs, &config);
        assert!(out.iter().any(|s| s.id == "protein-shortfall"));

        // One adequate day inside the window breaks the run
        let mixed = [
            summary(0, 90.0, 2500.0, None),
            summary(1, 170.0, 2500.0, None),
            summary(2, 80.0, 2500.0, None),
        ];
        let inputs = SuggestionInputs {
            recent_summaries: &mixed,
            ..inputs
        };
        let out = generate_suggestions(&inputs, &config);
        assert!(!out.iter().any(|s| s.id == "protein-shortfall"));
    }

    #[test]
    fn test_overdue_workout_respects_rest_window() {
        let profile = test_profile(); // moderately active: 2-day window
        let summaries = [summary(0, 160.0, 2500.0, Some(8.0))];
        let config = SuggestionConfig::default();

        let fresh = streak_with_workout(3, 1);
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &summaries,
            recovery_score: None,
            streak: &fresh,
        };
        let out = generate_suggestions(&inputs, &config);
        assert!(!out.iter().any(|s| s.id == "overdue-workout"));

        let stale = streak_with_workout(0, 5);
        let inputs = SuggestionInputs {
            streak: &stale,
            ..inputs
        };
        let out = generate_suggestions(&inputs, &config);
        assert!(out.iter().any(|s| s.id == "overdue-workout"));
    }

    #[test]
    fn test_milestone_nudge_when_close() {
        let profile = test_profile();
        let summaries = [summary(0, 160.0, 2500.0, Some(8.0))];
        let streak = streak_with_workout(6, 0);
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &summaries,
            recovery_score: Some(60.0),
            streak: &streak,
        };

        let out = generate_suggestions(&inputs, &SuggestionConfig::default());
        let nudge = out.iter().find(|s| s.id == "milestone-within-reach").unwrap();
        assert!(nudge.message.contains("One Week Strong"));
    }

    #[test]
    fn test_output_sorted_by_priority_then_rule_order() {
        let profile = test_profile();
        // Low recovery (high), protein run (high), overdue workout (high),
        // short sleep (medium), low calories (medium)
        let summaries = [summary(0, 50.0, 2600.0, Some(5.0))];
        let streak = streak_with_workout(0, 6);
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &summaries,
            recovery_score: Some(20.0),
            streak: &streak,
        };

        let out = generate_suggestions(&inputs, &SuggestionConfig::default());
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "low-recovery",
                "protein-shortfall",
                "overdue-workout",
                "sleep-below-goal",
                "calories-under",
            ]
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let profile = test_profile();
        let summaries = [summary(0, 50.0, 1200.0, Some(5.0)), summary(1, 60.0, 1500.0, None)];
        let streak = streak_with_workout(6, 0);
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &summaries,
            recovery_score: Some(35.0),
            streak: &streak,
        };
        let config = SuggestionConfig::default();

        let first = generate_suggestions(&inputs, &config);
        let second = generate_suggestions(&inputs, &config);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_progression_rule_needs_recovery_and_streak() {
        let profile = test_profile();
        let summaries = [summary(0, 160.0, 2500.0, Some(8.0))];
        let streak = streak_with_workout(10, 0);
        let inputs = SuggestionInputs {
            as_of: today(),
            profile: Some(&profile),
            recent_summaries: &summaries,
            recovery_score: Some(90.0),
            streak: &streak,
        };

        let out = generate_suggestions(&inputs, &SuggestionConfig::default());
        assert!(out.iter().any(|s| s.id == "progression-ready"));

        let inputs = SuggestionInputs {
            recovery_score: Some(50.0),
            ..inputs
        };
        let out = generate_suggestions(&inputs, &SuggestionConfig::default());
        assert!(!out.iter().any(|s| s.id == "progression-ready"));
    }
}
