//! Recovery score computation.
//!
//! The score is a weighted composite of three sub-scores - sleep
//! adequacy, protein adequacy, and training recency - each in [0,100].
//! Missing inputs degrade gracefully to a neutral default instead of
//! penalizing the user; the function never fails for absent data.

use crate::{config::RecoveryConfig, UserProfile};
use chrono::NaiveDate;

/// Sub-score used when an optional input is absent
pub const NEUTRAL_SUBSCORE: f64 = 50.0;

/// Recency score on a day with a workout already logged (trained without rest)
const TRAINED_TODAY_SCORE: f64 = 70.0;

/// Recency penalty per rest day beyond the optimal window
const DECAY_PER_EXTRA_REST_DAY: f64 = 15.0;

/// Recency penalty per day of rest still owed before the optimal window
const UNDER_RESTED_PENALTY_PER_DAY: f64 = 30.0;

/// Recency score never decays below this after a long layoff
const MIN_RECENCY_SCORE: f64 = 20.0;

/// Compute the 0-100 recovery score as of a calendar day.
///
/// Returns `None` when no profile is configured (a legitimate state
/// before onboarding completes), never an error. Any subset of the
/// optional inputs may be absent; each absent input contributes the
/// neutral default.
pub fn recovery_score(
    as_of: NaiveDate,
    profile: Option<&UserProfile>,
    sleep_hours: Option<f64>,
    protein_g: Option<f64>,
    last_workout: Option<NaiveDate>,
    config: &RecoveryConfig,
) -> Option<f64> {
    let profile = match profile {
        Some(p) => p,
        None => {
            tracing::debug!("No profile configured, recovery score unavailable");
            return None;
        }
    };

    let sleep = sleep_hours
        .map(|h| adequacy_score(h, profile.sleep_goal_hours))
        .unwrap_or(NEUTRAL_SUBSCORE);
    let protein = protein_g
        .map(|g| adequacy_score(g, profile.target_protein_g))
        .unwrap_or(NEUTRAL_SUBSCORE);
    let recency = last_workout
        .map(|d| recency_score((as_of - d).num_days(), config))
        .unwrap_or(NEUTRAL_SUBSCORE);

    let weight_sum = config.sleep_weight + config.protein_weight + config.recency_weight;
    let score = (sleep * config.sleep_weight
        + protein * config.protein_weight
        + recency * config.recency_weight)
        / weight_sum;

    tracing::debug!(
        "Recovery score {:.1} (sleep {:.1}, protein {:.1}, recency {:.1})",
        score,
        sleep,
        protein,
        recency
    );

    Some(score.clamp(0.0, 100.0))
}

/// Ratio-to-goal sub-score: clamp(value / goal, 0, 1) × 100
fn adequacy_score(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return NEUTRAL_SUBSCORE;
    }
    (value / goal).clamp(0.0, 1.0) * 100.0
}

/// Training recency sub-score.
///
/// Peaks inside the configured optimal rest window, drops for training
/// again without rest, and decays for long layoffs down to a floor.
fn recency_score(days_since: i64, config: &RecoveryConfig) -> f64 {
    let days = days_since.max(0);

    if days < config.optimal_rest_min_days {
        let owed = config.optimal_rest_min_days - days;
        (TRAINED_TODAY_SCORE + UNDER_RESTED_PENALTY_PER_DAY
            - owed as f64 * UNDER_RESTED_PENALTY_PER_DAY)
            .clamp(0.0, 100.0)
    } else if days <= config.optimal_rest_max_days {
        100.0
    } else {
        let extra = days - config.optimal_rest_max_days;
        (100.0 - extra as f64 * DECAY_PER_EXTRA_REST_DAY).max(MIN_RECENCY_SCORE)
    }
}
