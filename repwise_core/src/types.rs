//! Core domain types for Repwise.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profile and nutrition targets
//! - Daily summaries (meals + sleep rolled up per calendar day)
//! - Workouts and sets
//! - Streak state and milestones
//! - Derived-signal outputs (suggestions, correlation series)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Self-reported overall activity level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityLevel {
    /// Longest acceptable gap between workouts before a consistency
    /// suggestion fires, in calendar days.
    pub fn rest_window_days(self) -> i64 {
        match self {
            ActivityLevel::Sedentary => 4,
            ActivityLevel::LightlyActive => 3,
            ActivityLevel::ModeratelyActive => 2,
            ActivityLevel::VeryActive => 2,
        }
    }
}

/// Primary training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    LoseWeight,
    MaintainWeight,
    GainMuscle,
}

/// Per-user targets and settings. One instance, read-only to the
/// derived-signal functions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub target_protein_g: f64,
    pub target_carbs_g: f64,
    pub target_fat_g: f64,
    pub target_calories: f64,
    pub body_weight_kg: f64,
    pub sleep_goal_hours: f64,
    pub activity_level: ActivityLevel,
    pub primary_goal: PrimaryGoal,
}

// ============================================================================
// Daily Summary Types
// ============================================================================

/// Aggregated nutrition and sleep totals for one calendar day.
///
/// Keyed by `date` (unique per day). The current day may be updated in
/// place as meals are logged; past days are immutable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub calories: f64,
    pub sleep_hours: Option<f64>,
}

impl DailySummary {
    /// An empty summary for a day with no logged entries
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            calories: 0.0,
            sleep_hours: None,
        }
    }

    /// Whether any nutrition was logged for this day
    pub fn has_nutrition(&self) -> bool {
        self.protein_g > 0.0 || self.carbs_g > 0.0 || self.fat_g > 0.0 || self.calories > 0.0
    }
}

// ============================================================================
// Workout and Meal Types
// ============================================================================

/// A single set within a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub weight_kg: f64,
    pub reps: u32,
    pub rpe: Option<f64>,
}

/// A logged workout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub date: NaiveDate,
    pub logged_at: DateTime<Utc>,
    pub completed: bool,
    pub sets: Vec<WorkoutSet>,
}

impl Workout {
    /// Training volume: Σ(weight × reps) over all sets
    pub fn volume(&self) -> f64 {
        self.sets
            .iter()
            .map(|s| s.weight_kg * f64::from(s.reps))
            .sum()
    }
}

/// A logged meal (macros only; food identity is out of scope)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub date: NaiveDate,
    pub logged_at: DateTime<Utc>,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub calories: f64,
}

/// A sleep record for one night
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub logged_at: DateTime<Utc>,
    pub hours: f64,
}

// ============================================================================
// Streak Types
// ============================================================================

/// Streak counters and grace state for one dimension (workout,
/// nutrition, or combined).
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct DimensionStreak {
    pub current: u32,
    pub longest: u32,
    pub last_activity: Option<NaiveDate>,
    /// Whether the one-time grace token has been spent since this streak
    /// began. Cleared only when the streak breaks and restarts.
    pub grace_used: bool,
    /// The missed day the grace token covered, if any
    pub grace_date: Option<NaiveDate>,
}

impl DimensionStreak {
    /// Whether a consumed grace period is currently keeping the streak alive
    pub fn grace_period_active(&self) -> bool {
        self.grace_used && self.current > 0
    }
}

/// Singleton per-user streak state. Mutated exclusively by
/// [`crate::streak::check_streak_status`].
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct StreakData {
    pub workout: DimensionStreak,
    pub nutrition: DimensionStreak,
    pub combined: DimensionStreak,
    /// Highest workout-streak milestone already celebrated. Monotonically
    /// non-decreasing; a threshold at or below this value never fires again.
    pub last_celebrated_milestone: u32,
}

/// A fixed streak-length threshold marking a celebratory event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StreakMilestone {
    pub days: u32,
    pub name: String,
    pub icon: String,
}

/// Which dimension a streak fact refers to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreakDimension {
    Workout,
    Nutrition,
    Combined,
}

impl StreakDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            StreakDimension::Workout => "workout",
            StreakDimension::Nutrition => "nutrition",
            StreakDimension::Combined => "combined",
        }
    }
}

/// Qualifying activity observed for the day under check
#[derive(Clone, Copy, Debug, Default)]
pub struct DayActivity {
    pub workout: bool,
    pub nutrition: bool,
}

// ============================================================================
// Derived-Signal Output Types
// ============================================================================

/// Suggestion category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Recovery,
    Nutrition,
    Progression,
    Consistency,
    Sleep,
}

/// Suggestion priority, highest first
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

impl SuggestionPriority {
    /// Sort rank: lower sorts first
    pub fn rank(self) -> u8 {
        match self {
            SuggestionPriority::High => 0,
            SuggestionPriority::Medium => 1,
            SuggestionPriority::Low => 2,
        }
    }
}

/// An ephemeral behavioral suggestion. Never persisted.
///
/// `id` is a stable per-rule slug so identical inputs always produce an
/// identical suggestion list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SmartSuggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub priority: SuggestionPriority,
    pub title: String,
    pub message: String,
    pub actionable: bool,
}

/// One day's paired protein intake and training volume
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub protein_intake_g: f64,
    pub workout_volume: f64,
}

/// A dense, gap-filled daily series of protein vs. volume for charting
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CorrelationData {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<CorrelationPoint>,
}
