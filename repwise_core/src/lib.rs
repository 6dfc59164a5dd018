#![forbid(unsafe_code)]

//! Core domain model and derived-signal logic for Repwise.
//!
//! This crate provides:
//! - Domain types (profile, daily summaries, workouts, streaks)
//! - Streak tracking with grace windows and milestone detection
//! - Recovery scoring
//! - Protein-vs-volume correlation series
//! - Behavioral suggestion generation
//! - Persistence (journal, CSV archive, streak state, profile)
//!
//! The derived-signal functions ([`recovery_score`], [`build_correlation`],
//! [`generate_suggestions`]) are pure over immutable snapshots and safe to
//! call concurrently. [`check_streak_status`] is the single stateful
//! operation and must be single-writer per user.

pub mod types;
pub mod error;
pub mod milestones;
pub mod config;
pub mod logging;
pub mod journal;
pub mod csv_rollup;
pub mod state;
pub mod profile;
pub mod history;
pub mod streak;
pub mod recovery;
pub mod correlation;
pub mod suggestions;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use correlation::build_correlation;
pub use journal::{EntrySink, JournalEntry, JsonlJournal};
pub use history::{daily_summaries, recent_workouts};
pub use milestones::{current_milestone, next_milestone};
pub use profile::{load_profile, save_profile};
pub use recovery::recovery_score;
pub use streak::{check_streak_status, StreakReport};
pub use suggestions::{generate_suggestions, SuggestionInputs};
