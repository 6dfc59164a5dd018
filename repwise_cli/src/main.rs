use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use repwise_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "repwise")]
#[command(about = "Workout and meal logging with derived training signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a completed workout
    Workout {
        /// A set as WEIGHTxREPS or WEIGHTxREPS@RPE (repeatable)
        #[arg(long = "set", value_name = "WEIGHTxREPS[@RPE]", required = true)]
        sets: Vec<String>,

        /// Day the workout belongs to (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Log the workout as started but not finished
        #[arg(long)]
        incomplete: bool,
    },

    /// Log a meal's macros
    Meal {
        #[arg(long)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        /// Day the meal belongs to (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record sleep for a night
    Sleep {
        #[arg(long)]
        hours: f64,

        /// Day the sleep belongs to (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Configure or inspect the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Run the daily status check: streaks, recovery score, suggestions (default)
    Status,

    /// Print the protein vs. training volume series
    Chart {
        /// Number of days, ending today
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Roll up journal entries to the CSV archive
    Rollup {
        /// Clean up processed journal files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Set the full profile
    Set {
        #[arg(long)]
        protein: f64,
        #[arg(long)]
        carbs: f64,
        #[arg(long)]
        fat: f64,
        #[arg(long)]
        calories: f64,
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        sleep_goal: f64,
        /// sedentary, lightly_active, moderately_active, very_active
        #[arg(long)]
        activity_level: String,
        /// lose_weight, maintain_weight, gain_muscle
        #[arg(long)]
        goal: String,
    },

    /// Print the current profile
    Show,
}

/// Resolved file locations under the data directory
struct Paths {
    journal: PathBuf,
    state: PathBuf,
    csv: PathBuf,
    profile: PathBuf,
    journal_dir: PathBuf,
}

impl Paths {
    fn new(data_dir: &PathBuf) -> Self {
        let journal_dir = data_dir.join("journal");
        Self {
            journal: journal_dir.join("entries.jsonl"),
            state: journal_dir.join("streaks.json"),
            csv: data_dir.join("archive.csv"),
            profile: data_dir.join("profile.json"),
            journal_dir,
        }
    }
}

fn main() -> Result<()> {
    repwise_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = Paths::new(&data_dir);

    match cli.command {
        Some(Commands::Workout {
            sets,
            date,
            incomplete,
        }) => cmd_workout(&paths, &sets, date, incomplete),
        Some(Commands::Meal {
            protein,
            carbs,
            fat,
            calories,
            date,
        }) => cmd_meal(&paths, protein, carbs, fat, calories, date),
        Some(Commands::Sleep { hours, date }) => cmd_sleep(&paths, hours, date),
        Some(Commands::Profile { action }) => cmd_profile(&paths, action),
        Some(Commands::Chart { days }) => cmd_chart(&paths, days),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
        Some(Commands::Status) | None => cmd_status(&paths, &config),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cmd_workout(
    paths: &Paths,
    raw_sets: &[String],
    date: Option<NaiveDate>,
    incomplete: bool,
) -> Result<()> {
    let sets = raw_sets
        .iter()
        .map(|s| parse_set(s))
        .collect::<Result<Vec<WorkoutSet>>>()?;

    let workout = Workout {
        id: Uuid::new_v4(),
        date: date.unwrap_or_else(today),
        logged_at: Utc::now(),
        completed: !incomplete,
        sets,
    };
    let volume = workout.volume();

    let mut journal = JsonlJournal::new(&paths.journal);
    journal.append(&JournalEntry::Workout(workout))?;

    println!("✓ Workout logged ({} sets, volume {:.0})", raw_sets.len(), volume);
    Ok(())
}

fn cmd_meal(
    paths: &Paths,
    protein: f64,
    carbs: f64,
    fat: f64,
    calories: f64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let meal = Meal {
        id: Uuid::new_v4(),
        date: date.unwrap_or_else(today),
        logged_at: Utc::now(),
        protein_g: protein,
        carbs_g: carbs,
        fat_g: fat,
        calories,
    };

    let mut journal = JsonlJournal::new(&paths.journal);
    journal.append(&JournalEntry::Meal(meal))?;

    println!("✓ Meal logged ({:.0}g protein, {:.0} kcal)", protein, calories);
    Ok(())
}

fn cmd_sleep(paths: &Paths, hours: f64, date: Option<NaiveDate>) -> Result<()> {
    let record = SleepRecord {
        id: Uuid::new_v4(),
        date: date.unwrap_or_else(today),
        logged_at: Utc::now(),
        hours,
    };

    let mut journal = JsonlJournal::new(&paths.journal);
    journal.append(&JournalEntry::Sleep(record))?;

    println!("✓ Sleep logged ({:.1}h)", hours);
    Ok(())
}

fn cmd_profile(paths: &Paths, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Set {
            protein,
            carbs,
            fat,
            calories,
            weight_kg,
            sleep_goal,
            activity_level,
            goal,
        } => {
            let profile = UserProfile {
                target_protein_g: protein,
                target_carbs_g: carbs,
                target_fat_g: fat,
                target_calories: calories,
                body_weight_kg: weight_kg,
                sleep_goal_hours: sleep_goal,
                activity_level: parse_activity_level(&activity_level)?,
                primary_goal: parse_goal(&goal)?,
            };
            save_profile(&profile, &paths.profile)?;
            println!("✓ Profile saved");
            Ok(())
        }
        ProfileAction::Show => {
            match load_profile(&paths.profile)? {
                Some(profile) => {
                    println!("Targets: {:.0}g protein / {:.0}g carbs / {:.0}g fat / {:.0} kcal",
                        profile.target_protein_g,
                        profile.target_carbs_g,
                        profile.target_fat_g,
                        profile.target_calories
                    );
                    println!("Body weight: {:.1} kg", profile.body_weight_kg);
                    println!("Sleep goal: {:.1} h", profile.sleep_goal_hours);
                    println!("Activity level: {:?}", profile.activity_level);
                    println!("Primary goal: {:?}", profile.primary_goal);
                }
                None => println!("No profile configured. Run `repwise profile set`."),
            }
            Ok(())
        }
    }
}

fn cmd_status(paths: &Paths, config: &Config) -> Result<()> {
    std::fs::create_dir_all(&paths.journal_dir)?;

    let as_of = today();
    let profile = load_profile(&paths.profile)?;

    let window_start = as_of - chrono::Days::new(6);
    let summaries = daily_summaries(&paths.journal, &paths.csv, window_start, as_of)?;
    let workouts = recent_workouts(&paths.journal, &paths.csv, 30, as_of)?;

    let today_summary = summaries.iter().find(|s| s.date == as_of);
    let activity = DayActivity {
        workout: workouts.iter().any(|w| w.date == as_of),
        nutrition: today_summary.is_some_and(|s| s.has_nutrition()),
    };

    // The one stateful operation: check, then persist the snapshot
    let mut streaks = StreakData::load(&paths.state)?;
    let report = check_streak_status(&mut streaks, &activity, as_of);
    streaks.save(&paths.state)?;

    let last_workout = workouts.first().map(|w| w.date);
    let score = recovery_score(
        as_of,
        profile.as_ref(),
        today_summary.and_then(|s| s.sleep_hours),
        today_summary.map(|s| s.protein_g),
        last_workout,
        &config.recovery,
    );

    let inputs = SuggestionInputs {
        as_of,
        profile: profile.as_ref(),
        recent_summaries: &summaries,
        recovery_score: score,
        streak: &streaks,
    };
    let suggestions = generate_suggestions(&inputs, &config.suggestions);

    display_status(&report, score, &suggestions);
    Ok(())
}

fn cmd_chart(paths: &Paths, days: u32) -> Result<()> {
    let as_of = today();
    let start = as_of - chrono::Days::new(u64::from(days.saturating_sub(1)));
    let summaries = daily_summaries(&paths.journal, &paths.csv, start, as_of)?;
    let workouts = recent_workouts(&paths.journal, &paths.csv, u64::from(days), as_of)?;

    let data = build_correlation(days, as_of, &summaries, &workouts);

    println!("Protein vs. volume, {} → {}", data.start, data.end);
    for point in &data.points {
        println!(
            "{}  {:>6.0} g  {:>9.0} vol",
            point.date, point.protein_intake_g, point.workout_volume
        );
    }
    Ok(())
}

fn cmd_rollup(paths: &Paths, cleanup: bool) -> Result<()> {
    if !paths.journal.exists() {
        println!("No journal found - nothing to roll up.");
        return Ok(());
    }

    let count = repwise_core::csv_rollup::journal_to_csv_and_archive(&paths.journal, &paths.csv)?;

    println!("✓ Rolled up {} entries to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = repwise_core::csv_rollup::cleanup_processed_journals(&paths.journal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed journal files", cleaned);
        }
    }

    Ok(())
}

fn display_status(report: &StreakReport, score: Option<f64>, suggestions: &[SmartSuggestion]) {
    let data = &report.data;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DAILY STATUS                           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Streaks");
    display_dimension("Workout", &data.workout);
    display_dimension("Nutrition", &data.nutrition);
    display_dimension("Combined", &data.combined);

    for milestone in &report.crossed_milestones {
        println!();
        println!(
            "  {} Milestone reached: {} ({} days)!",
            milestone.icon, milestone.name, milestone.days
        );
    }

    if let Some(next) = next_milestone(data.workout.current) {
        println!(
            "  Next milestone: {} at {} days ({} to go)",
            next.name,
            next.days,
            next.days - data.workout.current
        );
    }

    println!();
    match score {
        Some(s) => println!("  Recovery score: {:.0}/100", s),
        None => println!("  Recovery score: unavailable (set up your profile)"),
    }

    if !suggestions.is_empty() {
        println!();
        println!("  Suggestions");
        for suggestion in suggestions {
            let marker = match suggestion.priority {
                SuggestionPriority::High => "[!]",
                SuggestionPriority::Medium => "[*]",
                SuggestionPriority::Low => "[ ]",
            };
            println!("  {} {}: {}", marker, suggestion.title, suggestion.message);
        }
    }

    println!();
}

fn display_dimension(label: &str, dim: &DimensionStreak) {
    let grace = if dim.grace_period_active() {
        "  (grace day used)"
    } else {
        ""
    };
    println!(
        "    {:<10} {:>3} current / {:>3} longest{}",
        label, dim.current, dim.longest, grace
    );
}

fn parse_activity_level(s: &str) -> Result<ActivityLevel> {
    match s.to_lowercase().as_str() {
        "sedentary" => Ok(ActivityLevel::Sedentary),
        "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
        "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
        "very_active" | "high" => Ok(ActivityLevel::VeryActive),
        other => Err(Error::Other(format!("Unknown activity level: {}", other))),
    }
}

fn parse_goal(s: &str) -> Result<PrimaryGoal> {
    match s.to_lowercase().as_str() {
        "lose_weight" | "lose" => Ok(PrimaryGoal::LoseWeight),
        "maintain_weight" | "maintain" => Ok(PrimaryGoal::MaintainWeight),
        "gain_muscle" | "gain" => Ok(PrimaryGoal::GainMuscle),
        other => Err(Error::Other(format!("Unknown goal: {}", other))),
    }
}

/// Parse a set argument of the form `WEIGHTxREPS` or `WEIGHTxREPS@RPE`
fn parse_set(raw: &str) -> Result<WorkoutSet> {
    let (body, rpe) = match raw.split_once('@') {
        Some((body, rpe)) => {
            let rpe: f64 = rpe
                .parse()
                .map_err(|_| Error::Other(format!("Invalid RPE in set '{}'", raw)))?;
            (body, Some(rpe))
        }
        None => (raw, None),
    };

    let (weight, reps) = body
        .split_once(['x', 'X'])
        .ok_or_else(|| Error::Other(format!("Invalid set '{}', expected WEIGHTxREPS", raw)))?;

    let weight_kg: f64 = weight
        .parse()
        .map_err(|_| Error::Other(format!("Invalid weight in set '{}'", raw)))?;
    let reps: u32 = reps
        .parse()
        .map_err(|_| Error::Other(format!("Invalid reps in set '{}'", raw)))?;

    Ok(WorkoutSet {
        weight_kg,
        reps,
        rpe,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_without_rpe() {
        let set = parse_set("100x5").unwrap();
        assert!((set.weight_kg - 100.0).abs() < f64::EPSILON);
        assert_eq!(set.reps, 5);
        assert!(set.rpe.is_none());
    }

    #[test]
    fn test_parse_set_with_rpe() {
        let set = parse_set("82.5x8@7.5").unwrap();
        assert!((set.weight_kg - 82.5).abs() < f64::EPSILON);
        assert_eq!(set.reps, 8);
        assert_eq!(set.rpe, Some(7.5));
    }

    #[test]
    fn test_parse_set_rejects_garbage() {
        assert!(parse_set("100").is_err());
        assert!(parse_set("abcx5").is_err());
        assert!(parse_set("100xfive").is_err());
        assert!(parse_set("100x5@max").is_err());
    }
}
