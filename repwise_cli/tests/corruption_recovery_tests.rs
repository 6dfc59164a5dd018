//! Corruption recovery tests for the repwise binary.
//!
//! These tests verify the system can handle:
//! - Corrupted streak state files
//! - Corrupted journal files
//! - Partial journal writes (crash mid-append)

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("repwise"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_streak_state_starts_fresh() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(data_dir.join("journal")).unwrap();
    fs::write(data_dir.join("journal/streaks.json"), "{ invalid json }}}}")
        .expect("Failed to write corrupted state");

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout      0 current"));
}

#[test]
fn test_corrupted_journal_lines_ignored_during_read() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(data_dir.join("journal")).unwrap();
    fs::write(
        data_dir.join("journal/entries.jsonl"),
        "{ invalid json }\n{ more invalid }\n",
    )
    .expect("Failed to write corrupted journal");

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("chart")
        .args(["--days", "3"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();
}

#[test]
fn test_partial_journal_line_does_not_block_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Simulate a crash during append: valid line, then a truncated one
    fs::create_dir_all(data_dir.join("journal")).unwrap();
    let journal_path = data_dir.join("journal/entries.jsonl");
    let mut file = fs::File::create(&journal_path).unwrap();
    writeln!(file, "{{ \"kind\": \"meal\", \"truncat").unwrap();
    drop(file);

    // New entries still append and read back fine
    cli()
        .arg("meal")
        .args(["--protein", "35", "--calories", "420"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nutrition    1 current"));
}

#[test]
fn test_corrupted_profile_treated_as_unconfigured() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("profile.json"), "not even json").unwrap();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable"));
}
