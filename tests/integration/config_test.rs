//! Integration tests for the config subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn midiplay_with_config(path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("midiplay").expect("midiplay binary");
    cmd.env("MIDIPLAY_CONFIG", path);
    cmd
}

#[test]
fn show_prints_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    midiplay_with_config(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[player]"))
        .stdout(predicate::str::contains("progress_interval_ms = 250"))
        .stdout(predicate::str::contains("seek_step_secs = 5.0"));

    assert!(!path.exists());
}

#[test]
fn init_writes_file_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    midiplay_with_config(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(path.exists());

    std::fs::write(&path, "[player]\nseek_step_secs = 1.5\n").unwrap();

    midiplay_with_config(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    midiplay_with_config(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seek_step_secs = 1.5"));
}

#[test]
fn show_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player\n").unwrap();

    midiplay_with_config(&path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
