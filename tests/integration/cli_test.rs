//! Integration tests for the midiplay CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{simple_midi, wav_bytes, write_fixture};

fn midiplay() -> Command {
    let mut cmd = Command::cargo_bin("midiplay").expect("midiplay binary");
    cmd.env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    midiplay()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn convert_help_lists_conversions() {
    midiplay()
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("midi-to-json"))
        .stdout(predicate::str::contains("cairo-to-midi"));
}

#[test]
fn version_includes_build_date() {
    midiplay()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("midiplay 0.1.0"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn play_without_file_is_usage_error() {
    midiplay()
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn play_missing_file_fails_before_entering_terminal() {
    midiplay()
        .args(["play", "/nonexistent/song.mid"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn convert_unknown_conversion_is_rejected() {
    midiplay()
        .args(["convert", "a.mid", "b.json", "--conversion", "midi-to-mp3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("midi-to-mp3"));
}

#[test]
fn info_on_corrupt_midi_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "broken.mid", b"MThd garbage");

    midiplay()
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

// ============================================================================
// Info Tests
// ============================================================================

#[test]
fn info_reports_midi_duration() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "bar.mid", &simple_midi());

    midiplay()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bar.mid"))
        .stdout(predicate::str::contains("MIDI"))
        .stdout(predicate::str::contains("00:02 (2.000s)"));
}

#[test]
fn info_reports_wav_duration() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "tone.wav", &wav_bytes(8000, 12000));

    midiplay()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("audio"))
        .stdout(predicate::str::contains("1.500s"));
}

// ============================================================================
// Convert Tests
// ============================================================================

#[test]
fn convert_prints_confirmation_and_writes_output() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "bar.mid", &simple_midi());
    let output = dir.path().join("bar.json");

    midiplay()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--conversion", "midi-to-json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(MIDI) to"))
        .stdout(predicate::str::contains("(JSON): 4 events"));

    assert!(output.exists());
}

#[test]
fn convert_invalid_json_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "bad.json", b"{ not json");

    midiplay()
        .arg("convert")
        .arg(&input)
        .arg(dir.path().join("out.mid"))
        .args(["-c", "json-to-midi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to convert"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_for_bash() {
    midiplay()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("midiplay"));
}
