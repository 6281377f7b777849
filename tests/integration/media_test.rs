//! Integration tests for media probing and the player controller

use std::path::Path;

use tempfile::TempDir;

use midiplay::media::{probe, MediaError, MediaKind};
use midiplay::player::{load_controller, Transport};

use crate::helpers::{multi_track_midi, simple_midi, wav_bytes, write_fixture};

#[test]
fn probe_midi_uses_tempo_map() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "multi.mid", &multi_track_midi());

    let info = probe(&path).unwrap();
    assert_eq!(info.kind, MediaKind::Midi);
    // 360 ticks at 480 tpb and 0.6s per beat
    assert!((info.duration_seconds - 0.45).abs() < 1e-9);
}

#[test]
fn probe_wav_is_frames_over_rate() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "tone.wav", &wav_bytes(44_100, 88_200));

    let info = probe(&path).unwrap();
    assert_eq!(info.kind, MediaKind::Audio);
    assert!((info.duration_seconds - 2.0).abs() < 1e-9);
}

#[test]
fn probe_missing_wav_is_io_error() {
    let err = probe(Path::new("/nonexistent/tone.wav")).unwrap_err();
    assert!(matches!(err, MediaError::Io { .. }));
}

#[test]
fn loaded_controller_seeks_through_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "bar.mid", &simple_midi());

    let (mut controller, title) = load_controller(&path);
    assert_eq!(title, "bar.mid (MIDI)");
    assert!(controller.is_available());
    assert!((controller.state().duration_seconds - 2.0).abs() < 1e-9);

    controller.seek(25.0);
    assert!((controller.state().elapsed_seconds - 0.5).abs() < 1e-9);
    assert_eq!(controller.percentage(), 25.0);

    controller.play();
    assert_eq!(controller.transport(), Transport::Playing);
    controller.play();
    assert_eq!(controller.transport(), Transport::Paused);
    assert!(controller.state().elapsed_seconds >= 0.49);
}

#[test]
fn unloadable_file_disables_transport() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "noise.wav", b"definitely not audio");

    let (mut controller, _) = load_controller(&path);
    controller.play();

    assert!(!controller.is_available());
    assert_eq!(controller.transport(), Transport::Paused);
}

#[test]
fn loaded_wav_seeks_with_or_without_a_device() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "tone.wav", &wav_bytes(44_100, 88_200));

    let (mut controller, title) = load_controller(&path);
    assert_eq!(title, "tone.wav (audio)");
    assert!(controller.is_available());
    assert!((controller.state().duration_seconds - 2.0).abs() < 1e-9);

    controller.seek(50.0);
    assert!((controller.state().elapsed_seconds - 1.0).abs() < 1e-9);

    controller.play();
    assert_eq!(controller.transport(), Transport::Playing);
    assert_eq!(controller.volume(), 0.1);
    controller.play();
    assert_eq!(controller.transport(), Transport::Paused);
}
