//! Integration tests for MIDI conversions

use std::fs;

use tempfile::TempDir;

use midiplay::convert::{self, convert_file, Conversion, MidiEvent, Timeline};

use crate::helpers::{multi_track_midi, simple_midi, write_fixture};

/// Events with their absolute ticks.
fn ticks(timeline: &Timeline) -> Vec<(u64, MidiEvent)> {
    timeline.events.iter().map(|e| (e.tick, e.event)).collect()
}

#[test]
fn midi_json_midi_preserves_events_and_ticks() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "multi.mid", &multi_track_midi());
    let json = dir.path().join("multi.json");
    let back = dir.path().join("back.mid");

    convert_file(&input, &json, Conversion::MidiToJson).unwrap();
    convert_file(&json, &back, Conversion::JsonToMidi).unwrap();

    let original = convert::smf::read(&multi_track_midi()).unwrap();
    let round_tripped = convert::smf::read(&fs::read(&back).unwrap()).unwrap();

    assert_eq!(round_tripped.ticks_per_beat, 480);
    assert_eq!(ticks(&round_tripped), ticks(&original));
}

#[test]
fn midi_json_midi_keeps_trailing_silence() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "bar.mid", &simple_midi());
    let json = dir.path().join("bar.json");
    let back = dir.path().join("back.mid");

    convert_file(&input, &json, Conversion::MidiToJson).unwrap();
    convert_file(&json, &back, Conversion::JsonToMidi).unwrap();

    let round_tripped = convert::smf::read(&fs::read(&back).unwrap()).unwrap();
    assert_eq!(round_tripped.end_tick, 1920);
    assert!((round_tripped.duration_seconds() - 2.0).abs() < 1e-9);
}

#[test]
fn dropped_program_change_keeps_note_timing() {
    let timeline = convert::smf::read(&multi_track_midi()).unwrap();

    assert_eq!(
        ticks(&timeline),
        vec![
            (0, MidiEvent::SetTempo { tempo: 600_000 }),
            (
                120,
                MidiEvent::NoteOn {
                    channel: 1,
                    note: 64,
                    velocity: 100
                }
            ),
            (
                360,
                MidiEvent::NoteOff {
                    channel: 1,
                    note: 64,
                    velocity: 0
                }
            ),
        ]
    );
}

#[test]
fn json_output_uses_deltas() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "multi.mid", &multi_track_midi());
    let output = dir.path().join("multi.json");

    convert_file(&input, &output, Conversion::MidiToJson).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();

    assert_eq!(value["ticks_per_beat"], 480);
    assert_eq!(value["events"][1]["NOTE_ON"]["time"], 120);
    assert_eq!(value["events"][2]["NOTE_OFF"]["time"], 240);
}

#[test]
fn midi_to_cairo_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "bar.mid", &simple_midi());
    let output = dir.path().join("bar.cairo");

    let summary = convert_file(&input, &output, Conversion::MidiToCairo).unwrap();
    assert_eq!(summary.events, 4);

    let cairo = fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(cairo, @r###"
use koji::midi::types::{Midi, Message, NoteOn, NoteOff, SetTempo, TimeSignature, ControlChange, PitchWheel, AfterTouch, PolyTouch, Modes };
use orion::numbers::FP32x32;

fn midi() -> Midi {
    Midi {
        events: array![
            Message::SET_TEMPO(SetTempo { tempo: 500000, time: Option::Some(FP32x32 { mag: 0, sign: false }) }),
            Message::TIME_SIGNATURE(TimeSignature { numerator: 4, denominator: 4, clocks_per_click: 24, time: None }),
            Message::NOTE_ON(NoteOn { channel: 0, note: 60, velocity: 100, time: FP32x32 { mag: 0, sign: false } }),
            Message::NOTE_OFF(NoteOff { channel: 0, note: 60, velocity: 0, time: FP32x32 { mag: 500000, sign: false } })
        ].span()
    }
}
"###);
}

#[test]
fn cairo_back_to_json_recovers_events() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "bar.mid", &simple_midi());
    let cairo = dir.path().join("bar.cairo");
    let json = dir.path().join("bar.json");

    convert_file(&input, &cairo, Conversion::MidiToCairo).unwrap();
    convert_file(&cairo, &json, Conversion::CairoToJson).unwrap();

    let timeline = convert::json::read(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(timeline.events.len(), 4);
    assert_eq!(timeline.ticks_per_beat, 480);
    // One beat at 120 bpm
    assert_eq!(timeline.events[3].tick, 480);
    assert!((timeline.tempo_map().seconds_at(timeline.events[3].tick) - 0.5).abs() < 1e-9);
}

#[test]
fn json_to_cairo_to_midi() {
    let dir = TempDir::new().unwrap();
    let json = write_fixture(
        dir.path(),
        "in.json",
        br#"{"events": [
            {"SET_TEMPO": {"tempo": 250000, "time": null}},
            {"NOTE_ON": {"channel": 9, "note": 36, "velocity": 127, "time": 0}},
            {"PITCH_WHEEL": {"channel": 9, "pitch": -8192, "time": 960}}
        ]}"#,
    );
    let cairo = dir.path().join("mid.cairo");
    let midi = dir.path().join("out.mid");

    convert_file(&json, &cairo, Conversion::JsonToCairo).unwrap();
    assert!(fs::read_to_string(&cairo)
        .unwrap()
        .contains("pitch: -8192, time: FP32x32 { mag: 500000, sign: false }"));

    convert_file(&cairo, &midi, Conversion::CairoToMidi).unwrap();
    let timeline = convert::smf::read(&fs::read(&midi).unwrap()).unwrap();
    assert_eq!(
        timeline.events.last().map(|e| (e.tick, e.event)),
        Some((
            960,
            MidiEvent::PitchWheel {
                channel: 9,
                pitch: -8192
            }
        ))
    );
}
