//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use midly::num::{u15, u24, u28, u4, u7};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
};

fn event(delta: u32, kind: TrackEventKind<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::from(delta),
        kind,
    }
}

fn note(channel: u8, key: u8, on: bool) -> TrackEventKind<'static> {
    let message = if on {
        MidiMessage::NoteOn {
            key: u7::from(key),
            vel: u7::from(100),
        }
    } else {
        MidiMessage::NoteOff {
            key: u7::from(key),
            vel: u7::from(0),
        }
    };
    TrackEventKind::Midi {
        channel: u4::from(channel),
        message,
    }
}

/// One-bar MIDI file at 480 ticks per beat and 120 bpm.
///
/// Tempo, 4/4 time signature, then middle C held for one beat. Lasts 2s
/// (the end of track is at tick 1920).
pub fn simple_midi() -> Vec<u8> {
    let track = vec![
        event(0, TrackEventKind::Meta(MetaMessage::Tempo(u24::from(500_000)))),
        event(0, TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8))),
        event(0, note(0, 60, true)),
        event(480, note(0, 60, false)),
        event(1440, TrackEventKind::Meta(MetaMessage::EndOfTrack)),
    ];
    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(u15::from(480))),
        tracks: vec![track],
    };
    let mut bytes = Vec::new();
    smf.write(&mut bytes).expect("write fixture midi");
    bytes
}

/// Two-track MIDI file with a program change that conversions drop.
pub fn multi_track_midi() -> Vec<u8> {
    let conductor = vec![
        event(0, TrackEventKind::Meta(MetaMessage::Tempo(u24::from(600_000)))),
        event(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)),
    ];
    let piano = vec![
        event(
            0,
            TrackEventKind::Midi {
                channel: u4::from(1),
                message: MidiMessage::ProgramChange {
                    program: u7::from(5),
                },
            },
        ),
        event(120, note(1, 64, true)),
        event(240, note(1, 64, false)),
        event(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)),
    ];
    let smf = Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(u15::from(480))),
        tracks: vec![conductor, piano],
    };
    let mut bytes = Vec::new();
    smf.write(&mut bytes).expect("write fixture midi");
    bytes
}

/// Minimal 16-bit PCM mono WAV of silence.
pub fn wav_bytes(sample_rate: u32, frames: u32) -> Vec<u8> {
    let data_len = frames * 2;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(bytes.len() + data_len as usize, 0);
    bytes
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write fixture");
    path
}
