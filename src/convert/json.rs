//! JSON event list format.
//!
//! ```json
//! {
//!     "ticks_per_beat": 480,
//!     "events": [
//!         { "NOTE_ON": { "channel": 0, "note": 60, "velocity": 100, "time": 0 } }
//!     ]
//! }
//! ```
//!
//! `time` is the delta in ticks from the previous event. Tempo and time
//! signature events accept `null` for a zero delta. `end_time`, when present,
//! is the delta from the last event to the end of the track.

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::timeline::{MidiEvent, Timeline, DEFAULT_TICKS_PER_BEAT};

#[derive(Debug, Serialize, Deserialize)]
struct JsonDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ticks_per_beat: Option<u16>,
    events: Vec<JsonEvent>,
    /// Trailing silence after the last event, in ticks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<u64>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum JsonEvent {
    #[serde(rename = "NOTE_ON")]
    NoteOn {
        channel: u8,
        note: u8,
        velocity: u8,
        time: u64,
    },
    #[serde(rename = "NOTE_OFF")]
    NoteOff {
        channel: u8,
        note: u8,
        velocity: u8,
        time: u64,
    },
    #[serde(rename = "SET_TEMPO")]
    SetTempo {
        tempo: u32,
        #[serde(default)]
        time: Option<u64>,
    },
    #[serde(rename = "TIME_SIGNATURE")]
    TimeSignature {
        numerator: u8,
        denominator: u8,
        clocks_per_click: u8,
        #[serde(default)]
        time: Option<u64>,
    },
    #[serde(rename = "CONTROL_CHANGE")]
    ControlChange {
        channel: u8,
        control: u8,
        value: u8,
        time: u64,
    },
    #[serde(rename = "PITCH_WHEEL")]
    PitchWheel { channel: u8, pitch: i16, time: u64 },
    #[serde(rename = "AFTER_TOUCH")]
    AfterTouch { channel: u8, value: u8, time: u64 },
    #[serde(rename = "POLY_TOUCH")]
    PolyTouch {
        channel: u8,
        note: u8,
        value: u8,
        time: u64,
    },
}

impl JsonEvent {
    fn new(event: &MidiEvent, time: u64) -> Self {
        match *event {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => JsonEvent::NoteOn {
                channel,
                note,
                velocity,
                time,
            },
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => JsonEvent::NoteOff {
                channel,
                note,
                velocity,
                time,
            },
            MidiEvent::SetTempo { tempo } => JsonEvent::SetTempo {
                tempo,
                time: Some(time),
            },
            MidiEvent::TimeSignature {
                numerator,
                denominator,
                clocks_per_click,
            } => JsonEvent::TimeSignature {
                numerator,
                denominator,
                clocks_per_click,
                time: Some(time),
            },
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => JsonEvent::ControlChange {
                channel,
                control,
                value,
                time,
            },
            MidiEvent::PitchWheel { channel, pitch } => JsonEvent::PitchWheel {
                channel,
                pitch,
                time,
            },
            MidiEvent::AfterTouch { channel, value } => JsonEvent::AfterTouch {
                channel,
                value,
                time,
            },
            MidiEvent::PolyTouch {
                channel,
                note,
                value,
            } => JsonEvent::PolyTouch {
                channel,
                note,
                value,
                time,
            },
        }
    }

    /// Split into the timeline event and its delta.
    fn split(self) -> (MidiEvent, u64) {
        match self {
            JsonEvent::NoteOn {
                channel,
                note,
                velocity,
                time,
            } => (
                MidiEvent::NoteOn {
                    channel,
                    note,
                    velocity,
                },
                time,
            ),
            JsonEvent::NoteOff {
                channel,
                note,
                velocity,
                time,
            } => (
                MidiEvent::NoteOff {
                    channel,
                    note,
                    velocity,
                },
                time,
            ),
            JsonEvent::SetTempo { tempo, time } => {
                (MidiEvent::SetTempo { tempo }, time.unwrap_or(0))
            }
            JsonEvent::TimeSignature {
                numerator,
                denominator,
                clocks_per_click,
                time,
            } => (
                MidiEvent::TimeSignature {
                    numerator,
                    denominator,
                    clocks_per_click,
                },
                time.unwrap_or(0),
            ),
            JsonEvent::ControlChange {
                channel,
                control,
                value,
                time,
            } => (
                MidiEvent::ControlChange {
                    channel,
                    control,
                    value,
                },
                time,
            ),
            JsonEvent::PitchWheel {
                channel,
                pitch,
                time,
            } => (MidiEvent::PitchWheel { channel, pitch }, time),
            JsonEvent::AfterTouch {
                channel,
                value,
                time,
            } => (MidiEvent::AfterTouch { channel, value }, time),
            JsonEvent::PolyTouch {
                channel,
                note,
                value,
                time,
            } => (
                MidiEvent::PolyTouch {
                    channel,
                    note,
                    value,
                },
                time,
            ),
        }
    }
}

/// Render a timeline as pretty-printed JSON (4-space indent).
pub fn write(timeline: &Timeline) -> Result<String> {
    let last_tick = timeline.events.last().map(|e| e.tick).unwrap_or(0);
    let trailing = timeline.end_tick.saturating_sub(last_tick);
    let doc = JsonDocument {
        ticks_per_beat: Some(timeline.ticks_per_beat),
        events: timeline
            .deltas()
            .map(|(delta, event)| JsonEvent::new(event, delta))
            .collect(),
        end_time: (trailing > 0).then_some(trailing),
    };

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Parse a JSON event list.
pub fn read(input: &str) -> Result<Timeline> {
    let doc: JsonDocument = serde_json::from_str(input)?;

    let mut timeline = Timeline::new(doc.ticks_per_beat.unwrap_or(DEFAULT_TICKS_PER_BEAT));
    let mut tick = 0u64;
    for event in doc.events {
        let (event, delta) = event.split();
        event.validate()?;
        tick = tick.saturating_add(delta);
        timeline.push(tick, event);
    }
    if let Some(trailing) = doc.end_time {
        timeline.end_tick = timeline.end_tick.max(tick.saturating_add(trailing));
    }
    Ok(timeline)
}
