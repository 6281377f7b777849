//! Standard MIDI File reading and writing via `midly`.

use midly::num::{u14, u15, u24, u28, u4, u7};
use midly::{
    Format, Header, MetaMessage, MidiMessage, PitchBend, Smf, Timing, TrackEvent,
    TrackEventKind,
};
use tracing::debug;

use super::error::{ConvertError, Result};
use super::timeline::{MidiEvent, Timeline};

/// Largest delta-time an SMF event can carry (28-bit VLQ).
const MAX_DELTA: u64 = (1 << 28) - 1;

/// Map an SMF event to a timeline event, if it is one we carry.
fn event_from_kind(kind: &TrackEventKind<'_>) -> Option<MidiEvent> {
    match *kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            let event = match message {
                MidiMessage::NoteOn { key, vel } => MidiEvent::NoteOn {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::NoteOff { key, vel } => MidiEvent::NoteOff {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::Controller { controller, value } => MidiEvent::ControlChange {
                    channel,
                    control: controller.as_int(),
                    value: value.as_int(),
                },
                MidiMessage::PitchBend { bend } => MidiEvent::PitchWheel {
                    channel,
                    pitch: bend.0.as_int() as i16 - 0x2000,
                },
                MidiMessage::ChannelAftertouch { vel } => MidiEvent::AfterTouch {
                    channel,
                    value: vel.as_int(),
                },
                MidiMessage::Aftertouch { key, vel } => MidiEvent::PolyTouch {
                    channel,
                    note: key.as_int(),
                    value: vel.as_int(),
                },
                MidiMessage::ProgramChange { .. } => return None,
            };
            Some(event)
        }
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Some(MidiEvent::SetTempo {
            tempo: tempo.as_int(),
        }),
        TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, power, clocks, _)) => {
            Some(MidiEvent::TimeSignature {
                numerator,
                denominator: 1u8.checked_shl(power.into()).unwrap_or(0),
                clocks_per_click: clocks,
            })
        }
        _ => None,
    }
}

fn kind_from_event(event: &MidiEvent) -> TrackEventKind<'static> {
    let midi = |channel: u8, message: MidiMessage| TrackEventKind::Midi {
        channel: u4::from(channel),
        message,
    };
    match *event {
        MidiEvent::NoteOn {
            channel,
            note,
            velocity,
        } => midi(
            channel,
            MidiMessage::NoteOn {
                key: u7::from(note),
                vel: u7::from(velocity),
            },
        ),
        MidiEvent::NoteOff {
            channel,
            note,
            velocity,
        } => midi(
            channel,
            MidiMessage::NoteOff {
                key: u7::from(note),
                vel: u7::from(velocity),
            },
        ),
        MidiEvent::ControlChange {
            channel,
            control,
            value,
        } => midi(
            channel,
            MidiMessage::Controller {
                controller: u7::from(control),
                value: u7::from(value),
            },
        ),
        MidiEvent::PitchWheel { channel, pitch } => midi(
            channel,
            MidiMessage::PitchBend {
                bend: PitchBend(u14::from((pitch + 0x2000) as u16)),
            },
        ),
        MidiEvent::AfterTouch { channel, value } => midi(
            channel,
            MidiMessage::ChannelAftertouch {
                vel: u7::from(value),
            },
        ),
        MidiEvent::PolyTouch {
            channel,
            note,
            value,
        } => midi(
            channel,
            MidiMessage::Aftertouch {
                key: u7::from(note),
                vel: u7::from(value),
            },
        ),
        MidiEvent::SetTempo { tempo } => TrackEventKind::Meta(MetaMessage::Tempo(u24::from(tempo))),
        MidiEvent::TimeSignature {
            numerator,
            denominator,
            clocks_per_click,
        } => TrackEventKind::Meta(MetaMessage::TimeSignature(
            numerator,
            denominator.trailing_zeros() as u8,
            clocks_per_click,
            8, // 32nd notes per quarter note
        )),
    }
}

/// Parse an SMF into a merged timeline.
///
/// Tracks are merged by absolute tick. Events the timeline does not carry
/// are dropped, but their delta times still advance the clock.
pub fn read(bytes: &[u8]) -> Result<Timeline> {
    let smf = Smf::parse(bytes).map_err(|e| ConvertError::Midi(e.to_string()))?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int(),
        Timing::Timecode(..) => return Err(ConvertError::UnsupportedTiming),
    };

    let mut timeline = Timeline::new(ticks_per_beat);
    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += u64::from(event.delta.as_int());
            if let Some(e) = event_from_kind(&event.kind) {
                timeline.push(tick, e);
            }
        }
        timeline.end_tick = timeline.end_tick.max(tick);
    }
    timeline.sort();

    debug!(
        tracks = smf.tracks.len(),
        events = timeline.events.len(),
        ticks_per_beat,
        "parsed MIDI file"
    );
    Ok(timeline)
}

/// Write a timeline as a single-track (format 0) SMF.
pub fn write(timeline: &Timeline) -> Result<Vec<u8>> {
    if timeline.ticks_per_beat == 0 || timeline.ticks_per_beat > 0x7FFF {
        return Err(ConvertError::ValueOutOfRange {
            field: "ticks_per_beat",
            value: timeline.ticks_per_beat.into(),
        });
    }

    let mut track: Vec<TrackEvent<'static>> = Vec::with_capacity(timeline.events.len() + 1);
    let mut last_tick = 0u64;
    for (delta, event) in timeline.deltas() {
        event.validate()?;
        track.push(TrackEvent {
            delta: delta_ticks(delta)?,
            kind: kind_from_event(event),
        });
        last_tick += delta;
    }
    track.push(TrackEvent {
        delta: delta_ticks(timeline.end_tick.saturating_sub(last_tick))?,
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header {
            format: Format::SingleTrack,
            timing: Timing::Metrical(u15::from(timeline.ticks_per_beat)),
        },
        tracks: vec![track],
    };

    let mut out = Vec::new();
    smf.write(&mut out)
        .map_err(|e| ConvertError::Midi(format!("Failed to write MIDI: {}", e)))?;
    Ok(out)
}

fn delta_ticks(delta: u64) -> Result<u28> {
    if delta > MAX_DELTA {
        return Err(ConvertError::ValueOutOfRange {
            field: "delta time",
            value: i64::try_from(delta).unwrap_or(i64::MAX),
        });
    }
    Ok(u28::from(delta as u32))
}
