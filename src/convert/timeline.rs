//! Format-neutral MIDI event timeline and tempo map.
//!
//! Every conversion reads into a `Timeline` and writes out of one. Ticks
//! are absolute; events from all tracks are merged in time order.

use super::error::{ConvertError, Result};

/// MIDI default tempo, microseconds per quarter note (120 bpm).
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Ticks per quarter note used when a format does not carry one.
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// MIDI clocks per metronome click written for time signatures.
pub const DEFAULT_CLOCKS_PER_CLICK: u8 = 24;

/// The MIDI events carried through conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn {
        channel: u8,
        note: u8,
        velocity: u8,
    },
    NoteOff {
        channel: u8,
        note: u8,
        velocity: u8,
    },
    SetTempo {
        /// Microseconds per quarter note
        tempo: u32,
    },
    TimeSignature {
        numerator: u8,
        /// Real denominator (4, 8, ...), not the SMF power of two
        denominator: u8,
        clocks_per_click: u8,
    },
    ControlChange {
        channel: u8,
        control: u8,
        value: u8,
    },
    PitchWheel {
        channel: u8,
        /// Signed bend, -8192..=8191 (0 = centered)
        pitch: i16,
    },
    AfterTouch {
        channel: u8,
        value: u8,
    },
    PolyTouch {
        channel: u8,
        note: u8,
        value: u8,
    },
}

fn check(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(ConvertError::ValueOutOfRange { field, value });
    }
    Ok(())
}

fn check_channel(channel: u8) -> Result<()> {
    check("channel", channel.into(), 0, 15)
}

fn check_7bit(field: &'static str, value: u8) -> Result<()> {
    check(field, value.into(), 0, 127)
}

impl MidiEvent {
    /// Check every field fits its MIDI wire width.
    pub fn validate(&self) -> Result<()> {
        match *self {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            }
            | MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => {
                check_channel(channel)?;
                check_7bit("note", note)?;
                check_7bit("velocity", velocity)
            }
            MidiEvent::SetTempo { tempo } => check("tempo", tempo.into(), 1, 0xFF_FFFF),
            MidiEvent::TimeSignature { denominator, .. } => {
                if denominator == 0 || !denominator.is_power_of_two() {
                    return Err(ConvertError::ValueOutOfRange {
                        field: "denominator",
                        value: denominator.into(),
                    });
                }
                Ok(())
            }
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => {
                check_channel(channel)?;
                check_7bit("control", control)?;
                check_7bit("value", value)
            }
            MidiEvent::PitchWheel { channel, pitch } => {
                check_channel(channel)?;
                check("pitch", pitch.into(), -8192, 8191)
            }
            MidiEvent::AfterTouch { channel, value } => {
                check_channel(channel)?;
                check_7bit("value", value)
            }
            MidiEvent::PolyTouch {
                channel,
                note,
                value,
            } => {
                check_channel(channel)?;
                check_7bit("note", note)?;
                check_7bit("value", value)
            }
        }
    }
}

/// An event at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    pub tick: u64,
    pub event: MidiEvent,
}

/// Merged, time-ordered event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub ticks_per_beat: u16,
    pub events: Vec<TimedEvent>,
    /// Tick of the end of the longest track (at least the last event)
    pub end_tick: u64,
}

impl Timeline {
    pub fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            events: Vec::new(),
            end_tick: 0,
        }
    }

    /// Append an event, extending `end_tick` if needed.
    pub fn push(&mut self, tick: u64, event: MidiEvent) {
        self.end_tick = self.end_tick.max(tick);
        self.events.push(TimedEvent { tick, event });
    }

    /// Order events by tick, keeping insertion order for equal ticks.
    pub fn sort(&mut self) {
        self.events.sort_by_key(|e| e.tick);
    }

    /// Events paired with their delta from the previous event.
    pub fn deltas(&self) -> impl Iterator<Item = (u64, &MidiEvent)> + '_ {
        let mut last = 0u64;
        self.events.iter().map(move |e| {
            let delta = e.tick.saturating_sub(last);
            last = e.tick;
            (delta, &e.event)
        })
    }

    pub fn tempo_map(&self) -> TempoMap {
        let changes = self.events.iter().filter_map(|e| match e.event {
            MidiEvent::SetTempo { tempo } => Some((e.tick, tempo)),
            _ => None,
        });
        TempoMap::new(self.ticks_per_beat, changes)
    }

    /// Length in seconds, measured to `end_tick`.
    pub fn duration_seconds(&self) -> f64 {
        self.tempo_map().seconds_at(self.end_tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TempoSegment {
    tick: u64,
    seconds: f64,
    tempo: u32,
}

/// Piecewise tick <-> seconds mapping built from tempo changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    ticks_per_beat: u16,
    segments: Vec<TempoSegment>,
}

impl TempoMap {
    /// Build from `(tick, tempo)` changes. Changes must be in tick order.
    pub fn new(ticks_per_beat: u16, changes: impl IntoIterator<Item = (u64, u32)>) -> Self {
        let mut map = Self {
            ticks_per_beat: ticks_per_beat.max(1),
            segments: vec![TempoSegment {
                tick: 0,
                seconds: 0.0,
                tempo: DEFAULT_TEMPO,
            }],
        };
        for (tick, tempo) in changes {
            map.push_change(tick, tempo);
        }
        map
    }

    /// Build from `(seconds, tempo)` changes, in time order.
    pub fn from_seconds(
        ticks_per_beat: u16,
        changes: impl IntoIterator<Item = (f64, u32)>,
    ) -> Self {
        let mut map = Self::new(ticks_per_beat, std::iter::empty::<(u64, u32)>());
        for (seconds, tempo) in changes {
            let tick = map.tick_at(seconds);
            map.push_change(tick, tempo);
        }
        map
    }

    fn push_change(&mut self, tick: u64, tempo: u32) {
        let tempo = tempo.max(1);
        let seconds = self.seconds_at(tick);
        match self.segments.last_mut() {
            Some(last) if last.tick == tick => last.tempo = tempo,
            _ => self.segments.push(TempoSegment {
                tick,
                seconds,
                tempo,
            }),
        }
    }

    fn seconds_per_tick(&self, tempo: u32) -> f64 {
        tempo as f64 / 1_000_000.0 / self.ticks_per_beat as f64
    }

    /// Seconds from the start to `tick`.
    pub fn seconds_at(&self, tick: u64) -> f64 {
        let idx = self.segments.partition_point(|s| s.tick <= tick);
        let seg = &self.segments[idx.saturating_sub(1)];
        seg.seconds + (tick - seg.tick) as f64 * self.seconds_per_tick(seg.tempo)
    }

    /// Nearest tick for `seconds` from the start.
    pub fn tick_at(&self, seconds: f64) -> u64 {
        let seconds = seconds.max(0.0);
        let idx = self.segments.partition_point(|s| s.seconds <= seconds);
        let seg = &self.segments[idx.saturating_sub(1)];
        let ticks = (seconds - seg.seconds) / self.seconds_per_tick(seg.tempo);
        seg.tick + ticks.round() as u64
    }
}
