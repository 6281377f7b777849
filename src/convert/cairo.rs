//! Cairo struct source for the `koji` on-chain MIDI library.
//!
//! Output is a Cairo function returning a `Midi` value with one
//! `Message::KIND(Kind { ... })` per line. Times are absolute microseconds
//! encoded as `FP32x32 { mag: N, sign: false }`.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::error::{ConvertError, Result};
use super::timeline::{
    MidiEvent, TempoMap, Timeline, DEFAULT_CLOCKS_PER_CLICK, DEFAULT_TICKS_PER_BEAT,
};

const HEADER: &str = "use koji::midi::types::{Midi, Message, NoteOn, NoteOff, SetTempo, TimeSignature, ControlChange, PitchWheel, AfterTouch, PolyTouch, Modes };\nuse orion::numbers::FP32x32;\n\nfn midi() -> Midi {\n    Midi {\n        events: array![\n";
const FOOTER: &str = "\n        ].span()\n    }\n}\n";
const INDENT: &str = "            ";

fn fp32x32(micros: u64) -> String {
    format!("FP32x32 {{ mag: {}, sign: false }}", micros)
}

fn message_line(event: &MidiEvent, micros: u64) -> String {
    let time = fp32x32(micros);
    match *event {
        MidiEvent::NoteOn {
            channel,
            note,
            velocity,
        } => format!(
            "Message::NOTE_ON(NoteOn {{ channel: {}, note: {}, velocity: {}, time: {} }})",
            channel, note, velocity, time
        ),
        MidiEvent::NoteOff {
            channel,
            note,
            velocity,
        } => format!(
            "Message::NOTE_OFF(NoteOff {{ channel: {}, note: {}, velocity: {}, time: {} }})",
            channel, note, velocity, time
        ),
        MidiEvent::SetTempo { tempo } => format!(
            "Message::SET_TEMPO(SetTempo {{ tempo: {}, time: Option::Some({}) }})",
            tempo, time
        ),
        MidiEvent::TimeSignature {
            numerator,
            denominator,
            ..
        } => format!(
            "Message::TIME_SIGNATURE(TimeSignature {{ numerator: {}, denominator: {}, clocks_per_click: {}, time: None }})",
            numerator, denominator, DEFAULT_CLOCKS_PER_CLICK
        ),
        MidiEvent::ControlChange {
            channel,
            control,
            value,
        } => format!(
            "Message::CONTROL_CHANGE(ControlChange {{ channel: {}, control: {}, value: {}, time: {} }})",
            channel, control, value, time
        ),
        MidiEvent::PitchWheel { channel, pitch } => format!(
            "Message::PITCH_WHEEL(PitchWheel {{ channel: {}, pitch: {}, time: {} }})",
            channel, pitch, time
        ),
        MidiEvent::AfterTouch { channel, value } => format!(
            "Message::AFTER_TOUCH(AfterTouch {{ channel: {}, value: {}, time: {} }})",
            channel, value, time
        ),
        MidiEvent::PolyTouch {
            channel,
            note,
            value,
        } => format!(
            "Message::POLY_TOUCH(PolyTouch {{ channel: {}, note: {}, value: {}, time: {} }})",
            channel, note, value, time
        ),
    }
}

/// Render a timeline as Cairo source.
pub fn write(timeline: &Timeline) -> String {
    let tempo_map = timeline.tempo_map();
    let lines: Vec<String> = timeline
        .events
        .iter()
        .map(|e| {
            let micros = (tempo_map.seconds_at(e.tick) * 1_000_000.0).round() as u64;
            format!("{}{}", INDENT, message_line(&e.event, micros))
        })
        .collect();

    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + lines.len() * 96);
    out.push_str(HEADER);
    out.push_str(&lines.join(",\n"));
    out.push_str(FOOTER);
    out
}

fn message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Message::([A-Z_]+)\(\w+ \{ (.*) \}\)").expect("valid message regex")
    })
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(\w+): (Option::Some\(FP32x32 \{[^}]*\}\)|FP32x32 \{[^}]*\}|Option::None|None|-?\d+)",
        )
        .expect("valid field regex")
    })
}

fn fp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"mag: (\d+), sign: (true|false)").expect("valid FP32x32 regex")
    })
}

/// One parsed `Message::...` line.
struct CairoLine<'a> {
    line: usize,
    kind: &'a str,
    fields: HashMap<&'a str, &'a str>,
}

impl<'a> CairoLine<'a> {
    fn error(&self, message: impl Into<String>) -> ConvertError {
        ConvertError::Cairo {
            line: self.line,
            message: message.into(),
        }
    }

    fn raw(&self, name: &str) -> Result<&'a str> {
        self.fields
            .get(name)
            .copied()
            .ok_or_else(|| self.error(format!("{} is missing field '{}'", self.kind, name)))
    }

    fn int<T: TryFrom<i64>>(&self, name: &'static str) -> Result<T> {
        let raw = self.raw(name)?;
        // Tempo may be written as a fixed-point value
        let digits = fp_re()
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(raw);
        let value: i64 = digits
            .parse()
            .map_err(|_| self.error(format!("{} is not an integer: {}", name, raw)))?;
        T::try_from(value).map_err(|_| ConvertError::ValueOutOfRange { field: name, value })
    }

    /// Absolute time in microseconds, or `None` when the line has none.
    fn time(&self) -> Result<Option<u64>> {
        let raw = match self.fields.get("time") {
            Some(raw) => *raw,
            None => return Ok(None),
        };
        let Some(caps) = fp_re().captures(raw) else {
            return Ok(None);
        };
        if &caps[2] == "true" {
            return Err(self.error("negative times are not supported"));
        }
        caps[1]
            .parse::<u64>()
            .map(Some)
            .map_err(|_| self.error(format!("time magnitude out of range: {}", &caps[1])))
    }

    fn event(&self) -> Result<MidiEvent> {
        let event = match self.kind {
            "NOTE_ON" => MidiEvent::NoteOn {
                channel: self.int("channel")?,
                note: self.int("note")?,
                velocity: self.int("velocity")?,
            },
            "NOTE_OFF" => MidiEvent::NoteOff {
                channel: self.int("channel")?,
                note: self.int("note")?,
                velocity: self.int("velocity")?,
            },
            "SET_TEMPO" => MidiEvent::SetTempo {
                tempo: self.int("tempo")?,
            },
            "TIME_SIGNATURE" => MidiEvent::TimeSignature {
                numerator: self.int("numerator")?,
                denominator: self.int("denominator")?,
                clocks_per_click: self.int("clocks_per_click")?,
            },
            "CONTROL_CHANGE" => MidiEvent::ControlChange {
                channel: self.int("channel")?,
                control: self.int("control")?,
                value: self.int("value")?,
            },
            "PITCH_WHEEL" => MidiEvent::PitchWheel {
                channel: self.int("channel")?,
                pitch: self.int("pitch")?,
            },
            "AFTER_TOUCH" => MidiEvent::AfterTouch {
                channel: self.int("channel")?,
                value: self.int("value")?,
            },
            "POLY_TOUCH" => MidiEvent::PolyTouch {
                channel: self.int("channel")?,
                note: self.int("note")?,
                value: self.int("value")?,
            },
            other => return Err(self.error(format!("unknown message kind {}", other))),
        };
        event.validate()?;
        Ok(event)
    }
}

fn parse_line(line: usize, text: &str) -> Option<CairoLine<'_>> {
    let caps = message_re().captures(text)?;
    let kind = caps.get(1)?.as_str();
    let body = caps.get(2)?.as_str();
    let fields = field_re()
        .captures_iter(body)
        .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
        .collect();
    Some(CairoLine { line, kind, fields })
}

/// Parse Cairo source back into a timeline at 480 ticks per beat.
///
/// Lines without a `Message::` are ignored. Events without a time take the
/// time of the event before them.
pub fn read(input: &str) -> Result<Timeline> {
    let mut parsed: Vec<(f64, MidiEvent)> = Vec::new();
    let mut last_seconds = 0.0f64;

    for (idx, text) in input.lines().enumerate() {
        let Some(line) = parse_line(idx + 1, text) else {
            continue;
        };
        let event = line.event()?;
        if let Some(micros) = line.time()? {
            last_seconds = micros as f64 / 1_000_000.0;
        }
        parsed.push((last_seconds, event));
    }

    // Stable: lines with equal times keep their order
    parsed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let tempo_map = TempoMap::from_seconds(
        DEFAULT_TICKS_PER_BEAT,
        parsed.iter().filter_map(|(seconds, event)| match *event {
            MidiEvent::SetTempo { tempo } => Some((*seconds, tempo)),
            _ => None,
        }),
    );

    let mut timeline = Timeline::new(DEFAULT_TICKS_PER_BEAT);
    for (seconds, event) in parsed {
        timeline.push(tempo_map.tick_at(seconds), event);
    }
    Ok(timeline)
}
