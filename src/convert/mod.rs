//! Conversion between MIDI files, JSON event lists and Cairo struct source.
//!
//! Each conversion reads its input into a [`Timeline`] and writes the
//! timeline out in the target format:
//!
//! - `smf`: Standard MIDI Files (binary, via `midly`)
//! - `json`: `{"events": [{"NOTE_ON": {...}}, ...]}` event lists
//! - `cairo`: Cairo source for the `koji` MIDI types
//!
//! # Usage
//!
//! ```no_run
//! use midiplay::convert::{convert_file, Conversion};
//! use std::path::Path;
//!
//! let summary = convert_file(
//!     Path::new("song.mid"),
//!     Path::new("song.json"),
//!     Conversion::MidiToJson,
//! )
//! .unwrap();
//! println!("{} events", summary.events);
//! ```

pub mod cairo;
mod error;
pub mod json;
pub mod smf;
pub mod timeline;

use std::fs;
use std::path::Path;

use tracing::info;

pub use error::{ConvertError, Result};
pub use timeline::{MidiEvent, TempoMap, TimedEvent, Timeline};

/// On-disk formats a timeline can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Midi,
    Json,
    Cairo,
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Format::Midi => "MIDI",
            Format::Json => "JSON",
            Format::Cairo => "Cairo",
        }
    }
}

/// Supported conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Conversion {
    MidiToJson,
    JsonToMidi,
    MidiToCairo,
    CairoToMidi,
    CairoToJson,
    JsonToCairo,
}

impl Conversion {
    pub fn source(self) -> Format {
        match self {
            Conversion::MidiToJson | Conversion::MidiToCairo => Format::Midi,
            Conversion::JsonToMidi | Conversion::JsonToCairo => Format::Json,
            Conversion::CairoToMidi | Conversion::CairoToJson => Format::Cairo,
        }
    }

    pub fn target(self) -> Format {
        match self {
            Conversion::JsonToMidi | Conversion::CairoToMidi => Format::Midi,
            Conversion::MidiToJson | Conversion::CairoToJson => Format::Json,
            Conversion::MidiToCairo | Conversion::JsonToCairo => Format::Cairo,
        }
    }
}

/// What a finished conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub conversion: Conversion,
    pub events: usize,
    pub bytes_written: usize,
}

/// Decode `bytes` in `format` into a timeline.
pub fn read(format: Format, bytes: &[u8]) -> Result<Timeline> {
    match format {
        Format::Midi => smf::read(bytes),
        Format::Json => json::read(&String::from_utf8_lossy(bytes)),
        Format::Cairo => cairo::read(&String::from_utf8_lossy(bytes)),
    }
}

/// Encode a timeline in `format`.
pub fn write(format: Format, timeline: &Timeline) -> Result<Vec<u8>> {
    match format {
        Format::Midi => smf::write(timeline),
        Format::Json => json::write(timeline).map(String::into_bytes),
        Format::Cairo => Ok(cairo::write(timeline).into_bytes()),
    }
}

/// Convert `input` to `output`.
pub fn convert_file(input: &Path, output: &Path, conversion: Conversion) -> Result<ConversionSummary> {
    let bytes = fs::read(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let timeline = read(conversion.source(), &bytes)?;
    let encoded = write(conversion.target(), &timeline)?;

    fs::write(output, &encoded).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        ?conversion,
        events = timeline.events.len(),
        "converted"
    );

    Ok(ConversionSummary {
        conversion,
        events: timeline.events.len(),
        bytes_written: encoded.len(),
    })
}
