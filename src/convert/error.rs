//! Conversion errors.

use std::path::PathBuf;

/// Errors that can occur while converting between MIDI, JSON and Cairo.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid MIDI data: {0}")]
    Midi(String),

    #[error("Invalid JSON event list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cairo line {line}: {message}")]
    Cairo { line: usize, message: String },

    #[error("SMPTE timecode MIDI files cannot be converted, only metrical timing is supported")]
    UnsupportedTiming,

    #[error("{field} out of range: {value}")]
    ValueOutOfRange { field: &'static str, value: i64 },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
