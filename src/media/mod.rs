//! Media loading: identify a file and measure its duration.
//!
//! MIDI files are measured through their tempo map; everything else is
//! probed as audio with symphonia, which also decodes it for output.

mod audio;
mod midi;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use audio::{audio_duration, decode_audio, DecodedAudio};
pub use midi::midi_duration;

/// Errors that can occur while loading media.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid MIDI file: {0}")]
    Midi(String),

    #[error("Unsupported or corrupt audio: {0}")]
    Probe(String),

    #[error("No playable track found")]
    NoTrack,

    #[error("Media does not report its length")]
    UnknownDuration,

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Audio output unavailable: {0}")]
    Output(String),
}

/// Broad kind of a media file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Midi,
    Audio,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("mid") | Some("midi") | Some("smf") => MediaKind::Midi,
            _ => MediaKind::Audio,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Midi => "MIDI",
            MediaKind::Audio => "audio",
        }
    }
}

/// A loaded media file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub duration_seconds: f64,
}

impl MediaInfo {
    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Load `path` and measure it.
pub fn probe(path: &Path) -> Result<MediaInfo, MediaError> {
    let kind = MediaKind::from_path(path);
    let duration_seconds = match kind {
        MediaKind::Midi => {
            let bytes = std::fs::read(path).map_err(|source| MediaError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            midi_duration(&bytes)?
        }
        MediaKind::Audio => audio_duration(path)?,
    };

    debug!(path = %path.display(), ?kind, duration_seconds, "probed media");

    Ok(MediaInfo {
        path: path.to_path_buf(),
        kind,
        duration_seconds,
    })
}
