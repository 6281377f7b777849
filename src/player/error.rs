//! Playback controller errors.

use std::path::PathBuf;

/// Failures local to the playback controller.
///
/// Neither variant is fatal: an unavailable source disables the transport,
/// an invalid seek target is dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Cannot seek to {percent}% of a {duration}s source")]
    InvalidSeekTarget { percent: f64, duration: f64 },
}
