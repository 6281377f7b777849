//! midiplay - terminal MIDI/WAV player and MIDI conversion tools
//!
//! The library half of the `midiplay` binary:
//!
//! - `player`: playback controller, position sync and the terminal player
//! - `media`: file kind detection and duration probing
//! - `convert`: MIDI conversions between SMF, JSON and Cairo source
//! - `config`: configuration file handling
//! - `cli`: command-line definitions (shared with xtask for man pages)

pub mod cli;
pub mod config;
pub mod convert;
pub mod media;
pub mod player;

pub use config::Config;
pub use convert::{convert_file, Conversion, ConversionSummary};
pub use media::{probe, MediaInfo, MediaKind};
pub use player::{play_file, PlaybackController, PlaybackResult};
