//! Media player module
//!
//! Provides the playback controller and the terminal front-end that
//! drives it:
//!
//! - `native`: Interactive terminal player (play/pause, seek, slider drag)
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `controller`: PlaybackController, sole owner of the media source
//! - `sync`: conversions between elapsed time and slider percentage
//! - `source`: MediaSource trait, the silent ClockSource and PlaybackSource
//! - `output`: AudioSource playing decoded audio through cpal (`audio-output` feature)
//! - `state`: PlaybackState, ViewState and shared types (Transport, InputResult)
//! - `error`: PlayerError
//! - `input/`: Keyboard and mouse input handling
//! - `render/`: UI rendering (title, slider, status bar, help)
//!
//! # Usage
//!
//! ```no_run
//! use midiplay::player::{play_file, PlaybackResult};
//! use midiplay::Config;
//! use std::path::Path;
//!
//! let result = play_file(Path::new("song.mid"), &Config::default()).unwrap();
//! match result {
//!     PlaybackResult::Finished(name) => println!("Finished: {}", name),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//!     PlaybackResult::Error(e) => eprintln!("Error: {}", e),
//! }
//! ```

pub mod controller;
pub mod error;
pub(crate) mod input;
mod native;
#[cfg(feature = "audio-output")]
pub mod output;
pub mod render;
pub mod source;
pub mod state;
pub mod sync;

pub use controller::{PlaybackController, PLAYBACK_VOLUME};
pub use error::PlayerError;
pub use native::{load_controller, play_file, PlaybackResult};
#[cfg(feature = "audio-output")]
pub use output::AudioSource;
pub use source::{ClockSource, MediaSource, PlaybackSource};
pub use state::{InputResult, PlaybackState, Transport, ViewState};
