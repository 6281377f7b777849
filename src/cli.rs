//! Command-line definitions
//!
//! Kept in the library so xtask can render the man page from the same
//! `clap` command the binary parses.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::convert::Conversion;

/// Version string with build date (and git hash on dev builds).
pub fn long_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let date = env!("MIDIPLAY_BUILD_DATE");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) if !cfg!(feature = "release") => {
                format!("{} ({} {})", env!("CARGO_PKG_VERSION"), sha, date)
            }
            _ => format!("{} ({})", env!("CARGO_PKG_VERSION"), date),
        }
    })
}

/// Terminal MIDI/WAV player with a seekable progress slider
#[derive(Debug, Parser)]
#[command(name = "midiplay", version, long_version = long_version())]
#[command(about = "Play MIDI and audio files in the terminal, convert MIDI between formats")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a MIDI or audio file with an interactive progress slider
    #[command(long_about = "Play a MIDI or audio file in the terminal.

Controls:
  space        Play / pause
  <-/->        Seek by the configured step
  Shift+<-/->  Seek by 5%
  Home/End     Jump to start / end
  mouse        Drag the slider, release to seek
  ?            Help
  q / Esc      Quit")]
    Play {
        /// Path to the media file (.mid, .midi, .wav, ...)
        file: PathBuf,
    },

    /// Show the kind and duration of a media file
    Info {
        /// Path to the media file
        file: PathBuf,
    },

    /// Convert MIDI between Standard MIDI File, JSON and Cairo source
    Convert {
        /// File to read
        input: PathBuf,
        /// File to write (overwritten if it exists)
        output: PathBuf,
        /// Which conversion to perform
        #[arg(short, long, value_enum)]
        conversion: Conversion,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Write the default configuration file if none exists
    Init,
}
