//! Interactive terminal player.
//!
//! Loads a media file, drives a `PlaybackController` over the audio output
//! (or a silent clock for MIDI and deviceless systems) and runs the
//! poll/dispatch/tick loop until the user quits.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::media::{self, MediaInfo, MediaKind};
use crate::player::controller::PlaybackController;
use crate::player::error::PlayerError;
use crate::player::input::handle_event;
use crate::player::render::render_frame;
use crate::player::source::{ClockSource, MediaSource, PlaybackSource};
use crate::player::state::{InputResult, ViewState};

/// Result of a playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Playback reached the end of the file before the user quit
    Finished(String),
    /// The user quit before the end
    Interrupted,
    /// The source could not be loaded
    Error(String),
}

/// Puts the terminal into player mode and restores it on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        // Guard exists from here so a failing execute still restores raw mode
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Build a controller for `path`, loaded or marked unavailable.
///
/// Returns the controller and the title to show in the header.
pub fn load_controller(path: &Path) -> (PlaybackController<PlaybackSource>, String) {
    match media::probe(path) {
        Ok(info) => {
            let title = title_for(&info);
            let source = open_source(&info);
            let duration = source.duration();
            let mut controller = PlaybackController::new(source);
            controller.on_loaded(duration);
            (controller, title)
        }
        Err(err) => {
            let source = PlaybackSource::Clock(ClockSource::new(0.0));
            let mut controller = PlaybackController::new(source);
            controller.on_load_failed(PlayerError::SourceUnavailable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
            (controller, path.display().to_string())
        }
    }
}

/// Audio files go to the output device when one opens; everything else
/// runs on a silent clock.
fn open_source(info: &MediaInfo) -> PlaybackSource {
    if info.kind == MediaKind::Audio {
        match open_output(info) {
            Ok(source) => return source,
            Err(err) => warn!(error = %err, "audio output unavailable, playing silently"),
        }
    }
    PlaybackSource::Clock(ClockSource::new(info.duration_seconds))
}

#[cfg(feature = "audio-output")]
fn open_output(info: &MediaInfo) -> Result<PlaybackSource, media::MediaError> {
    use crate::player::output::AudioSource;

    let audio = media::decode_audio(&info.path)?;
    Ok(PlaybackSource::Audio(AudioSource::open(audio)?))
}

#[cfg(not(feature = "audio-output"))]
fn open_output(_info: &MediaInfo) -> Result<PlaybackSource, media::MediaError> {
    Err(media::MediaError::Output(
        "built without the audio-output feature".to_string(),
    ))
}

fn title_for(info: &MediaInfo) -> String {
    format!("{} ({})", info.display_name(), info.kind.label())
}

/// Play a media file in the terminal.
///
/// # Arguments
/// * `path` - MIDI or audio file
/// * `config` - Player settings (progress interval, seek step)
pub fn play_file(path: &Path, config: &Config) -> Result<PlaybackResult> {
    let (mut controller, title) = load_controller(path);
    info!(
        path = %path.display(),
        available = controller.is_available(),
        audible = controller.source().is_audible(),
        "starting player"
    );

    let (cols, rows) = terminal::size()?;
    let mut view = ViewState::new(cols, rows);
    let interval = config.player.progress_interval();
    let seek_step = config.player.seek_step();

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout().lock();

    loop {
        if view.needs_render || controller.state().is_playing {
            render_frame(&mut stdout, &view, &controller, &title)?;
            view.needs_render = false;
        }

        if event::poll(interval)? {
            let event = event::read()?;
            if handle_event(event, &mut controller, &mut view, seek_step) == InputResult::Quit {
                break;
            }
        }

        controller.tick();
    }

    stdout.flush()?;
    debug!(elapsed = controller.state().elapsed_seconds, "player closed");

    let result = if let Some(err) = controller.unavailable_reason() {
        PlaybackResult::Error(err.to_string())
    } else if controller.source().ended() {
        PlaybackResult::Finished(title)
    } else {
        PlaybackResult::Interrupted
    };
    Ok(result)
}
