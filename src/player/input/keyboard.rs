//! Keyboard input handling for the native player.
//!
//! Handles all keyboard shortcuts including playback controls,
//! seeking, and the help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::controller::PlaybackController;
use crate::player::source::MediaSource;
use crate::player::state::{InputResult, ViewState};

/// Share of the duration moved by Shift+arrow.
const COARSE_SEEK_FRACTION: f64 = 0.05;

/// Handle a keyboard event.
///
/// This is the main keyboard input handler that processes all key events
/// and updates state or returns control flow signals.
///
/// # Arguments
/// * `key` - The key event
/// * `controller` - Playback controller receiving transport requests
/// * `view` - Terminal view state
/// * `seek_step` - Arrow-key seek step in seconds
pub fn handle_key_event<S: MediaSource>(
    key: KeyEvent,
    controller: &mut PlaybackController<S>,
    view: &mut ViewState,
    seek_step: f64,
) -> InputResult {
    // If help is showing, any key closes it
    if view.show_help {
        view.show_help = false;
        view.needs_render = true;
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return InputResult::Quit
        }

        // === Help ===
        KeyCode::Char('?') => view.toggle_help(),

        // === Playback ===
        KeyCode::Char(' ') => controller.play(),

        // === Seeking ===
        KeyCode::Home => controller.seek(0.0),
        KeyCode::End => controller.seek(100.0),
        KeyCode::Left => {
            let step = step_seconds(controller, key.modifiers, seek_step);
            seek_by(controller, -step);
        }
        KeyCode::Right => {
            let step = step_seconds(controller, key.modifiers, seek_step);
            seek_by(controller, step);
        }

        _ => return InputResult::Continue,
    }

    view.needs_render = true;
    InputResult::Continue
}

/// Size of one arrow-key step in seconds.
fn step_seconds<S: MediaSource>(
    controller: &PlaybackController<S>,
    modifiers: KeyModifiers,
    seek_step: f64,
) -> f64 {
    if modifiers.contains(KeyModifiers::SHIFT) {
        controller.state().duration_seconds * COARSE_SEEK_FRACTION
    } else {
        seek_step
    }
}

/// Seek `delta` seconds from the elapsed time, not from the rounded slider
/// percentage, so repeated steps do not drift.
fn seek_by<S: MediaSource>(controller: &mut PlaybackController<S>, delta: f64) {
    let duration = controller.state().duration_seconds;
    if duration <= 0.0 {
        return;
    }
    let target = controller.state().elapsed_seconds + delta;
    controller.seek(target / duration * 100.0);
}
