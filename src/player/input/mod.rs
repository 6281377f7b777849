//! Input handling for the native player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::{Event, KeyEventKind};

use crate::player::controller::PlaybackController;
use crate::player::source::MediaSource;
use crate::player::state::{InputResult, ViewState};

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `controller` - Playback controller receiving transport requests
/// * `view` - Terminal view state
/// * `seek_step` - Arrow-key seek step in seconds
///
/// # Returns
/// `InputResult` indicating whether to continue or quit
pub fn handle_event<S: MediaSource>(
    event: Event,
    controller: &mut PlaybackController<S>,
    view: &mut ViewState,
    seek_step: f64,
) -> InputResult {
    match event {
        // Windows reports releases too
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            handle_key_event(key, controller, view, seek_step)
        }
        Event::Mouse(mouse) => handle_mouse_event(mouse, controller, view),
        Event::Resize(new_cols, new_rows) => {
            view.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
