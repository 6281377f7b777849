//! Mouse input handling for the native player.
//!
//! Handles press/drag/release on the progress slider. Pressing or
//! dragging only moves the preview; releasing commits the seek.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::controller::PlaybackController;
use crate::player::source::MediaSource;
use crate::player::state::{InputResult, ViewState};
use crate::player::sync;

/// Handle a mouse event.
///
/// Currently handles:
/// - Left press on the slider row to start a drag at that position
/// - Drag to move the preview
/// - Release to seek to the previewed position
///
/// The help overlay covers the slider, so nothing is handled while it shows.
pub fn handle_mouse_event<S: MediaSource>(
    mouse: MouseEvent,
    controller: &mut PlaybackController<S>,
    view: &mut ViewState,
) -> InputResult {
    if view.show_help {
        return InputResult::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if on_slider(view, mouse.column, mouse.row) && controller.is_available() {
                view.drag_percent = Some(percent_at(view, mouse.column));
                view.needs_render = true;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if view.drag_percent.is_some() {
                view.drag_percent = Some(percent_at(view, mouse.column));
                view.needs_render = true;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(percent) = view.drag_percent.take() {
                controller.on_slider_changed(&format!("{:.2}", percent));
                view.needs_render = true;
            }
        }
        _ => {}
    }

    InputResult::Continue
}

fn percent_at(view: &ViewState, column: u16) -> f64 {
    sync::percent_at_column(column, ViewState::SLIDER_START_COL, view.slider_width())
}

fn on_slider(view: &ViewState, column: u16, row: u16) -> bool {
    let bar_end = ViewState::SLIDER_START_COL as usize + view.slider_width();
    row == view.slider_row()
        && column >= ViewState::SLIDER_START_COL
        && (column as usize) < bar_end
}
