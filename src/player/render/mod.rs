//! Rendering components for the native player.
//!
//! This module contains all the UI rendering functions for the player,
//! including the title, progress slider, status bar, and help overlay.

mod help;
mod progress;
mod status;

use std::io::Write;

use anyhow::Result;

pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use progress::{build_slider_chars, format_duration, render_slider, time_readout};
pub use status::{render_separator_line, render_status_bar, render_title_line};

use crate::player::controller::PlaybackController;
use crate::player::source::MediaSource;
use crate::player::state::ViewState;
use crate::player::sync;

/// Draw one full frame: title, separator, slider and status bar, or the
/// help overlay when it is open.
///
/// While a slider drag is in flight the slider and readout show the drag
/// position instead of the playback position.
pub fn render_frame<W: Write, S: MediaSource>(
    out: &mut W,
    view: &ViewState,
    controller: &PlaybackController<S>,
    title: &str,
) -> Result<()> {
    if view.show_help {
        render_help(out, view.term_cols, view.term_rows)?;
        out.flush()?;
        return Ok(());
    }

    let state = controller.state();
    let (percent, elapsed) = match view.drag_percent {
        Some(p) => (p, sync::from_percent(p, state.duration_seconds)),
        None => (controller.percentage(), state.elapsed_seconds),
    };

    // Clear screen, then draw chrome from the top and bottom
    write!(out, "\x1b[2J")?;
    render_title_line(out, view.term_cols, 0, title)?;
    render_separator_line(out, view.term_cols, 1)?;
    render_slider(out, view, percent, elapsed, state.duration_seconds)?;

    let reason = controller.unavailable_reason().map(|e| e.to_string());
    render_status_bar(
        out,
        view.term_cols,
        view.status_row(),
        controller.transport(),
        controller.volume(),
        reason.as_deref(),
    )?;

    out.flush()?;
    Ok(())
}
