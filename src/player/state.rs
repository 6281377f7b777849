//! Player state management
//!
//! Contains the `PlaybackState` owned by the controller, the terminal-only
//! `ViewState`, and shared types used across player modules.

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// Transport status derived from `PlaybackState::is_playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Paused,
    Playing,
}

/// Playback position, duration and play/pause status.
///
/// Created zeroed when the player starts. A duration of 0 means the
/// source has not reported one yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackState {
    /// Seconds of playback since the start of the source
    pub elapsed_seconds: f64,
    /// Total length of the source in seconds (0 = unknown)
    pub duration_seconds: f64,
    /// Whether the transport is in the playing state
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the source has reported a duration.
    pub fn duration_known(&self) -> bool {
        self.duration_seconds > 0.0
    }

    pub fn transport(&self) -> Transport {
        if self.is_playing {
            Transport::Playing
        } else {
            Transport::Paused
        }
    }
}

/// Terminal-side state for the native player.
///
/// Holds everything the front-end needs that is not playback state:
/// dimensions, overlays, and an in-flight slider drag.
#[derive(Debug)]
pub struct ViewState {
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Slider position while the user is dragging (percent)
    pub drag_percent: Option<f64>,
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl ViewState {
    /// Padding and time readout around the slider bar.
    pub const SLIDER_RESERVED_COLS: usize = 24;

    /// First column of the slider bar.
    pub const SLIDER_START_COL: u16 = 1;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            term_cols,
            term_rows,
            show_help: false,
            drag_percent: None,
            needs_render: true,
        }
    }

    /// Handle terminal resize event.
    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        self.needs_render = true;
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// Row the slider is drawn on (0-indexed).
    pub fn slider_row(&self) -> u16 {
        self.term_rows.saturating_sub(2)
    }

    /// Row the status bar is drawn on (0-indexed).
    pub fn status_row(&self) -> u16 {
        self.term_rows.saturating_sub(1)
    }

    /// Width of the slider bar in columns.
    pub fn slider_width(&self) -> usize {
        (self.term_cols as usize).saturating_sub(Self::SLIDER_RESERVED_COLS)
    }
}
