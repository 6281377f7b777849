//! Playback controller
//!
//! Sole owner of the media source. Turns transport requests (play toggle,
//! seek) and source notifications (loaded, progress) into `PlaybackState`
//! updates, keeping the display percentage in step.

use tracing::{debug, info, warn};

use crate::player::error::PlayerError;
use crate::player::source::MediaSource;
use crate::player::state::{PlaybackState, Transport};
use crate::player::sync;

/// Output volume applied every time playback starts.
pub const PLAYBACK_VOLUME: f32 = 0.1;

/// Transport controller over a single media source.
#[derive(Debug)]
pub struct PlaybackController<S: MediaSource> {
    source: S,
    state: PlaybackState,
    percentage: f64,
    unavailable: Option<PlayerError>,
}

impl<S: MediaSource> PlaybackController<S> {
    /// Create a controller with zeroed state over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: PlaybackState::new(),
            percentage: 0.0,
            unavailable: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Slider position (0-100, two decimals).
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn transport(&self) -> Transport {
        self.state.transport()
    }

    pub fn volume(&self) -> f32 {
        self.source.volume()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// False once the source failed to load; the transport is disabled.
    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn unavailable_reason(&self) -> Option<&PlayerError> {
        self.unavailable.as_ref()
    }

    /// Toggle between playing and paused.
    ///
    /// The decision is made from the state at call time: paused starts
    /// playback from the current elapsed time, playing pauses.
    pub fn play(&mut self) {
        if let Some(err) = &self.unavailable {
            debug!(%err, "play ignored, transport disabled");
            return;
        }

        self.source.set_volume(PLAYBACK_VOLUME);

        if self.state.is_playing {
            self.source.pause();
            self.state.is_playing = false;
            debug!(elapsed = self.state.elapsed_seconds, "paused");
        } else {
            self.source.set_current_time(self.state.elapsed_seconds);
            self.source.play();
            self.state.is_playing = true;
            debug!(elapsed = self.state.elapsed_seconds, "playing");
        }
    }

    /// Seek to `percent` of the duration.
    ///
    /// Out-of-range percentages are clamped to 0-100. Does nothing while
    /// the duration is unknown.
    pub fn seek(&mut self, percent: f64) {
        if let Some(err) = &self.unavailable {
            debug!(%err, "seek ignored, transport disabled");
            return;
        }

        match self.seek_target(percent) {
            Ok(target) => {
                self.source.set_current_time(target);
                self.state.elapsed_seconds = target;
                self.refresh_percentage();
                debug!(percent, target, "seek");
            }
            Err(err) => debug!(%err, "seek dropped"),
        }
    }

    /// Absolute seek time for `percent`, or why there is none.
    pub fn seek_target(&self, percent: f64) -> Result<f64, PlayerError> {
        let duration = self.state.duration_seconds;
        if !percent.is_finite() || !self.state.duration_known() {
            return Err(PlayerError::InvalidSeekTarget { percent, duration });
        }
        Ok(sync::from_percent(percent.clamp(0.0, 100.0), duration))
    }

    /// Progress notification from the source.
    pub fn on_progress(&mut self, elapsed: f64) {
        if !elapsed.is_finite() {
            return;
        }
        let mut elapsed = elapsed.max(0.0);
        if self.state.duration_known() {
            elapsed = elapsed.min(self.state.duration_seconds);
        }
        self.state.elapsed_seconds = elapsed;
        self.refresh_percentage();
    }

    /// Ready notification from the source, carrying its duration.
    ///
    /// Negative or non-finite durations are recorded as unknown.
    pub fn on_loaded(&mut self, duration: f64) {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.state.duration_seconds = duration;
        if self.state.duration_known() && self.state.elapsed_seconds > duration {
            self.state.elapsed_seconds = duration;
        }
        self.refresh_percentage();
        info!(duration, "source loaded");
    }

    /// The source could not be loaded. Disables the transport.
    pub fn on_load_failed(&mut self, error: PlayerError) {
        warn!(%error, "source unavailable");
        if self.state.is_playing {
            self.source.pause();
            self.state.is_playing = false;
        }
        self.unavailable = Some(error);
    }

    /// Slider change handler.
    ///
    /// `raw` is the value carried by the interaction (e.g. "42.5"); values
    /// that are not numbers are ignored.
    pub fn on_slider_changed(&mut self, raw: &str) {
        match raw.trim().parse::<f64>() {
            Ok(percent) => self.seek(percent),
            Err(_) => debug!(raw, "slider value is not a number"),
        }
    }

    /// Poll the source position and report it as progress.
    pub fn tick(&mut self) {
        let now = self.source.current_time();
        self.on_progress(now);
    }

    fn refresh_percentage(&mut self) {
        self.percentage = sync::to_percent(
            self.state.elapsed_seconds,
            self.state.duration_seconds,
        );
    }
}
