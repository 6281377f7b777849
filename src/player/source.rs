//! Media sources driven by the playback controller.
//!
//! `MediaSource` is the seam between the controller and whatever actually
//! renders the media. `ClockSource` is a silent, resumable playhead clock
//! running over the media duration; the terminal player falls back to it for
//! MIDI files and when no audio device can be opened.

use std::time::Instant;

#[cfg(feature = "audio-output")]
use crate::player::output::AudioSource;

/// Transport surface of a loaded media source.
///
/// Only the `PlaybackController` calls these methods.
pub trait MediaSource {
    /// Start (or resume) playback from the current time.
    fn play(&mut self);

    /// Pause playback, keeping the current time.
    fn pause(&mut self);

    /// Current playhead position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playhead to `seconds`.
    fn set_current_time(&mut self, seconds: f64);

    /// Total length in seconds (0 when unknown).
    fn duration(&self) -> f64;

    /// Set output volume (0.0 - 1.0).
    fn set_volume(&mut self, volume: f32);

    /// Current output volume.
    fn volume(&self) -> f32;

    /// Whether the playhead has reached the end.
    fn ended(&self) -> bool {
        let duration = self.duration();
        duration > 0.0 && self.current_time() >= duration
    }
}

/// Wall-clock playhead over a fixed duration.
///
/// Position is `offset + time since resume`, clamped to the duration.
/// Pausing folds the running time back into `offset`.
#[derive(Debug)]
pub struct ClockSource {
    duration: f64,
    offset: f64,
    resumed_at: Option<Instant>,
    volume: f32,
}

impl ClockSource {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            offset: 0.0,
            resumed_at: None,
            volume: 1.0,
        }
    }

    fn clamp(&self, seconds: f64) -> f64 {
        if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        }
    }
}

impl MediaSource for ClockSource {
    fn play(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.offset = self.current_time();
        self.resumed_at = None;
    }

    fn current_time(&self) -> f64 {
        let running = self
            .resumed_at
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.clamp(self.offset + running)
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.offset = self.clamp(seconds);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

/// Source chosen by the terminal player for a loaded file.
#[derive(Debug)]
pub enum PlaybackSource {
    /// Decoded audio on the output device
    #[cfg(feature = "audio-output")]
    Audio(AudioSource),
    /// Silent clock
    Clock(ClockSource),
}

impl PlaybackSource {
    /// Whether samples reach an output device.
    pub fn is_audible(&self) -> bool {
        !matches!(self, PlaybackSource::Clock(_))
    }

    fn inner(&self) -> &dyn MediaSource {
        match self {
            #[cfg(feature = "audio-output")]
            PlaybackSource::Audio(source) => source,
            PlaybackSource::Clock(source) => source,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn MediaSource {
        match self {
            #[cfg(feature = "audio-output")]
            PlaybackSource::Audio(source) => source,
            PlaybackSource::Clock(source) => source,
        }
    }
}

impl MediaSource for PlaybackSource {
    fn play(&mut self) {
        self.inner_mut().play();
    }

    fn pause(&mut self) {
        self.inner_mut().pause();
    }

    fn current_time(&self) -> f64 {
        self.inner().current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.inner_mut().set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.inner().duration()
    }

    fn set_volume(&mut self, volume: f32) {
        self.inner_mut().set_volume(volume);
    }

    fn volume(&self) -> f32 {
        self.inner().volume()
    }
}
