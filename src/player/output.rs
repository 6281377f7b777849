//! Audio output through the default device.
//!
//! The file is decoded up front; the cpal callback reads from it through a
//! shared `Playhead` holding position, transport flag and volume as atomics,
//! so the controller never blocks the audio thread.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use tracing::{info, warn};

use crate::media::{DecodedAudio, MediaError};
use crate::player::source::MediaSource;

/// Fractional bits of the fixed-point frame position.
const FRAC_BITS: u32 = 16;

/// Position step per output frame when playing `file_rate` audio on a
/// `device_rate` device (16.16 fixed point, nearest-neighbour).
pub fn rate_step(file_rate: u32, device_rate: u32) -> u64 {
    if file_rate == 0 || device_rate == 0 {
        return 1 << FRAC_BITS;
    }
    (u64::from(file_rate) << FRAC_BITS) / u64::from(device_rate)
}

/// State shared between the controller and the audio callback.
#[derive(Debug)]
pub struct Playhead {
    /// Frame in the decoded file, 16.16 fixed point
    position: AtomicU64,
    playing: AtomicBool,
    /// f32 bits
    volume: AtomicU32,
}

impl Default for Playhead {
    fn default() -> Self {
        Self::new()
    }
}

impl Playhead {
    pub fn new() -> Self {
        Self {
            position: AtomicU64::new(0),
            playing: AtomicBool::new(false),
            volume: AtomicU32::new(1.0f32.to_bits()),
        }
    }

    pub fn frame(&self) -> u64 {
        self.position.load(Ordering::Acquire) >> FRAC_BITS
    }

    pub fn seek_frame(&self, frame: u64) {
        self.position.store(frame << FRAC_BITS, Ordering::Release);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Release);
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    /// Write the next `out.len() / out_channels` frames of `audio` into `out`.
    ///
    /// Output channels beyond the file's repeat its last channel. Writes
    /// silence while paused or past the end. A seek made while filling is
    /// kept; the advance from this fill is then dropped.
    pub fn fill(&self, audio: &DecodedAudio, out: &mut [f32], out_channels: usize, step: u64) {
        if !self.is_playing() {
            out.fill(0.0);
            return;
        }

        let out_channels = out_channels.max(1);
        let in_channels = usize::from(audio.channels.max(1));
        let total = audio.frames() as u64;
        let volume = self.volume();

        let start = self.position.load(Ordering::Acquire);
        let mut position = start;
        for frame in out.chunks_mut(out_channels) {
            let index = position >> FRAC_BITS;
            if index >= total {
                frame.fill(0.0);
                continue;
            }
            let base = index as usize * in_channels;
            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = audio.samples[base + channel.min(in_channels - 1)] * volume;
            }
            position += step;
        }

        let end = position.min(total << FRAC_BITS);
        let _ = self
            .position
            .compare_exchange(start, end, Ordering::AcqRel, Ordering::Relaxed);
    }
}

/// Media source playing decoded audio on the default output device.
pub struct AudioSource {
    audio: Arc<DecodedAudio>,
    playhead: Arc<Playhead>,
    stream: Stream,
}

impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioSource")
            .field("sample_rate", &self.audio.sample_rate)
            .field("channels", &self.audio.channels)
            .field("playhead", &self.playhead)
            .finish()
    }
}

impl AudioSource {
    /// Open the default output device for `audio`. The stream starts paused.
    pub fn open(audio: DecodedAudio) -> Result<Self, MediaError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| MediaError::Output("no output device".to_string()))?;
        let supported = device
            .default_output_config()
            .map_err(|e| MediaError::Output(e.to_string()))?;
        let sample_format = supported.sample_format();
        let config = supported.config();

        let audio = Arc::new(audio);
        let playhead = Arc::new(Playhead::new());

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, &audio, &playhead),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, &audio, &playhead),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, &audio, &playhead),
            other => Err(MediaError::Output(format!(
                "unsupported sample format {other:?}"
            ))),
        }?;
        stream
            .pause()
            .map_err(|e| MediaError::Output(e.to_string()))?;

        info!(
            device = %device.name().unwrap_or_default(),
            device_rate = config.sample_rate.0,
            device_channels = config.channels,
            file_rate = audio.sample_rate,
            "audio output opened"
        );

        Ok(Self {
            audio,
            playhead,
            stream,
        })
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    audio: &Arc<DecodedAudio>,
    playhead: &Arc<Playhead>,
) -> Result<Stream, MediaError>
where
    T: SizedSample + FromSample<f32>,
{
    let audio = Arc::clone(audio);
    let playhead = Arc::clone(playhead);
    let out_channels = usize::from(config.channels);
    let step = rate_step(audio.sample_rate, config.sample_rate.0);
    let mut mix: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                mix.resize(data.len(), 0.0);
                playhead.fill(&audio, &mut mix, out_channels, step);
                for (out, sample) in data.iter_mut().zip(&mix) {
                    *out = T::from_sample(*sample);
                }
            },
            |err| warn!(error = %err, "audio stream error"),
            None,
        )
        .map_err(|e| MediaError::Output(e.to_string()))
}

impl MediaSource for AudioSource {
    fn play(&mut self) {
        self.playhead.set_playing(true);
        if let Err(err) = self.stream.play() {
            warn!(error = %err, "failed to start audio stream");
        }
    }

    fn pause(&mut self) {
        self.playhead.set_playing(false);
        if let Err(err) = self.stream.pause() {
            warn!(error = %err, "failed to pause audio stream");
        }
    }

    fn current_time(&self) -> f64 {
        if self.audio.sample_rate == 0 {
            return 0.0;
        }
        self.playhead.frame() as f64 / f64::from(self.audio.sample_rate)
    }

    fn set_current_time(&mut self, seconds: f64) {
        let seconds = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration())
        } else {
            0.0
        };
        let frame = (seconds * f64::from(self.audio.sample_rate)).round() as u64;
        self.playhead
            .seek_frame(frame.min(self.audio.frames() as u64));
    }

    fn duration(&self) -> f64 {
        self.audio.duration_seconds()
    }

    fn set_volume(&mut self, volume: f32) {
        self.playhead.set_volume(volume);
    }

    fn volume(&self) -> f32 {
        self.playhead.volume()
    }
}
