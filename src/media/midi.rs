//! MIDI file duration.

use midly::{MetaMessage, Smf, Timing, TrackEventKind};

use super::MediaError;
use crate::convert::TempoMap;

/// Length of an SMF in seconds, measured to the end of its longest track.
///
/// Metrical files go through the tempo map (tempo changes from any
/// track apply globally); SMPTE files tick at a fixed rate.
pub fn midi_duration(bytes: &[u8]) -> Result<f64, MediaError> {
    let smf = Smf::parse(bytes).map_err(|e| MediaError::Midi(e.to_string()))?;

    let mut end_tick = 0u64;
    let mut tempo_changes: Vec<(u64, u32)> = Vec::new();
    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += u64::from(event.delta.as_int());
            if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = event.kind {
                tempo_changes.push((tick, tempo.as_int()));
            }
        }
        end_tick = end_tick.max(tick);
    }

    let seconds = match smf.header.timing {
        Timing::Metrical(tpb) => {
            tempo_changes.sort_by_key(|(tick, _)| *tick);
            TempoMap::new(tpb.as_int(), tempo_changes).seconds_at(end_tick)
        }
        Timing::Timecode(fps, ticks_per_frame) => {
            let ticks_per_second = fps.as_f32() as f64 * f64::from(ticks_per_frame);
            if ticks_per_second <= 0.0 {
                return Err(MediaError::UnknownDuration);
            }
            end_tick as f64 / ticks_per_second
        }
    };
    Ok(seconds)
}
