//! Position sync between playback time and the progress slider.
//!
//! Converts elapsed seconds into the percentage the slider displays, and a
//! percentage picked on the slider back into an absolute seek time.

/// Round to two decimal places.
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Elapsed time as a display percentage (0-100, two decimals).
///
/// Returns 0 when the duration is unknown (zero).
///
/// # Arguments
/// * `elapsed` - Elapsed playback time in seconds
/// * `duration` - Total media duration in seconds
pub fn to_percent(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 || !duration.is_finite() {
        return 0.0;
    }
    round2(elapsed / duration * 100.0)
}

/// Absolute time in seconds for a slider percentage.
///
/// # Arguments
/// * `percent` - Slider position, 0-100
/// * `duration` - Total media duration in seconds
pub fn from_percent(percent: f64, duration: f64) -> f64 {
    duration * percent / 100.0
}

/// Map a terminal column on the slider to a percentage.
///
/// Columns left of the bar map to 0, columns at or past its end to 100.
///
/// # Arguments
/// * `column` - Column of the pointer (0-indexed)
/// * `bar_start` - First column of the bar
/// * `bar_width` - Width of the bar in columns
pub fn percent_at_column(column: u16, bar_start: u16, bar_width: usize) -> f64 {
    if bar_width == 0 {
        return 0.0;
    }
    let offset = column.saturating_sub(bar_start) as f64;
    round2((offset / bar_width as f64 * 100.0).clamp(0.0, 100.0))
}
