//! Progress slider rendering for the native player.
//!
//! Displays the playhead position, a time readout and the percentage.

use std::io::Write;

use anyhow::Result;

use crate::player::state::ViewState;

/// Format a duration in seconds to MM:SS format.
///
/// # Arguments
/// * `seconds` - Duration in seconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Build the slider character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `percent` - Slider position, 0-100
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_slider_chars(bar_width: usize, percent: f64) -> (Vec<char>, usize) {
    let progress = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];
    for c in bar.iter_mut().take(filled) {
        *c = '━';
    }
    if filled < bar_width {
        bar[filled] = '⏺';
    }

    (bar, filled)
}

/// Time readout shown right of the slider, e.g. ` 01:05/02:00  54.17%`.
pub fn time_readout(elapsed: f64, duration: f64, percent: f64) -> String {
    format!(
        " {}/{} {:>6.2}%",
        format_duration(elapsed),
        format_duration(duration),
        percent
    )
}

/// Render the slider row.
///
/// # Arguments
/// * `out` - Where to write the escape sequences
/// * `view` - Terminal layout
/// * `percent` - Slider position (drag preview or playback percentage)
/// * `elapsed` - Time shown in the readout
/// * `duration` - Total duration shown in the readout
pub fn render_slider<W: Write>(
    out: &mut W,
    view: &ViewState,
    percent: f64,
    elapsed: f64,
    duration: f64,
) -> Result<()> {
    let width = view.term_cols as usize;
    let bar_width = view.slider_width();
    let (bar, filled) = build_slider_chars(bar_width, percent);
    let readout = time_readout(elapsed, duration, percent);

    // ANSI color codes
    const GREEN: &str = "\x1b[32m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    let mut output = String::with_capacity(width * 4);
    output.push_str(&format!("\x1b[{};1H", view.slider_row() + 1));
    output.push_str("\x1b[48;5;236m "); // Dark gray background + padding

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        if i == filled {
            output.push_str(WHITE);
        } else if i == filled + 1 {
            output.push_str(DARK_GREY);
        }
        output.push(c);
    }

    output.push_str(GREY);
    output.push_str(&readout);

    let used_width = 1 + bar_width + readout.chars().count();
    let remaining = width.saturating_sub(used_width);
    for _ in 0..remaining {
        output.push(' ');
    }

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_formats_correctly() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(65.0), "01:05");
        assert_eq!(format_duration(3661.0), "61:01");
    }

    #[test]
    fn format_duration_edge_cases() {
        // Fractional seconds are truncated
        assert_eq!(format_duration(0.9), "00:00");
        assert_eq!(format_duration(59.9), "00:59");
        // Negative durations format as 0 due to u64 cast
        assert_eq!(format_duration(-5.0), "00:00");
    }

    #[test]
    fn empty_slider_at_zero() {
        let (bar, filled) = build_slider_chars(10, 0.0);
        assert_eq!(filled, 0);
        assert_eq!(bar[0], '⏺');
        assert_eq!(bar[1], '─');
    }

    #[test]
    fn full_slider_at_hundred() {
        let (bar, filled) = build_slider_chars(10, 100.0);
        assert_eq!(filled, 10);
        assert!(bar.iter().all(|&c| c == '━'));
    }

    #[test]
    fn half_slider() {
        let (bar, filled) = build_slider_chars(10, 50.0);
        assert_eq!(filled, 5);
        assert_eq!(bar[4], '━');
        assert_eq!(bar[5], '⏺');
        assert_eq!(bar[6], '─');
    }

    #[test]
    fn slider_clamps_percent() {
        let (_, filled) = build_slider_chars(10, 150.0);
        assert_eq!(filled, 10);
        let (_, filled) = build_slider_chars(10, -20.0);
        assert_eq!(filled, 0);
    }

    #[test]
    fn zero_width_slider() {
        let (bar, filled) = build_slider_chars(0, 50.0);
        assert!(bar.is_empty());
        assert_eq!(filled, 0);
    }

    #[test]
    fn readout_shows_times_and_percent() {
        assert_eq!(time_readout(65.0, 120.0, 54.17), " 01:05/02:00  54.17%");
        assert_eq!(time_readout(0.0, 0.0, 100.0), " 00:00/00:00 100.00%");
    }

    #[test]
    fn render_slider_writes_row_and_readout() {
        let view = ViewState::new(60, 10);
        let mut out = Vec::new();
        render_slider(&mut out, &view, 50.0, 30.0, 60.0).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("\x1b[9;1H")); // row 8, 1-indexed
        assert!(text.contains("00:30/01:00"));
        assert!(text.contains("50.00%"));
        assert!(text.ends_with("\x1b[0m"));
    }
}
