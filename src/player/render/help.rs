//! Help overlay rendering for the native player.
//!
//! Displays a centered help overlay with all available keyboard shortcuts.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "",
    "  ╔═══════════════════════════════════════════╗",
    "  ║           midiplay Player Help            ║",
    "  ╠═══════════════════════════════════════════╣",
    "  ║                                           ║",
    "  ║  Playback                                 ║",
    "  ║    Space        Play / Pause              ║",
    "  ║    <-/->        Seek -/+ step             ║",
    "  ║    Shift+<-/->  Seek -/+ 5%               ║",
    "  ║    Home/End     Go to start / end         ║",
    "  ║                                           ║",
    "  ║  Slider                                   ║",
    "  ║    Click/drag   Preview position          ║",
    "  ║    Release      Seek to position          ║",
    "  ║                                           ║",
    "  ║  General                                  ║",
    "  ║    ?            Show this help            ║",
    "  ║    q / Esc      Quit player               ║",
    "  ║                                           ║",
    "  ║         Press any key to close            ║",
    "  ╚═══════════════════════════════════════════╝",
    "",
];

/// Width of the help box (for centering calculations).
pub const HELP_BOX_WIDTH: usize = 47;

/// Calculate the starting row for centering the help box.
pub fn calc_help_start_row(term_height: u16) -> u16 {
    let box_height = HELP_LINES.len() as u16;
    (term_height.saturating_sub(box_height)) / 2
}

/// Calculate the starting column for centering the help box.
pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Render the help overlay.
///
/// Clears the screen and draws a centered help box with all shortcuts.
///
/// # Arguments
/// * `out` - Where to queue the terminal commands
/// * `width` - Terminal width
/// * `height` - Terminal height
pub fn render_help<W: Write>(out: &mut W, width: u16, height: u16) -> Result<()> {
    let start_row = calc_help_start_row(height);
    let col = calc_help_start_col(width);

    queue!(out, Clear(ClearType::All))?;

    for (i, line) in HELP_LINES.iter().enumerate() {
        let row = start_row + i as u16;
        queue!(
            out,
            MoveTo(col, row),
            SetForegroundColor(Color::Green),
            Print(line),
            ResetColor,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lines_have_equal_width() {
        let widths: Vec<usize> = HELP_LINES
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.iter().all(|&w| w == HELP_BOX_WIDTH));
    }

    #[test]
    fn help_lines_has_title() {
        assert!(HELP_LINES
            .iter()
            .any(|line| line.contains("midiplay Player Help")));
    }

    #[test]
    fn help_lines_has_quit_instruction() {
        assert!(HELP_LINES
            .iter()
            .any(|line| line.contains("q") && line.contains("Quit")));
    }

    #[test]
    fn help_lines_has_close_instruction() {
        assert!(HELP_LINES
            .iter()
            .any(|line| line.contains("Press any key to close")));
    }

    #[test]
    fn calc_help_start_row_handles_small_terminal() {
        assert_eq!(calc_help_start_row(10), 0);
    }

    #[test]
    fn calc_help_start_col_centers_horizontally() {
        // (120 - 47) / 2 = 36
        assert_eq!(calc_help_start_col(120), 36);
        assert_eq!(calc_help_start_col(40), 0);
    }

    #[test]
    fn render_help_draws_box() {
        let mut out = Vec::new();
        render_help(&mut out, 80, 30).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Press any key to close"));
    }
}
