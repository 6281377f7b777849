//! Status and title rendering for the native player.
//!
//! Displays the transport state, volume, keyboard shortcuts, and the
//! reason when the source could not be loaded.

use std::io::Write;

use anyhow::Result;

use crate::player::state::Transport;

/// Render the title line (file name and media kind).
pub fn render_title_line<W: Write>(out: &mut W, width: u16, row: u16, title: &str) -> Result<()> {
    let mut output = String::with_capacity(width as usize + 32);
    output.push_str(&format!("\x1b[{};1H\x1b[1;97m", row + 1)); // Move + bold white

    let visible: String = format!(" {}", title).chars().take(width as usize).collect();
    let padding = (width as usize).saturating_sub(visible.chars().count());
    output.push_str(&visible);
    for _ in 0..padding {
        output.push(' ');
    }

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}

/// Render a separator line.
///
/// # Arguments
/// * `out` - Where to write the escape sequences
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
pub fn render_separator_line<W: Write>(out: &mut W, width: u16, row: u16) -> Result<()> {
    // Build line as string to minimize syscalls
    let mut output = String::with_capacity(width as usize + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1)); // Move + dark gray
    for _ in 0..width {
        output.push('─');
    }
    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}

/// Render the status/controls bar.
///
/// # Arguments
/// * `out` - Where to write the escape sequences
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `transport` - Playing or paused
/// * `volume` - Current output volume (0.0 - 1.0)
/// * `unavailable` - Why the transport is disabled, if it is
pub fn render_status_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    transport: Transport,
    volume: f32,
    unavailable: Option<&str>,
) -> Result<()> {
    // ANSI color codes
    const WHITE: &str = "\x1b[97m";
    const RED: &str = "\x1b[31m";
    const DARK_GREY: &str = "\x1b[90m";
    const CYAN: &str = "\x1b[36m";
    const RESET: &str = "\x1b[0m";

    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0; // Track visible width manually

    output.push_str(&format!("\x1b[{};1H", row + 1));

    if let Some(reason) = unavailable {
        output.push_str(RED);
        let text: String = format!(" ✖ {} ", reason)
            .chars()
            .take((width as usize).saturating_sub(7))
            .collect();
        visible_len += text.chars().count();
        output.push_str(&text);
    } else {
        output.push_str(WHITE);
        output.push(' ');
        visible_len += 1;

        // ▶ and ⏸ are double-width unicode
        let state = match transport {
            Transport::Paused => "▶  ",
            Transport::Playing => "⏸  ",
        };
        output.push_str(state);
        visible_len += 4;

        output.push_str(DARK_GREY);
        output.push_str("vol:");
        visible_len += 4;
        output.push_str(WHITE);
        let volume_str = format!("{:.0}% ", volume * 100.0);
        visible_len += volume_str.len();
        output.push_str(&volume_str);

        let play_action = match transport {
            Transport::Paused => ":play ",
            Transport::Playing => ":pause ",
        };
        output.push_str(DARK_GREY);
        output.push_str("│ ");
        visible_len += 2;
        output.push_str(CYAN);
        output.push_str("space");
        visible_len += 5;
        output.push_str(DARK_GREY);
        output.push_str(play_action);
        visible_len += play_action.len();
        output.push_str(CYAN);
        output.push_str("←/→");
        visible_len += 3;
        output.push_str(DARK_GREY);
        output.push_str(":seek ");
        visible_len += 6;
        output.push_str(CYAN);
        output.push('?');
        visible_len += 1;
        output.push_str(DARK_GREY);
        output.push_str(":hlp ");
        visible_len += 5;
    }

    output.push_str(CYAN);
    output.push('q');
    visible_len += 1;
    output.push_str(DARK_GREY);
    output.push_str(":quit");
    visible_len += 5;

    // Pad to full width to overwrite any leftover content
    let padding = (width as usize).saturating_sub(visible_len);
    for _ in 0..padding {
        output.push(' ');
    }

    output.push_str(RESET);
    write!(out, "{}", output)?;

    Ok(())
}
