//! Info command handler

use std::path::Path;

use anyhow::{Context, Result};

use midiplay::media;
use midiplay::player::render::format_duration;

/// Print the kind and duration of a media file.
pub fn handle(file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let info = media::probe(file).with_context(|| format!("Failed to load {}", file.display()))?;

    println!("{}", info.display_name());
    println!("  kind:     {}", info.kind.label());
    println!(
        "  duration: {} ({:.3}s)",
        format_duration(info.duration_seconds),
        info.duration_seconds
    );
    Ok(())
}
