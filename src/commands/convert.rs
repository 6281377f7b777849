//! Convert command handler

use std::path::Path;

use anyhow::{Context, Result};

use midiplay::convert::{convert_file, Conversion};

/// Run a conversion and print a one-line confirmation.
pub fn handle(input: &Path, output: &Path, conversion: Conversion) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }

    let summary = convert_file(input, output, conversion).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            input.display(),
            conversion.target().label()
        )
    })?;

    println!(
        "Converted {} ({}) to {} ({}): {} events",
        input.display(),
        conversion.source().label(),
        output.display(),
        conversion.target().label(),
        summary.events
    );
    Ok(())
}
