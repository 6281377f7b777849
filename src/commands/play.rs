//! Play command handler

use std::path::Path;

use anyhow::Result;

use midiplay::player::{play_file, PlaybackResult};
use midiplay::Config;

/// Open the interactive player on `file`.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let config = Config::load()?;

    match play_file(file, &config)? {
        PlaybackResult::Finished(name) => println!("Finished: {}", name),
        PlaybackResult::Interrupted => println!("Stopped"),
        PlaybackResult::Error(e) => anyhow::bail!(e),
    }
    Ok(())
}
