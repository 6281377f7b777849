//! Config subcommands handler

use anyhow::{Context, Result};

use midiplay::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Write the default configuration file.
///
/// Leaves an existing file untouched.
#[cfg(not(tarpaulin_include))]
pub fn handle_init() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    Config::default()
        .save_to(&config_path)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!("Created {}", config_path.display());
    Ok(())
}
