//! midiplay binary entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use midiplay::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { file } => commands::play::handle(&file),
        Commands::Info { file } => commands::info::handle(&file),
        Commands::Convert {
            input,
            output,
            conversion,
        } => commands::convert::handle(&input, &output, conversion),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Init => commands::config::handle_init(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
