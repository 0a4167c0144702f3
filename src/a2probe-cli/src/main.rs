mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Probe {
            file,
            max_gap,
            show_raw,
            json,
        } => {
            commands::probe::handle(file.as_deref(), max_gap, show_raw, json)?;
        }

        Commands::Inspect {
            payload,
            find,
            limit,
        } => {
            commands::inspect::handle(&payload, find, limit)?;
        }

        Commands::Configure { max_gap, show } => {
            commands::configure::handle(max_gap, show)?;
        }
    }

    Ok(())
}
