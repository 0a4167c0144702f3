//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up a2probe defaults.

use crate::config::Config;
use anyhow::Result;

/// Handle the configure command
///
/// # Arguments
/// * `max_gap` - Optional gap bound to set as the probe default
/// * `show` - If true, show current configuration
pub fn handle(max_gap: Option<usize>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config)?;
        return Ok(());
    }

    if let Some(gap) = max_gap {
        set_max_gap(&mut config, gap)?;
    } else {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    match config.max_gap {
        Some(gap) => println!("Max gap: {}", gap),
        None => println!(
            "No max gap configured (probe uses the default of {})",
            crate::config::DEFAULT_MAX_GAP
        ),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }

    Ok(())
}

/// Set the default gap bound in configuration
fn set_max_gap(config: &mut Config, gap: usize) -> Result<()> {
    config.max_gap = Some(gap);
    config.save()?;

    println!("Max gap configured: {}", gap);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: a2probe configure --max-gap N");
    println!("   or: a2probe configure --show");
    println!();
    println!("Note: the gap bound caps how many padding bytes probe tries");
    println!("      between the target and actor fields of a payload.");
}
