//! CLI argument definitions for a2probe

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "a2probe")]
#[command(about = "Layout prober for Aion2 damage record payloads", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe payload lines from a meter debug log for candidate layouts
    #[command(visible_alias = "p")]
    Probe {
        /// Read log lines from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Max padding bytes to try between the target and actor fields
        /// (overrides the configured default)
        #[arg(short = 'g', long)]
        max_gap: Option<usize>,

        /// Print the raw payload bytes of each record
        #[arg(short, long)]
        show_raw: bool,

        /// Emit reports as JSON instead of console text
        #[arg(short, long)]
        json: bool,
    },

    /// Inspect a single payload given as hex bytes
    #[command(visible_alias = "i")]
    Inspect {
        /// Payload bytes as hex pairs (spaces allowed; quote the argument)
        payload: String,

        /// Report every offset where a varint decodes to this value
        #[arg(short, long)]
        find: Option<u64>,

        /// Max leading varints to summarize
        #[arg(short, long, default_value_t = 12)]
        limit: usize,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default gap bound used by probe
        #[arg(long)]
        max_gap: Option<usize>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
