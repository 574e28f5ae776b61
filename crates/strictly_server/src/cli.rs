//! Command-line interface for strictly_farkle.

use clap::{Parser, Subcommand};

/// Strictly Farkle - Farkle played through hypermedia action links
#[derive(Parser, Debug)]
#[command(name = "strictly_farkle")]
#[command(about = "Farkle game server driven by tokenised action links", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to server config (TOML). Defaults apply when the file is missing.
        #[arg(short, long, default_value = "strictly_farkle.toml")]
        config: std::path::PathBuf,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Base URL advertised in action links
        #[arg(long)]
        public_url: Option<String>,

        /// Seed for reproducible dice
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score six dice and print the result
    Score {
        /// Six faces between 1 and 6
        #[arg(num_args = 6, required = true)]
        faces: Vec<u8>,
    },
}
