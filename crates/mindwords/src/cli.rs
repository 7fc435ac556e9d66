//! Command-line interface for mindwords.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mindwords - guess the word with clues, levels and a leaderboard
#[derive(Parser, Debug)]
#[command(name = "mindwords")]
#[command(about = "Word-guessing game with clues and a remote leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(long, global = true, default_value = "mindwords.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Player name for the leaderboard (saved for next time)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the leaderboard
    Board {
        /// Number of rows to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Save the player name
    Name {
        /// New player name
        name: String,
    },
}
