//! Command-line interface for strictly_sokoban.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_sokoban::RestartScope;

/// Strictly Sokoban - push-chain puzzles in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_sokoban")]
#[command(about = "Sokoban with recursive push chains", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the levels in order
    Play {
        /// Directory containing *.txt level files
        #[arg(short, long)]
        levels: Option<PathBuf>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// What a restart starts over: level or campaign
        #[arg(long)]
        restart_scope: Option<RestartScope>,
    },

    /// Validate level files without playing them
    Check {
        /// Directory containing *.txt level files
        #[arg(short, long)]
        levels: Option<PathBuf>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
