//! Terminal front end for Strictly Sokoban.
//!
//! Everything that touches the outside world lives here: command-line
//! parsing, configuration, level files on disk, key bindings and drawing.
//! The game rules come from [`strictly_sokoban`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod check;
pub mod cli;
pub mod config;
pub mod input;
pub mod levels;
pub mod terminal;
pub mod ui;

pub use check::{LevelReport, check_levels, format_table};
pub use cli::{Cli, Command};
pub use config::{Config, ConfigError};
pub use levels::load_levels;
pub use terminal::TerminalFrontend;
pub use ui::UiOptions;
