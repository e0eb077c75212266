//! Strictly Sokoban - terminal player and level checker.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use strictly_sokoban::{Campaign, CampaignOutcome, RestartScope};
use strictly_sokoban_tui::{
    Cli, Command, Config, TerminalFrontend, UiOptions, check_levels, format_table, load_levels,
};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            levels,
            config,
            restart_scope,
        } => {
            let config = resolve_config(config, levels, restart_scope)?;
            init_logging(&config)?;
            run_play(&config)
        }
        Command::Check {
            levels,
            config,
            json,
        } => {
            let config = resolve_config(config, levels, None)?;
            init_logging(&config)?;
            run_check(&config, json)
        }
    }
}

/// Loads the config file and applies command-line overrides.
fn resolve_config(
    path: Option<PathBuf>,
    levels: Option<PathBuf>,
    restart_scope: Option<RestartScope>,
) -> Result<Config> {
    let mut config = Config::load(path.as_deref())?;
    if let Some(levels) = levels {
        config = config.with_levels_dir(levels);
    }
    if let Some(scope) = restart_scope {
        config = config.with_restart_scope(scope);
    }
    Ok(config)
}

/// Logs to a file so the terminal UI stays clean.
fn init_logging(config: &Config) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Plays every level in the configured directory.
#[instrument(skip_all, fields(levels_dir = %config.levels_dir().display()))]
fn run_play(config: &Config) -> Result<()> {
    info!("Starting Strictly Sokoban");

    let levels = load_levels(config.levels_dir())?;
    let mut campaign = Campaign::new(levels, *config.restart_scope())?;

    let options = UiOptions {
        spaced_cells: *config.spaced_cells(),
        show_legend: *config.show_legend(),
    };

    // Dropping the frontend restores the terminal before anything is printed.
    let outcome = {
        let mut frontend = TerminalFrontend::new(options)?;
        campaign.run(&mut frontend)
    };

    match outcome {
        Ok(CampaignOutcome::Completed { total_moves }) => {
            info!(total_moves, "Campaign completed");
            println!(
                "You beat the game with a total move counter of {}.",
                total_moves
            );
            Ok(())
        }
        Ok(CampaignOutcome::Quit { level, total_moves }) => {
            info!(level, total_moves, "Player quit");
            println!(
                "Quit on level {} with {} moves over completed levels.",
                level + 1,
                total_moves
            );
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "Game loop error");
            Err(e)
        }
    }
}

/// Prints a report on every level in the configured directory.
#[instrument(skip_all, fields(levels_dir = %config.levels_dir().display()))]
fn run_check(config: &Config, json: bool) -> Result<()> {
    let levels = load_levels(config.levels_dir())?;
    let reports = check_levels(&levels);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", format_table(&reports));
    }

    let broken = reports.iter().filter(|r| !r.is_playable()).count();
    if broken > 0 {
        anyhow::bail!("{} of {} levels failed to load", broken, reports.len());
    }
    Ok(())
}
