//! Level progression across a sequence of sessions.
//!
//! The campaign owns the loop: build a session per level, feed it commands
//! from a [`Frontend`], show the result, and move on when the level is won.
//! Drawing and input are the frontend's business, so the engine stays free of
//! any terminal API.

use crate::action::Command;
use crate::board::Board;
use crate::error::{SokobanError, SokobanErrorKind, SokobanResult};
use crate::session::{Phase, Session};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, instrument};

/// A named layout.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Level {
    /// Display name, usually the file stem.
    #[new(into)]
    name: String,
    /// Layout text in the tile alphabet.
    #[new(into)]
    layout: String,
}

/// What a restart request starts over.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RestartScope {
    /// Back to the first level with the total move count cleared.
    #[default]
    Campaign,
    /// Replay only the current level; earlier totals are kept.
    Level,
}

/// Read-only snapshot handed to the frontend after every command.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Zero-based index of the level being played.
    pub level_index: usize,
    /// Number of levels in the campaign.
    pub level_count: usize,
    /// Name of the level being played.
    pub level_name: &'a str,
    /// Moves made on this level.
    pub moves: u32,
    /// Moves accumulated over completed levels.
    pub total_moves: u32,
    /// Session phase.
    pub phase: Phase,
}

impl View<'_> {
    /// True once the level is solved.
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// True once a restart has been requested.
    pub fn restart_requested(&self) -> bool {
        self.phase == Phase::Restarting
    }
}

/// Result of one completed level.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct LevelSummary {
    /// Zero-based index of the level.
    index: usize,
    /// Level name.
    name: String,
    /// Moves made on the level.
    moves: u32,
    /// Campaign total including this level.
    total_moves: u32,
    /// True for the final level.
    last: bool,
}

/// How a campaign ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignOutcome {
    /// Every level was solved.
    Completed {
        /// Moves over all levels.
        total_moves: u32,
    },
    /// The player quit.
    Quit {
        /// Index of the level being played when quitting.
        level: usize,
        /// Moves over the levels completed before quitting.
        total_moves: u32,
    },
}

/// Rendering and input collaborator for a campaign.
pub trait Frontend {
    /// Frontend failure type; engine errors are folded into it.
    type Error: From<SokobanError>;

    /// Shows the current state.
    fn render(&mut self, view: &View<'_>) -> Result<(), Self::Error>;

    /// Blocks until the next command is available.
    fn next_command(&mut self) -> Result<Command, Self::Error>;

    /// Called once per solved level, before the next one starts.
    fn level_complete(&mut self, summary: &LevelSummary) -> Result<(), Self::Error>;
}

/// An ordered run through a list of levels.
#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<Level>,
    restart_scope: RestartScope,
    current: usize,
    total_moves: u32,
}

impl Campaign {
    /// Creates a campaign starting at the first level.
    ///
    /// # Errors
    ///
    /// `NoLevels` if `levels` is empty.
    #[instrument(skip(levels), fields(count = levels.len()))]
    pub fn new(levels: Vec<Level>, restart_scope: RestartScope) -> SokobanResult<Self> {
        if levels.is_empty() {
            return Err(SokobanError::new(SokobanErrorKind::NoLevels));
        }
        Ok(Self {
            levels,
            restart_scope,
            current: 0,
            total_moves: 0,
        })
    }

    /// All levels, in play order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Index of the level being played.
    pub fn current_level(&self) -> usize {
        self.current
    }

    /// Moves accumulated over completed levels.
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// Plays levels until the campaign is completed or the player quits.
    ///
    /// # Errors
    ///
    /// Frontend failures, and engine errors for levels that cannot be
    /// loaded.
    #[instrument(skip_all, fields(levels = self.levels.len(), scope = %self.restart_scope))]
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> Result<CampaignOutcome, F::Error> {
        loop {
            let level = &self.levels[self.current];
            info!(index = self.current, name = %level.name, "Starting level");
            let mut session = Session::new(&level.layout)?;
            frontend.render(&self.view(&session))?;

            while session.phase() == Phase::Playing {
                let command = frontend.next_command()?;
                debug!(%command, "Command received");
                if command == Command::Quit {
                    info!(level = self.current, "Player quit");
                    return Ok(CampaignOutcome::Quit {
                        level: self.current,
                        total_moves: self.total_moves,
                    });
                }
                session.apply(command)?;
                frontend.render(&self.view(&session))?;
            }

            if session.phase() == Phase::Won {
                self.total_moves += session.moves();
                let last = self.current + 1 == self.levels.len();
                let summary = LevelSummary::new(
                    self.current,
                    self.levels[self.current].name.clone(),
                    session.moves(),
                    self.total_moves,
                    last,
                );
                info!(moves = session.moves(), total = self.total_moves, "Level complete");
                frontend.level_complete(&summary)?;
                if last {
                    return Ok(CampaignOutcome::Completed {
                        total_moves: self.total_moves,
                    });
                }
                self.current += 1;
            } else {
                self.restart();
            }
        }
    }

    fn restart(&mut self) {
        match self.restart_scope {
            RestartScope::Campaign => {
                info!("Restarting campaign");
                self.current = 0;
                self.total_moves = 0;
            }
            RestartScope::Level => {
                info!(level = self.current, "Restarting level");
            }
        }
    }

    fn view<'a>(&'a self, session: &'a Session) -> View<'a> {
        View {
            board: session.board(),
            level_index: self.current,
            level_count: self.levels.len(),
            level_name: &self.levels[self.current].name,
            moves: session.moves(),
            total_moves: self.total_moves,
            phase: session.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_campaign_rejected() {
        let err = Campaign::new(Vec::new(), RestartScope::default()).unwrap_err();
        assert_eq!(err.kind, SokobanErrorKind::NoLevels);
    }

    #[test]
    fn test_restart_scope_parses_lowercase() {
        assert_eq!("level".parse::<RestartScope>().unwrap(), RestartScope::Level);
        assert_eq!(
            "campaign".parse::<RestartScope>().unwrap(),
            RestartScope::Campaign
        );
        assert_eq!(RestartScope::Level.to_string(), "level");
        assert!("everything".parse::<RestartScope>().is_err());
    }
}
