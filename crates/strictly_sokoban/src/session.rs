//! One level's play, from initial layout to completion.

use crate::action::Command;
use crate::board::Board;
use crate::engine;
use crate::error::{SokobanError, SokobanErrorKind, SokobanResult};
use crate::position::{Direction, Position};
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

#[cfg(debug_assertions)]
use crate::contracts::{Contract, MoveContract};

/// Lifecycle of a session.
///
/// `Playing` is the only phase that accepts moves; `Won` and `Restarting`
/// are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// Accepting moves.
    Playing,
    /// Every box rests on a goal.
    Won,
    /// The player asked to start over.
    Restarting,
}

/// A board plus the bookkeeping for playing it.
///
/// Deserializing rebuilds the player position from the board and rejects
/// a phase the board contradicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    board: Board,
    player: Position,
    moves: u32,
    phase: Phase,
}

/// Serialized form of a session, validated on the way in.
#[derive(Deserialize)]
struct SessionRecord {
    board: Board,
    moves: u32,
    phase: Phase,
}

impl TryFrom<SessionRecord> for Session {
    type Error = SokobanError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let mut session = Self::from_board(record.board)?;
        session.moves = record.moves;
        match (record.phase, session.phase) {
            (Phase::Won, Phase::Playing) => {
                return Err(SokobanError::new(SokobanErrorKind::InvariantViolation(
                    "session marked won but boxes remain off goal".to_string(),
                )));
            }
            (Phase::Restarting, Phase::Playing) => session.phase = Phase::Restarting,
            _ => {}
        }
        Ok(session)
    }
}

impl Session {
    /// Builds a session from a layout.
    ///
    /// # Errors
    ///
    /// Parse errors from [`Board::parse`], and `InvariantViolation` if the
    /// layout does not hold exactly one player.
    #[instrument(skip(layout))]
    pub fn new(layout: &str) -> SokobanResult<Self> {
        Self::from_board(Board::parse(layout)?)
    }

    /// Builds a session around an existing board.
    ///
    /// A board without loose boxes starts out won.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the board does not hold exactly one player.
    #[instrument(skip(board))]
    pub fn from_board(board: Board) -> SokobanResult<Self> {
        let player = board.player_position()?;
        let mut session = Self {
            board,
            player,
            moves: 0,
            phase: Phase::Playing,
        };
        if session.is_won() {
            session.phase = Phase::Won;
        }
        debug!(%player, phase = %session.phase, "Session created");
        Ok(session)
    }

    /// Moves the player one step, pushing any chain of boxes in the way.
    ///
    /// Returns whether the board changed. The move counter only advances on
    /// `true`.
    ///
    /// # Errors
    ///
    /// `SessionOver` once the session is won or restarting. Invariant
    /// violations detected after the move (debug builds) are also reported.
    #[instrument(skip(self), fields(moves = self.moves, player = %self.player))]
    pub fn apply_move(&mut self, direction: Direction) -> SokobanResult<bool> {
        if self.phase != Phase::Playing {
            return Err(SokobanError::new(SokobanErrorKind::SessionOver(self.phase)));
        }

        #[cfg(debug_assertions)]
        let before = self.board.clone();

        if !engine::push(&mut self.board, self.player, direction)? {
            debug!("Move blocked");
            return Ok(false);
        }

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &self.board)?;

        self.moves += 1;
        self.player = self.board.player_position()?;

        if self.is_won() {
            info!(moves = self.moves, "Level solved");
            self.phase = Phase::Won;
        }
        Ok(true)
    }

    /// Routes a command to the session.
    ///
    /// `Quit` is left to the caller and never changes the session.
    ///
    /// # Errors
    ///
    /// See [`Session::apply_move`].
    pub fn apply(&mut self, command: Command) -> SokobanResult<bool> {
        match command {
            Command::Move(direction) => self.apply_move(direction),
            Command::Restart => {
                self.request_restart();
                Ok(false)
            }
            Command::Quit => Ok(false),
        }
    }

    /// True when no box is left off a goal.
    pub fn is_won(&self) -> bool {
        self.board.count(Tile::BOX) == 0
    }

    /// Flags the session for restart. The board is left as is.
    #[instrument(skip(self))]
    pub fn request_restart(&mut self) {
        if self.phase == Phase::Playing {
            info!(moves = self.moves, "Restart requested");
            self.phase = Phase::Restarting;
        }
    }

    /// True once a restart has been requested.
    pub fn restart_requested(&self) -> bool {
        self.phase == Phase::Restarting
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves that changed the board.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Where the player stands.
    pub fn player(&self) -> Position {
        self.player
    }

    /// Boxes not yet on a goal.
    pub fn boxes_remaining(&self) -> usize {
        self.board.count(Tile::BOX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_locates_player() {
        let session = Session::new("#####\n#@$.#\n#####").unwrap();
        assert_eq!(session.player(), Position::new(1, 1));
        assert_eq!(session.moves(), 0);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.boxes_remaining(), 1);
    }

    #[test]
    fn test_new_requires_a_player() {
        let err = Session::new("#$.#").unwrap_err();
        assert!(matches!(err.kind, SokobanErrorKind::InvariantViolation(_)));
    }

    #[test]
    fn test_solved_layout_starts_won() {
        let session = Session::new("#@*#").unwrap();
        assert!(session.is_won());
        assert_eq!(session.phase(), Phase::Won);
    }

    #[test]
    fn test_winning_move_ends_session() {
        let mut session = Session::new("#@$.#").unwrap();
        assert!(session.apply_move(Direction::Right).unwrap());
        assert_eq!(session.phase(), Phase::Won);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.player(), Position::new(2, 0));

        let err = session.apply_move(Direction::Left).unwrap_err();
        assert_eq!(err.kind, SokobanErrorKind::SessionOver(Phase::Won));
    }

    #[test]
    fn test_restart_leaves_board_alone() {
        let mut session = Session::new("#@ $.#").unwrap();
        session.apply_move(Direction::Right).unwrap();
        let board = session.board().clone();

        assert!(!session.apply(Command::Restart).unwrap());
        assert!(session.restart_requested());
        assert_eq!(session.board(), &board);
        assert_eq!(session.moves(), 1);
        assert!(session.apply_move(Direction::Right).is_err());
    }

    #[test]
    fn test_restart_ignored_after_win() {
        let mut session = Session::new("#@$.#").unwrap();
        session.apply_move(Direction::Right).unwrap();
        session.request_restart();
        assert_eq!(session.phase(), Phase::Won);
        assert!(!session.restart_requested());
    }

    #[test]
    fn test_deserialize_recomputes_player() {
        let json = r##"{"board":"#@$ .#","player":{"x":4,"y":0},"moves":3,"phase":"Playing"}"##;
        let mut session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.player(), Position::new(1, 0));
        assert_eq!(session.moves(), 3);
        assert!(session.apply_move(Direction::Right).unwrap());
        assert_eq!(session.moves(), 4);
    }

    #[test]
    fn test_deserialize_rejects_false_win() {
        let json = r##"{"board":"#@$.#","moves":0,"phase":"Won"}"##;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn test_deserialize_keeps_restart_and_detects_win() {
        let json = r##"{"board":"#@$.#","moves":2,"phase":"Restarting"}"##;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.restart_requested());

        let json = r##"{"board":"# @*#","moves":1,"phase":"Playing"}"##;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.phase(), Phase::Won);
    }

    #[test]
    fn test_deserialize_rejects_board_without_player() {
        let json = r##"{"board":"#$.#","moves":0,"phase":"Playing"}"##;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn test_quit_is_a_no_op() {
        let mut session = Session::new("#@$.#").unwrap();
        let before = session.clone();
        assert!(!session.apply(Command::Quit).unwrap());
        assert_eq!(session, before);
    }
}
