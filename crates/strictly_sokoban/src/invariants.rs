//! First-class board invariants.
//!
//! Invariants are logical properties that must hold throughout play. They are
//! checked after every accepted move in debug builds and can be tested
//! independently.

use crate::board::Board;
use crate::tile::Tile;
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Exactly one cell carries the player.
pub struct SinglePlayer;

impl Invariant<Board> for SinglePlayer {
    #[instrument(skip(board))]
    fn holds(board: &Board) -> bool {
        let players = board.count_with(Tile::PLAYER);
        let valid = players == 1;
        if !valid {
            warn!(players, "Single player invariant violated");
        }
        valid
    }

    fn description() -> &'static str {
        "exactly one cell carries the player"
    }
}

/// Player and box never share a cell, and walls stand alone.
pub struct ExclusiveOccupants;

impl Invariant<Board> for ExclusiveOccupants {
    #[instrument(skip(board))]
    fn holds(board: &Board) -> bool {
        let offending = board.positions().find(|(_, tile)| {
            tile.contains(Tile::PLAYER | Tile::BOX)
                || (tile.contains(Tile::WALL) && *tile != Tile::WALL)
        });
        if let Some((pos, tile)) = offending {
            warn!(%pos, ?tile, "Exclusive occupants invariant violated");
        }
        offending.is_none()
    }

    fn description() -> &'static str {
        "player and box never share a cell and walls stand alone"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (SinglePlayer, ExclusiveOccupants);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_invariants_hold_for_parsed_level() {
        let board = Board::parse("#####\n#@$.#\n#####").unwrap();
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_detects_missing_player() {
        let board = Board::parse("#$.#").unwrap();
        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, SinglePlayer::description());
    }

    #[test]
    fn test_detects_player_on_box() {
        let mut board = Board::parse("@$").unwrap();
        board
            .set(Position::new(1, 0), Tile::BOX | Tile::PLAYER)
            .unwrap();
        board.set(Position::new(0, 0), Tile::EMPTY).unwrap();
        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(
            violations,
            vec![InvariantViolation::new(ExclusiveOccupants::description())]
        );
    }

    #[test]
    fn test_detects_wall_overlay() {
        let mut board = Board::parse("@#").unwrap();
        board
            .set(Position::new(1, 0), Tile::WALL | Tile::GOAL)
            .unwrap();
        assert!(!ExclusiveOccupants::holds(&board));
        assert!(SinglePlayer::holds(&board));
    }
}
