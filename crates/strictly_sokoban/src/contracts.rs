//! Contract-based validation of moves.
//!
//! A move is a transition `{before} push {after}`. Board invariants must hold
//! afterwards, and a push only ever relocates movers: boxes, goals and walls
//! are conserved.

use crate::board::Board;
use crate::error::{SokobanError, SokobanErrorKind, SokobanResult};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::tile::Tile;
use tracing::{instrument, warn};

/// Postcondition check for a state transition.
pub trait Contract<S> {
    /// Checks that `after` is a valid successor of `before`.
    fn post(before: &S, after: &S) -> SokobanResult<()>;
}

/// Contract for accepted moves.
///
/// Postconditions:
/// - Board invariants hold
/// - Box count is unchanged
/// - Goal count is unchanged
/// - Walls have not moved
pub struct MoveContract;

impl Contract<Board> for MoveContract {
    #[instrument(skip_all)]
    fn post(before: &Board, after: &Board) -> SokobanResult<()> {
        let mut failures: Vec<String> = match BoardInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations.into_iter().map(|v| v.description).collect(),
        };

        if before.count_with(Tile::BOX) != after.count_with(Tile::BOX) {
            failures.push("box count changed".to_string());
        }

        if before.count_with(Tile::GOAL) != after.count_with(Tile::GOAL) {
            failures.push("goal count changed".to_string());
        }

        let walls_fixed = before.width() == after.width()
            && before.height() == after.height()
            && before
                .positions()
                .zip(after.positions())
                .all(|((_, a), (_, b))| (a == Tile::WALL) == (b == Tile::WALL));
        if !walls_fixed {
            failures.push("walls moved".to_string());
        }

        if failures.is_empty() {
            Ok(())
        } else {
            let descriptions = failures.join("; ");
            warn!(%descriptions, "Move postcondition failed");
            Err(SokobanError::new(SokobanErrorKind::InvariantViolation(
                format!("Postcondition failed: {}", descriptions),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::push;
    use crate::position::{Direction, Position};

    #[test]
    fn test_postcondition_holds_after_push() {
        let before = Board::parse("#@$.#").unwrap();
        let mut after = before.clone();
        assert!(push(&mut after, Position::new(1, 0), Direction::Right).unwrap());
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_lost_box() {
        let before = Board::parse("#@$.#").unwrap();
        let mut after = before.clone();
        after.set(Position::new(2, 0), Tile::EMPTY).unwrap();

        let err = MoveContract::post(&before, &after).unwrap_err();
        match err.kind {
            SokobanErrorKind::InvariantViolation(message) => {
                assert!(message.contains("box count changed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_postcondition_detects_moved_wall() {
        let before = Board::parse("#@ #").unwrap();
        let mut after = before.clone();
        after.set(Position::new(2, 0), Tile::WALL).unwrap();
        after.set(Position::new(3, 0), Tile::EMPTY).unwrap();
        assert!(MoveContract::post(&before, &after).is_err());
    }
}
