//! First-class player commands.
//!
//! Commands are what a front end produces from raw input. They carry intent
//! only; the session decides whether a move is legal.

use crate::position::Direction;
use serde::{Deserialize, Serialize};

/// A single player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Command {
    /// Step (and push) in a direction.
    #[display("move {}", _0)]
    Move(Direction),
    /// Abandon the current attempt and start over.
    #[display("restart")]
    Restart,
    /// Leave the game.
    #[display("quit")]
    Quit,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Move(direction)
    }
}
