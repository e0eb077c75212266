//! Strictly Sokoban - pure box-pushing game logic.
//!
//! # Architecture
//!
//! - **Tile**: bit flags for what occupies a cell, with goals as an overlay
//! - **Board**: fixed-size grid parsed from layout text
//! - **Engine**: push-chain resolution with all-or-nothing mutation
//! - **Session**: one level's moves, win check and restart flag
//! - **Campaign**: level progression behind an abstract [`Frontend`]
//!
//! # Example
//!
//! ```
//! use strictly_sokoban::{Direction, Phase, Session};
//!
//! # fn example() -> Result<(), strictly_sokoban::SokobanError> {
//! let mut session = Session::new("#####\n#@$.#\n#####")?;
//! assert!(session.apply_move(Direction::Right)?);
//! assert_eq!(session.phase(), Phase::Won);
//! assert_eq!(session.board().to_string(), "#####\n# @*#\n#####");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod campaign;
mod contracts;
mod engine;
mod error;
mod invariants;
mod position;
mod session;
mod tile;

// Crate-level exports - Core model
pub use board::Board;
pub use position::{Direction, Position};
pub use tile::Tile;

// Crate-level exports - Rules
pub use contracts::{Contract, MoveContract};
pub use engine::push;
pub use invariants::{
    BoardInvariants, ExclusiveOccupants, Invariant, InvariantSet, InvariantViolation, SinglePlayer,
};

// Crate-level exports - Play
pub use action::Command;
pub use campaign::{Campaign, CampaignOutcome, Frontend, Level, LevelSummary, RestartScope, View};
pub use session::{Phase, Session};

// Crate-level exports - Errors
pub use error::{SokobanError, SokobanErrorKind, SokobanResult};
