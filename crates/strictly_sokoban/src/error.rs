//! Error types for the Sokoban engine.

use crate::session::Phase;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SokobanErrorKind {
    /// A layout contained a character outside the tile alphabet.
    #[display("Unknown tile symbol {:?} at row {}, column {}", symbol, row, column)]
    Parse {
        /// Zero-based row of the offending character.
        row: usize,
        /// Zero-based column of the offending character.
        column: usize,
        /// The offending character.
        symbol: char,
    },

    /// A layout had no rows, or only empty ones.
    #[display("Layout is empty")]
    EmptyLayout,

    /// A coordinate fell outside the board.
    #[display("Position ({}, {}) is outside the {}x{} board", x, y, width, height)]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },

    /// A board or session invariant does not hold.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// The session no longer accepts moves.
    #[display("Session is over ({})", _0)]
    SessionOver(Phase),

    /// A campaign was created without any level.
    #[display("No levels to play")]
    NoLevels,
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Sokoban error: {} at {}:{}", kind, file, line)]
pub struct SokobanError {
    /// Error kind.
    pub kind: SokobanErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SokobanError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: SokobanErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &SokobanErrorKind {
        &self.kind
    }
}

impl From<SokobanErrorKind> for SokobanError {
    #[track_caller]
    fn from(kind: SokobanErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result alias for engine operations.
pub type SokobanResult<T> = Result<T, SokobanError>;
