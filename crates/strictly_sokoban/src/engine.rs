//! Push resolution.
//!
//! A move is attempted from the cell of whatever wants to move. The chain of
//! boxes ahead of it is walked forward to the first cell that is not a box.
//! Only if that cell can take a box does anything slide, starting at the far
//! end, so a blocked chain leaves the board untouched.

use crate::board::Board;
use crate::error::SokobanResult;
use crate::position::{Direction, Position};
use crate::tile::Tile;
use tracing::{debug, instrument, trace};

/// Attempts to move the occupant of `from` one cell in `direction`.
///
/// Returns `Ok(true)` if the board changed and `Ok(false)` if the move was
/// blocked (wall, board edge, immovable chain, or nothing to move at `from`).
/// A blocked move never mutates the board. Chains of any length are
/// resolved without recursion.
///
/// # Errors
///
/// `OutOfBounds` if `from` itself is not on the board.
#[instrument(skip(board), fields(width = board.width(), height = board.height()))]
pub fn push(board: &mut Board, from: Position, direction: Direction) -> SokobanResult<bool> {
    let occupant = board.get(from)?;
    if !occupant.is_mover() {
        debug!(?occupant, "Nothing to move");
        return Ok(false);
    }

    // Each mover with the tile it will displace.
    let mut chain: Vec<(Position, Tile)> = vec![(from, occupant)];
    let mut cursor = from;
    let (destination, landing) = loop {
        let Some(target) = board.neighbor(cursor, direction) else {
            trace!(len = chain.len(), "Blocked by board edge");
            return Ok(false);
        };
        let obstacle = board.get(target)?;

        if obstacle.is_empty() || obstacle.is_bare_goal() {
            break (target, obstacle);
        }
        if !obstacle.contains(Tile::BOX) {
            trace!(?obstacle, len = chain.len(), "Blocked");
            return Ok(false);
        }
        chain.push((target, obstacle));
        cursor = target;
    };

    debug!(len = chain.len(), "Chain moves");
    let mut to = destination;
    let mut displaced = landing;
    for (pos, tile) in chain.into_iter().rev() {
        slide(board, pos, to, tile, displaced)?;
        to = pos;
        displaced = tile;
    }
    Ok(true)
}

/// Moves `occupant` from `from` to `to`, keeping goal flags with their cells.
///
/// `obstacle` is what stood on `to` before the move started; if it was a
/// box, that box has already slid on.
fn slide(
    board: &mut Board,
    from: Position,
    to: Position,
    occupant: Tile,
    obstacle: Tile,
) -> SokobanResult<()> {
    let left_behind = if occupant.contains(Tile::GOAL) {
        Tile::GOAL
    } else {
        Tile::EMPTY
    };

    let mut arrived = occupant.without_goal();
    if obstacle.contains(Tile::GOAL) {
        arrived |= Tile::GOAL;
    }

    board.set(from, left_behind)?;
    board.set(to, arrived)?;
    trace!(%from, %to, ?arrived, "Slid");
    Ok(())
}
