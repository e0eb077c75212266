//! The rectangular grid of tiles.

use crate::error::{SokobanError, SokobanErrorKind, SokobanResult};
use crate::position::{Direction, Position};
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A fixed-size grid of [`Tile`]s in row-major order.
///
/// Serializes as its layout text, so a board in JSON reads the same as a
/// level file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Parses a layout into a board.
    ///
    /// Rows are separated by `\n`; a `\r` ending a row is ignored. The board is
    /// as wide as the longest row; shorter rows are padded with empty cells.
    ///
    /// # Errors
    ///
    /// - `Parse` for a character outside the tile alphabet.
    /// - `EmptyLayout` if there is nothing to build a grid from.
    #[instrument(skip(layout), fields(len = layout.len()))]
    pub fn parse(layout: &str) -> SokobanResult<Self> {
        let rows: Vec<Vec<Tile>> = layout
            .lines()
            .enumerate()
            .map(|(row, line)| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                line.chars()
                    .enumerate()
                    .map(|(column, symbol)| {
                        Tile::from_symbol(symbol).ok_or_else(|| {
                            SokobanError::new(SokobanErrorKind::Parse {
                                row,
                                column,
                                symbol,
                            })
                        })
                    })
                    .collect::<SokobanResult<Vec<_>>>()
            })
            .collect::<SokobanResult<_>>()?;

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        if width == 0 {
            return Err(SokobanError::new(SokobanErrorKind::EmptyLayout));
        }

        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Tile::EMPTY);
            cells.extend(row);
        }

        debug!(width, height, "Parsed layout");
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if `pos` lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[track_caller]
    fn index(&self, pos: Position) -> SokobanResult<usize> {
        if self.contains(pos) {
            Ok(pos.y * self.width + pos.x)
        } else {
            Err(SokobanError::new(SokobanErrorKind::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            }))
        }
    }

    /// Returns the tile at `pos`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `pos` is not on the board.
    #[track_caller]
    pub fn get(&self, pos: Position) -> SokobanResult<Tile> {
        Ok(self.cells[self.index(pos)?])
    }

    /// Replaces the tile at `pos`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `pos` is not on the board.
    #[track_caller]
    pub fn set(&mut self, pos: Position, tile: Tile) -> SokobanResult<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = tile;
        Ok(())
    }

    /// The cell next to `pos` in `direction`, if it is on the board.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.step(direction).filter(|next| self.contains(*next))
    }

    /// Locates the single cell carrying the player.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if there is no player or more than one.
    #[instrument(skip(self))]
    pub fn player_position(&self) -> SokobanResult<Position> {
        let mut players = self
            .positions()
            .filter(|(_, tile)| tile.contains(Tile::PLAYER))
            .map(|(pos, _)| pos);

        match (players.next(), players.next()) {
            (Some(pos), None) => Ok(pos),
            (None, _) => Err(SokobanError::new(SokobanErrorKind::InvariantViolation(
                "board has no player".to_string(),
            ))),
            (Some(first), Some(second)) => Err(SokobanError::new(
                SokobanErrorKind::InvariantViolation(format!(
                    "board has more than one player, at {} and {}",
                    first, second
                )),
            )),
        }
    }

    /// Every cell with its position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells.iter().enumerate().map(|(idx, tile)| {
            (Position::new(idx % self.width, idx / self.width), *tile)
        })
    }

    /// The board as slices of rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.width)
    }

    /// Number of cells equal to exactly `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|t| **t == tile).count()
    }

    /// Number of cells carrying every flag in `flags`.
    pub fn count_with(&self, flags: Tile) -> usize {
        self.cells.iter().filter(|t| t.contains(flags)).count()
    }

    /// Renders the board back to layout text, rows joined by `\n`.
    ///
    /// A cell with an illegal flag combination renders as `?`.
    pub fn render(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|tile| tile.symbol().unwrap_or('?'))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::str::FromStr for Board {
    type Err = SokobanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Board {
    type Error = SokobanError;

    fn try_from(layout: String) -> Result<Self, Self::Error> {
        Self::parse(&layout)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_short_rows() {
        let board = Board::parse("####\n#@\n#$.#").expect("valid layout");
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get(Position::new(3, 1)).unwrap(), Tile::EMPTY);
        assert_eq!(board.get(Position::new(1, 2)).unwrap(), Tile::BOX);
        assert_eq!(board.get(Position::new(2, 2)).unwrap(), Tile::GOAL);
    }

    #[test]
    fn test_parse_ignores_carriage_returns_and_trailing_newline() {
        let board = Board::parse("#@#\r\n#*#\r\n").expect("valid layout");
        assert_eq!(board.height(), 2);
        assert_eq!(board.width(), 3);
        assert_eq!(board.get(Position::new(1, 1)).unwrap(), Tile::BOX_ON_GOAL);
    }

    #[test]
    fn test_parse_ignores_carriage_return_without_newline() {
        let board = Board::parse("#@#\r\n#.#\r").expect("valid layout");
        assert_eq!(board.height(), 2);
        assert_eq!(board.width(), 3);
        assert_eq!(board.render(), "#@#\n#.#");
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let err = Board::parse("#@#\n#x#").unwrap_err();
        assert_eq!(
            err.kind,
            SokobanErrorKind::Parse {
                row: 1,
                column: 1,
                symbol: 'x'
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_layout() {
        for layout in ["", "\n", "\n\n\n"] {
            let err = Board::parse(layout).unwrap_err();
            assert_eq!(err.kind, SokobanErrorKind::EmptyLayout);
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::parse("@ ").unwrap();
        assert!(matches!(
            board.get(Position::new(2, 0)).unwrap_err().kind,
            SokobanErrorKind::OutOfBounds { x: 2, y: 0, .. }
        ));
        assert!(board.set(Position::new(0, 1), Tile::BOX).is_err());
    }

    #[test]
    fn test_player_position() {
        let board = Board::parse("# #\n #+").unwrap();
        assert_eq!(board.player_position().unwrap(), Position::new(2, 1));
    }

    #[test]
    fn test_player_position_requires_exactly_one() {
        let none = Board::parse("#$.").unwrap();
        assert!(matches!(
            none.player_position().unwrap_err().kind,
            SokobanErrorKind::InvariantViolation(_)
        ));

        let two = Board::parse("@ @").unwrap();
        assert!(matches!(
            two.player_position().unwrap_err().kind,
            SokobanErrorKind::InvariantViolation(_)
        ));
    }

    #[test]
    fn test_neighbor_stays_on_board() {
        let board = Board::parse("@ \n  ").unwrap();
        let corner = Position::new(1, 1);
        assert_eq!(board.neighbor(corner, Direction::Right), None);
        assert_eq!(board.neighbor(corner, Direction::Down), None);
        assert_eq!(
            board.neighbor(corner, Direction::Up),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn test_render_round_trip() {
        let layout = "#####\n#@$.#\n# * +\n#   #\n#####";
        let board = Board::parse(layout).unwrap();
        assert_eq!(board.render(), layout);
        assert_eq!(Board::parse(&board.render()).unwrap(), board);
    }

    #[test]
    fn test_render_pads_short_rows() {
        let board = Board::parse("###\n@").unwrap();
        assert_eq!(board.to_string(), "###\n@  ");
    }

    #[test]
    fn test_counts() {
        let board = Board::parse("@$*$.").unwrap();
        assert_eq!(board.count(Tile::BOX), 2);
        assert_eq!(board.count_with(Tile::BOX), 3);
        assert_eq!(board.count_with(Tile::GOAL), 2);
    }

    #[test]
    fn test_serde_uses_layout_text() {
        let board = Board::parse("#@$.#").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"#@$.#\"");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
