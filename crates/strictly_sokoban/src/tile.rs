//! Cell contents as a set of independent flags.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// What occupies a single board cell.
    ///
    /// Goals are an overlay: a player or box standing on a goal keeps the
    /// `GOAL` flag alongside its own, so one grid represents every state.
    /// `WALL` never combines with anything, and `PLAYER` never shares a cell
    /// with `BOX`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Tile: u8 {
        /// The player.
        const PLAYER = 1 << 0;
        /// A pushable box.
        const BOX = 1 << 1;
        /// A goal square.
        const GOAL = 1 << 2;
        /// An impassable wall.
        const WALL = 1 << 3;
        /// A box resting on a goal.
        const BOX_ON_GOAL = Self::BOX.bits() | Self::GOAL.bits();
        /// The player standing on a goal.
        const PLAYER_ON_GOAL = Self::PLAYER.bits() | Self::GOAL.bits();
    }
}

/// Symbol table shared by parsing, rendering and the legend.
const SYMBOLS: [(Tile, char, &str); 7] = [
    (Tile::EMPTY, ' ', "EMPTY"),
    (Tile::PLAYER, '@', "PLAYER"),
    (Tile::BOX, '$', "BOX"),
    (Tile::GOAL, '.', "GOAL"),
    (Tile::WALL, '#', "WALL"),
    (Tile::BOX_ON_GOAL, '*', "BOX_ON_GOAL"),
    (Tile::PLAYER_ON_GOAL, '+', "PLAYER_ON_GOAL"),
];

impl Tile {
    /// A cell with nothing on it.
    pub const EMPTY: Self = Self::empty();

    /// Looks up the tile for a layout symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        SYMBOLS
            .iter()
            .find(|(_, s, _)| *s == symbol)
            .map(|(tile, _, _)| *tile)
    }

    /// Returns the layout symbol for this tile, if it is a legal combination.
    pub fn symbol(self) -> Option<char> {
        SYMBOLS
            .iter()
            .find(|(tile, _, _)| *tile == self)
            .map(|(_, s, _)| *s)
    }

    /// Returns the display name for this tile, if it is a legal combination.
    pub fn name(self) -> Option<&'static str> {
        SYMBOLS
            .iter()
            .find(|(tile, _, _)| *tile == self)
            .map(|(_, _, name)| *name)
    }

    /// Name and symbol of every non-empty tile, in table order.
    pub fn legend() -> impl Iterator<Item = (&'static str, char)> {
        SYMBOLS
            .iter()
            .filter(|(tile, _, _)| !tile.is_empty())
            .map(|(_, s, name)| (*name, *s))
    }

    /// True for the player and for boxes, with or without a goal beneath.
    pub fn is_mover(self) -> bool {
        self.intersects(Self::PLAYER | Self::BOX)
    }

    /// True if nothing but a goal is on the cell.
    pub fn is_bare_goal(self) -> bool {
        self == Self::GOAL
    }

    /// Strips goal membership, leaving only the occupant.
    pub fn without_goal(self) -> Self {
        self - Self::GOAL
    }
}
