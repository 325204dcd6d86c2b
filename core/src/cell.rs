use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// One grid position with its mine, adjacency, and player-visible state.
///
/// `adjacent_mines` is meaningful only after mine placement, and never for a
/// cell that is itself a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    pub(crate) fn at((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub const fn pos(&self) -> Coord2 {
        (self.x, self.y)
    }

    /// Whether this cell counts toward the end-of-game covering: revealed, or
    /// carrying a flag that sits on an actual mine.
    pub const fn is_accounted_for(&self) -> bool {
        self.revealed || (self.flagged && self.is_mine)
    }

    /// A flag on a safe cell. Under a full covering this loses the game.
    pub const fn is_misflagged(&self) -> bool {
        self.flagged && !self.is_mine
    }
}
