use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{BoardConfig, Cell, CellCount, Coord, Coord2, NeighborIter, NeighborIterExt, ToNdIndex};

/// Fixed-size rectangular grid of [`Cell`]s. Dimensions never change for the
/// board's lifetime; a new game replaces the board wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub(crate) fn new(config: &BoardConfig) -> Self {
        let shape = (usize::from(config.width), usize::from(config.height));
        let cells = Array2::from_shape_fn(shape, |(x, y)| Cell::at((x as Coord, y as Coord)));
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    /// Copy of the cell at `coords`. Panics on out-of-bounds coordinates.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// All cells in a fixed traversal order, for rendering or counting.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count()
            .try_into()
            .unwrap()
    }

    /// Recompute stored adjacency counts after mine placement. Mine cells are
    /// skipped; their count carries no meaning.
    pub(crate) fn update_adjacency_counts(&mut self) {
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                if self[(x, y)].is_mine {
                    continue;
                }
                let count = self.adjacent_mine_count((x, y));
                self.cell_mut((x, y)).adjacent_mines = count;
            }
        }
    }

    /// Force-reveal every mine cell. Flags are left untouched.
    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                cell.revealed = true;
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
