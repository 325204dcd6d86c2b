use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board construction parameters.
///
/// Validated once at construction; the engine trusts any `BoardConfig` it is
/// handed and never re-checks dimensions or density.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mine_density: f64,
}

impl BoardConfig {
    /// Probability that a cell outside the first-reveal safe zone holds a mine.
    pub const DEFAULT_MINE_DENSITY: f64 = 0.2;

    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        Self::with_density(width, height, Self::DEFAULT_MINE_DENSITY)
    }

    pub fn with_density(width: Coord, height: Coord, mine_density: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if !(0.0..=1.0).contains(&mine_density) {
            return Err(GameError::InvalidDensity);
        }
        Ok(Self {
            width,
            height,
            mine_density,
        })
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}
