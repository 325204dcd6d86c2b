use crate::*;

pub use density::*;

mod density;

/// Strategy seam for mine placement. Production play uses
/// [`DensityMineGenerator`]; tests and replays may place layouts directly
/// through [`Session::from_mine_coords`].
pub trait MineGenerator {
    /// Set `is_mine` across the board, anchored on the first revealed cell.
    /// Adjacency counts are recomputed by the caller afterwards.
    fn generate(self, board: &mut Board, initial: Coord2);
}
