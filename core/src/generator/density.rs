use super::*;

/// Places a mine in each eligible cell with independent probability
/// `density`, leaving a cross-shaped safe zone around the first revealed
/// cell. The total mine count therefore varies from game to game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DensityMineGenerator {
    seed: u64,
    density: f64,
}

impl DensityMineGenerator {
    pub fn new(seed: u64, density: f64) -> Self {
        Self { seed, density }
    }
}

/// The safe zone is the union of the two bands `|dx| < 2` and `|dy| < 2`
/// around the initial cell: a full cross spanning the board, not a 3x3 block.
fn in_safe_cross(initial: Coord2, coords: Coord2) -> bool {
    initial.0.abs_diff(coords.0) < 2 || initial.1.abs_diff(coords.1) < 2
}

impl MineGenerator for DensityMineGenerator {
    fn generate(self, board: &mut Board, initial: Coord2) {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (width, height) = board.size();
        let mut placed: CellCount = 0;

        for y in 0..height {
            for x in 0..width {
                if in_safe_cross(initial, (x, y)) {
                    continue;
                }
                if rng.random_bool(self.density) {
                    board.cell_mut((x, y)).is_mine = true;
                    placed += 1;
                }
            }
        }

        log::debug!(
            "placed {} mines on {}x{} board anchored at {:?}",
            placed,
            width,
            height,
            initial
        );
    }
}
