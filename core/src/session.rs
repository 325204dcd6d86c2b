use serde::{Deserialize, Serialize};

use crate::{
    Board, BoardConfig, Cell, CellCount, Coord2, DensityMineGenerator, GameError, MineGenerator,
    Result,
};

/// Play outcome. Terminal once it leaves `Playing`: every mutator and the
/// outcome check guard on it first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game from reset to win or loss: a board plus the session state that
/// does not belong to any single cell.
///
/// Mines are placed lazily, on the first reveal, so that the revealed cell
/// and its cross-shaped surroundings are guaranteed mine-free. Mutators take
/// in-bounds coordinates by contract; out-of-bounds input panics on the
/// underlying grid access. The engine never runs the outcome check on its
/// own: callers invoke [`Session::check_outcome`] after each mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: BoardConfig,
    board: Board,
    mines_generated: bool,
    outcome: Outcome,
    seed: u64,
}

impl Session {
    /// Fresh session with a seed drawn from the thread RNG.
    pub fn new(config: BoardConfig) -> Self {
        use rand::Rng;
        Self::with_seed(config, rand::rng().random())
    }

    /// Fresh session with a fixed seed for the lazy mine placement.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self {
            config,
            board: Board::new(&config),
            mines_generated: false,
            outcome: Outcome::Playing,
            seed,
        }
    }

    /// Session with an explicit, already-placed mine layout. Adjacency counts
    /// are computed immediately and no lazy generation happens on the first
    /// reveal. `config.mine_density` is ignored.
    pub fn from_mine_coords(config: BoardConfig, mines: &[Coord2]) -> Result<Self> {
        let mut session = Self::with_seed(config, 0);
        for &coords in mines {
            if coords.0 >= config.width || coords.1 >= config.height {
                return Err(GameError::InvalidCoords);
            }
            session.board.cell_mut(coords).is_mine = true;
        }
        session.board.update_adjacency_counts();
        session.mines_generated = true;
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn mines_generated(&self) -> bool {
        self.mines_generated
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total mines on the board; zero until the first reveal places them.
    pub fn mine_count(&self) -> CellCount {
        self.board.cells().filter(|cell| cell.is_mine).count() as CellCount
    }

    /// Mines minus flags, for a UI counter. Negative when overflagged.
    pub fn mines_left(&self) -> i64 {
        let flags = self.board.cells().filter(|cell| cell.flagged).count() as i64;
        i64::from(self.mine_count()) - flags
    }

    /// Reveal the cell at `coords`.
    ///
    /// No-op once the outcome is settled or when the cell is already
    /// revealed. Revealing a mine loses the game and force-reveals every
    /// mine (flags stay put). Revealing a zero-adjacency cell expands across
    /// its connected zero region and one ring beyond it. A flag on the cell
    /// does not prevent revealing it.
    pub fn reveal(&mut self, coords: Coord2) {
        if !self.outcome.is_playing() || self.board[coords].revealed {
            return;
        }

        if !self.mines_generated {
            self.place_mines(coords);
            self.mines_generated = true;
        }

        self.board.cell_mut(coords).revealed = true;

        if self.board[coords].is_mine {
            log::debug!("mine hit at {:?}, game lost", coords);
            self.outcome = Outcome::Lost;
            self.board.reveal_all_mines();
            return;
        }

        self.flood_reveal_zero(coords);
    }

    /// Flip the flag on an unrevealed cell. No-op once the outcome is
    /// settled or on a revealed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) {
        if !self.outcome.is_playing() || self.board[coords].revealed {
            return;
        }
        let cell = self.board.cell_mut(coords);
        cell.flagged = !cell.flagged;
    }

    /// Settle the outcome once the whole board is accounted for, meaning
    /// every cell is revealed or holds a flag sitting on a mine. A flag on a
    /// safe cell under that covering loses the game; otherwise it is won.
    /// Does nothing before the first reveal or after the outcome is settled.
    pub fn check_outcome(&mut self) {
        if !self.mines_generated || !self.outcome.is_playing() {
            return;
        }

        if !self.board.cells().all(Cell::is_accounted_for) {
            return;
        }

        if self.board.cells().any(Cell::is_misflagged) {
            log::debug!("misflag under full covering, game lost");
            self.outcome = Outcome::Lost;
            self.board.reveal_all_mines();
        } else {
            log::debug!("board cleared, game won");
            self.outcome = Outcome::Won;
        }
    }

    fn place_mines(&mut self, initial: Coord2) {
        let generator = DensityMineGenerator::new(self.seed, self.config.mine_density);
        generator.generate(&mut self.board, initial);
        self.board.update_adjacency_counts();
    }

    /// Worklist flood fill over the connected zero-adjacency region around
    /// `start`, which must already be revealed. Neighbors are marked revealed
    /// as they are discovered, so no cell is enqueued twice. Flagged cells
    /// are revealed like any other.
    fn flood_reveal_zero(&mut self, start: Coord2) {
        if self.board[start].adjacent_mines != 0 {
            return;
        }

        let mut pending = vec![start];
        while let Some(coords) = pending.pop() {
            for pos in self.board.iter_neighbors(coords) {
                let neighbor = self.board.cell_mut(pos);
                if neighbor.revealed {
                    continue;
                }
                neighbor.revealed = true;
                log::trace!("flood revealed {:?}, count {}", pos, neighbor.adjacent_mines);
                if neighbor.adjacent_mines == 0 {
                    pending.push(pos);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    fn config(width: Coord, height: Coord) -> BoardConfig {
        BoardConfig::new(width, height).unwrap()
    }

    fn session(width: Coord, height: Coord, mines: &[Coord2]) -> Session {
        Session::from_mine_coords(config(width, height), mines).unwrap()
    }

    #[test]
    fn fresh_session_is_fully_zeroed() {
        let session = Session::with_seed(config(4, 3), 7);

        assert_eq!(session.outcome(), Outcome::Playing);
        assert!(!session.mines_generated());
        assert_eq!(session.mine_count(), 0);
        assert_eq!(session.size(), (4, 3));
        for cell in session.board().cells() {
            assert!(!cell.is_mine);
            assert!(!cell.revealed);
            assert!(!cell.flagged);
            assert_eq!(cell.adjacent_mines, 0);
        }
    }

    #[test]
    fn first_reveal_is_safe_across_the_cross_region() {
        for seed in 0..32 {
            let mut session = Session::with_seed(config(16, 16), seed);
            session.reveal((8, 8));

            assert!(session.mines_generated());
            assert!(!session.board()[(8, 8)].is_mine);
            for cell in session.board().cells() {
                let (x, y) = cell.pos();
                if x.abs_diff(8) < 2 || y.abs_diff(8) < 2 {
                    assert!(!cell.is_mine, "mine in safe cross at {:?}", (x, y));
                }
            }
        }
    }

    #[test]
    fn mines_are_generated_exactly_once() {
        let mut session = Session::with_seed(config(16, 16), 99);
        session.reveal((0, 0));
        let layout: Vec<bool> = session.board().cells().map(|cell| cell.is_mine).collect();

        session.reveal((15, 15));
        let after: Vec<bool> = session.board().cells().map(|cell| cell.is_mine).collect();
        assert_eq!(layout, after);
    }

    #[test]
    fn generated_adjacency_counts_match_neighborhoods() {
        let mut session = Session::with_seed(config(16, 16), 5);
        session.reveal((0, 0));

        let board = session.board();
        let (width, height) = board.size();
        for x in 0..width {
            for y in 0..height {
                if board[(x, y)].is_mine {
                    continue;
                }
                let expected = board
                    .iter_neighbors((x, y))
                    .filter(|&pos| board[pos].is_mine)
                    .count() as u8;
                assert_eq!(board[(x, y)].adjacent_mines, expected, "at {:?}", (x, y));
            }
        }
    }

    #[test]
    fn revealing_a_mine_loses_and_reveals_all_mines() {
        let mut session = session(4, 1, &[(0, 0), (3, 0)]);
        session.toggle_flag((3, 0));

        session.reveal((0, 0));

        assert_eq!(session.outcome(), Outcome::Lost);
        assert!(session.board()[(0, 0)].revealed);
        assert!(session.board()[(3, 0)].revealed);
        assert!(session.board()[(3, 0)].flagged);
        assert!(!session.board()[(1, 0)].revealed);
        assert!(!session.board()[(2, 0)].revealed);
    }

    #[test]
    fn flood_reveal_stops_at_the_nonzero_boundary() {
        let mut session = session(5, 1, &[(2, 0)]);

        session.reveal((0, 0));

        assert!(session.board()[(0, 0)].revealed);
        assert!(session.board()[(1, 0)].revealed);
        assert_eq!(session.board()[(1, 0)].adjacent_mines, 1);
        assert!(!session.board()[(2, 0)].revealed);
        assert!(!session.board()[(3, 0)].revealed);
        assert!(!session.board()[(4, 0)].revealed);
    }

    #[test]
    fn flood_reveal_opens_the_whole_connected_zero_region() {
        let mut session = session(5, 5, &[(4, 4)]);

        session.reveal((0, 0));

        for cell in session.board().cells() {
            if cell.pos() == (4, 4) {
                assert!(!cell.revealed);
            } else {
                assert!(cell.revealed, "unrevealed at {:?}", cell.pos());
            }
        }
        assert_eq!(session.board()[(3, 3)].adjacent_mines, 1);
    }

    #[test]
    fn flood_reveal_runs_through_flagged_cells() {
        let mut session = session(3, 1, &[(2, 0)]);
        session.toggle_flag((1, 0));

        session.reveal((0, 0));

        assert!(session.board()[(1, 0)].revealed);
        assert!(session.board()[(1, 0)].flagged);
    }

    #[test]
    fn check_outcome_wins_once_the_board_is_accounted_for() {
        let mut session = session(3, 1, &[(2, 0)]);

        session.reveal((0, 0));
        session.check_outcome();
        assert_eq!(session.outcome(), Outcome::Playing);

        session.toggle_flag((2, 0));
        session.check_outcome();
        assert_eq!(session.outcome(), Outcome::Won);
    }

    #[test]
    fn misflag_under_a_full_covering_loses() {
        let mut session = session(3, 1, &[(2, 0)]);
        session.toggle_flag((1, 0));
        session.reveal((0, 0));
        session.toggle_flag((2, 0));

        session.check_outcome();

        assert_eq!(session.outcome(), Outcome::Lost);
        assert!(session.board()[(2, 0)].revealed);
    }

    #[test]
    fn terminal_outcome_freezes_the_session() {
        let mut session = session(4, 1, &[(0, 0)]);
        session.reveal((0, 0));
        assert_eq!(session.outcome(), Outcome::Lost);

        let frozen = session.clone();
        session.reveal((2, 0));
        session.toggle_flag((3, 0));
        session.check_outcome();
        assert_eq!(session, frozen);
    }

    #[test]
    fn check_outcome_never_flips_a_settled_outcome() {
        // losing on an all-mine board leaves every cell revealed, which a
        // guardless covering check would misread as a win
        let mut session = session(2, 1, &[(0, 0), (1, 0)]);
        session.reveal((0, 0));
        assert_eq!(session.outcome(), Outcome::Lost);

        session.check_outcome();
        assert_eq!(session.outcome(), Outcome::Lost);
    }

    #[test]
    fn check_outcome_is_a_noop_before_mines_exist() {
        let mut session = Session::with_seed(config(2, 2), 1);
        for x in 0..2 {
            for y in 0..2 {
                session.toggle_flag((x, y));
            }
        }

        session.check_outcome();
        assert_eq!(session.outcome(), Outcome::Playing);
    }

    #[test]
    fn toggle_flag_flips_and_ignores_revealed_cells() {
        let mut session = session(2, 1, &[]);

        session.toggle_flag((0, 0));
        assert!(session.board()[(0, 0)].flagged);
        session.toggle_flag((0, 0));
        assert!(!session.board()[(0, 0)].flagged);

        session.reveal((0, 0));
        session.toggle_flag((1, 0));
        assert!(!session.board()[(1, 0)].flagged, "cell revealed by flood");
    }

    #[test]
    fn three_by_three_center_first_reveal_wins_immediately() {
        for seed in 0..8 {
            let mut session = Session::with_seed(config(3, 3), seed);
            session.reveal((1, 1));

            assert_eq!(session.mine_count(), 0);
            assert!(session.board().cells().all(|cell| cell.revealed));

            session.check_outcome();
            assert_eq!(session.outcome(), Outcome::Won);
        }
    }

    #[test]
    fn single_cell_board_wins_immediately() {
        let mut session = Session::with_seed(config(1, 1), 0);
        session.reveal((0, 0));
        session.check_outcome();

        assert_eq!(session.mine_count(), 0);
        assert_eq!(session.outcome(), Outcome::Won);
    }

    #[test]
    fn mines_left_goes_negative_when_overflagged() {
        let mut session = session(3, 1, &[(2, 0)]);
        assert_eq!(session.mines_left(), 1);

        session.toggle_flag((0, 0));
        session.toggle_flag((1, 0));
        assert_eq!(session.mines_left(), -1);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds_mines() {
        let result = Session::from_mine_coords(config(3, 3), &[(3, 0)]);
        assert_eq!(result.unwrap_err(), GameError::InvalidCoords);
    }

    #[test]
    fn session_snapshot_roundtrips_through_json() {
        let mut session = session(4, 4, &[(3, 3)]);
        session.reveal((0, 0));
        session.toggle_flag((3, 3));

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
