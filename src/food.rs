use crate::grid::{all_cells, Cell, CELL_COUNT, GRID_MIN, GRID_SIZE};

use rand::seq::SliceRandom;
use rand::Rng;

// Past this many rejected samples the board is nearly full; enumerate instead.
const MAX_SAMPLES: usize = 4 * CELL_COUNT;

/// Picks a uniformly random cell not present in `occupied`.
/// Returns `None` only when every cell of the board is occupied.
pub fn spawn<R: Rng + ?Sized>(occupied: &[Cell], rng: &mut R) -> Option<Cell> {
    for _ in 0..MAX_SAMPLES {
        let candidate = Cell::new(rng.gen_range(GRID_MIN..=GRID_SIZE), rng.gen_range(GRID_MIN..=GRID_SIZE));
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Cell> = all_cells().filter(|cell| !occupied.contains(cell)).collect();
    free.choose(rng).copied()
}
