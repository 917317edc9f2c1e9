pub const GRID_MIN: i32 = 1;
pub const GRID_SIZE: i32 = 50;
pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// One position on the board, 1-indexed on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Moves by the given delta, re-entering from the opposite edge when
    /// crossing a border.
    pub fn offset_wrapped(self, (dx, dy): (i32, i32)) -> Self {
        Cell { x: wrap(self.x + dx), y: wrap(self.y + dy) }
    }
}

/// Normalizes a coordinate that stepped off the board. Never clamps.
pub fn wrap(coord: i32) -> i32 {
    if coord > GRID_SIZE {
        GRID_MIN
    } else if coord < GRID_MIN {
        GRID_SIZE
    } else {
        coord
    }
}

/// Every cell of the board, row by row.
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (GRID_MIN..=GRID_SIZE).flat_map(|y| (GRID_MIN..=GRID_SIZE).map(move |x| Cell::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_crosses_edges() {
        assert_eq!(wrap(51), 1);
        assert_eq!(wrap(0), 50);
        assert_eq!(wrap(1), 1);
        assert_eq!(wrap(50), 50);
        assert_eq!(wrap(27), 27);
    }

    #[test]
    fn wrap_always_lands_on_the_board() {
        for i in -200..=200 {
            let w = wrap(i);
            assert!((GRID_MIN..=GRID_SIZE).contains(&w), "wrap({}) = {}", i, w);
        }
    }

    #[test]
    fn offset_wraps_each_axis_independently() {
        assert_eq!(Cell::new(50, 10).offset_wrapped((1, 0)), Cell::new(1, 10));
        assert_eq!(Cell::new(10, 1).offset_wrapped((0, -1)), Cell::new(10, 50));
        assert_eq!(Cell::new(1, 50).offset_wrapped((-1, 0)), Cell::new(50, 50));
    }

    #[test]
    fn all_cells_covers_the_board() {
        assert_eq!(all_cells().count(), CELL_COUNT);
        assert_eq!(all_cells().next(), Some(Cell::new(1, 1)));
        assert_eq!(all_cells().last(), Some(Cell::new(50, 50)));
    }
}
