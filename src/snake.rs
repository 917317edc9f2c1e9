use crate::grid::Cell;
use Direction::*;
use MoveResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, ate: bool },
    Crashed { new_head: Cell },
}

#[derive(Debug, Clone)]
pub struct Snake {
    // Head first
    body: Vec<Cell>,
    direction: Direction,
    // Direction of the last step actually taken
    moved: Direction,
}

impl Snake {
    pub fn new(head: Cell, direction: Direction) -> Self {
        Snake { body: vec![head], direction, moved: direction }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction, moved: direction }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn score(&self) -> u32 {
        (self.body.len() - 1) as u32
    }

    /// Advances one cell. Grows when the new head lands on `food`, otherwise
    /// the tail is dropped. The collision scan runs on the assembled body, so
    /// a cell vacated by the tail this step is free.
    pub fn move_step(&mut self, food: Cell) -> MoveResult {
        let new_head = self.head().offset_wrapped(self.direction.delta());
        self.moved = self.direction;
        let ate = new_head == food;

        self.body.insert(0, new_head);
        if !ate {
            self.body.pop();
        }

        if self.body[1..].contains(&new_head) {
            Crashed { new_head }
        } else {
            Moved { new_head, ate }
        }
    }

    /// Returns whether the direction changed. Reversing either the pending
    /// direction or the last step taken is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) || new_direction.is_opposite(self.moved) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn moves_without_growing() {
        let mut snake = Snake::new(Cell::new(24, 9), Right);
        let res = snake.move_step(Cell::new(1, 1));

        assert_eq!(res, Moved { new_head: Cell::new(25, 9), ate: false });
        assert_eq!(snake.body(), &[Cell::new(25, 9)]);
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn grows_by_one_on_food() {
        let mut snake = Snake::from_body(cells(&[(5, 5), (4, 5)]), Right);
        let res = snake.move_step(Cell::new(6, 5));

        assert_eq!(res, Moved { new_head: Cell::new(6, 5), ate: true });
        assert_eq!(snake.body(), cells(&[(6, 5), (5, 5), (4, 5)]).as_slice());
        assert_eq!(snake.score(), 2);
        assert_eq!(snake.len() as u32, snake.score() + 1);
    }

    #[test]
    fn wraps_through_the_edge() {
        let mut snake = Snake::new(Cell::new(10, 1), Up);
        snake.move_step(Cell::new(1, 1));
        assert_eq!(snake.head(), Cell::new(10, 50));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut snake = Snake::new(Cell::new(5, 5), Right);

        assert!(!snake.set_direction(Left));
        assert_eq!(snake.get_direction(), Right);
        assert!(snake.set_direction(Up));
        assert_eq!(snake.get_direction(), Up);
        assert!(snake.set_direction(Right));
        assert!(snake.set_direction(Down));
        assert_eq!(snake.get_direction(), Down);
    }

    #[test]
    fn two_turns_between_steps_cannot_reverse() {
        let mut snake = Snake::from_body(cells(&[(5, 5), (4, 5)]), Right);

        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.get_direction(), Up);

        snake.move_step(Cell::new(40, 40));
        assert!(snake.set_direction(Left));
    }

    #[test]
    fn crashes_into_its_own_body() {
        // Looped body: moving up from (5,7) lands on (5,6)
        let mut snake = Snake::from_body(cells(&[(5, 7), (6, 7), (6, 6), (5, 6), (4, 6)]), Up);
        let res = snake.move_step(Cell::new(40, 40));

        assert_eq!(res, Crashed { new_head: Cell::new(5, 6) });
    }

    #[test]
    fn vacated_tail_cell_is_free() {
        // A 2x2 loop: the head chases the tail into the cell it just left
        let mut snake = Snake::from_body(cells(&[(5, 5), (6, 5), (6, 6), (5, 6)]), Down);
        let res = snake.move_step(Cell::new(40, 40));

        assert_eq!(res, Moved { new_head: Cell::new(5, 6), ate: false });
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn growing_into_the_tail_cell_crashes() {
        let mut snake = Snake::from_body(cells(&[(5, 5), (6, 5), (6, 6), (5, 6)]), Down);
        // Food cannot sit under the snake in play; force it to check the ordering
        let res = snake.move_step(Cell::new(5, 6));

        assert_eq!(res, Crashed { new_head: Cell::new(5, 6) });
        assert_eq!(snake.len(), 5);
    }
}
