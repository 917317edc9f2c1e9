use crate::grid::Cell;
use crate::snake::Direction;

/// Defaults the controller restores on every reset.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Cell of the single segment a fresh snake starts with
    pub start_cell: Cell,
    pub start_direction: Direction,
    /// Delay between ticks when a game starts
    pub initial_interval_ms: u64,
    /// Lowest delay the speed ramp may reach
    pub min_interval_ms: u64,
    /// Ticks before a speed-up are `speedup_budget_ms / interval`
    pub speedup_budget_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            start_cell: Cell::new(24, 9),
            start_direction: Direction::Right,
            initial_interval_ms: 190,
            min_interval_ms: 1,
            speedup_budget_ms: 5000,
        }
    }
}
