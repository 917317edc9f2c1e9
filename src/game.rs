use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::clock::{GameClock, Timer};
use crate::config::GameConfig;
use crate::food;
use crate::grid::Cell;
use crate::render::Renderer;
use crate::snake::{Direction, MoveResult::*, Snake};

pub const DEFAULT_INSTRUCTION_TEXT: &str = "Press Space or Double-click To Start";
const GAME_OVER_TEXT: &str = "Game Over";
const BOARD_FILLED_TEXT: &str = "You won!";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Started,
    Over,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyStarted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No game running, nothing happened
    Idle,
    Moved,
    Ate,
    Collided,
    /// The snake ate and no free cell was left for new food
    BoardFilled,
}

/// Owns the whole game: snake, food, score and clock. All mutation goes
/// through `start`, `tick`, `change_direction`, `stop` and `reset`.
pub struct SnakeGame<R: Renderer, T: Timer> {
    config: GameConfig,
    state: GameState,
    snake: Snake,
    food: Option<Cell>,
    clock: GameClock<T>,
    renderer: R,
    rng: StdRng,
}

impl<R: Renderer, T: Timer> SnakeGame<R, T> {
    pub fn new(config: GameConfig, renderer: R, timer: T, rng: StdRng) -> Self {
        let clock = GameClock::new(timer, &config);
        let snake = Snake::new(config.start_cell, config.start_direction);
        SnakeGame { config, state: GameState::NotStarted, snake, food: None, clock, renderer, rng }
    }

    pub fn show_intro(&mut self) -> Result<()> {
        self.renderer.set_score_display(self.score())?;
        self.renderer.show_overlay(DEFAULT_INSTRUCTION_TEXT, "")
    }

    pub fn start(&mut self) -> Result<StartOutcome> {
        match self.state {
            GameState::Started => {
                warn!("game is already started");
                return Ok(StartOutcome::AlreadyStarted);
            }
            GameState::Over => self.reset()?,
            GameState::NotStarted => {}
        }

        let food = food::spawn(self.snake.body(), &mut self.rng)
            .ok_or_else(|| anyhow!("no free cell left for food"))?;
        self.food = Some(food);
        self.state = GameState::Started;
        self.clock.start();

        self.renderer.hide_overlay()?;
        self.renderer.render(self.snake.body(), food)?;
        info!(head = ?self.snake.head(), ?food, interval_ms = self.clock.interval_ms(), "game started");
        Ok(StartOutcome::Started)
    }

    /// One simulation step. Ticks arriving outside a running game are ignored.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let food = match (self.state, self.food) {
            (GameState::Started, Some(food)) => food,
            _ => return Ok(TickOutcome::Idle),
        };

        match self.snake.move_step(food) {
            Crashed { new_head } => {
                debug!(?new_head, "snake ran into itself");
                self.game_over(false)?;
                Ok(TickOutcome::Collided)
            }
            Moved { new_head, ate } => {
                let mut food = food;
                if ate {
                    self.renderer.set_score_display(self.score())?;
                    // The body already holds the new head, so it is excluded too
                    match food::spawn(self.snake.body(), &mut self.rng) {
                        Some(next) => food = next,
                        None => {
                            self.game_over(true)?;
                            return Ok(TickOutcome::BoardFilled);
                        }
                    }
                    self.food = Some(food);
                    debug!(?new_head, len = self.snake.len(), score = self.score(), next_food = ?food, "food eaten");
                }

                self.renderer.render(self.snake.body(), food)?;

                self.clock.on_tick();
                if ate {
                    self.clock.food_eaten();
                    Ok(TickOutcome::Ate)
                } else {
                    Ok(TickOutcome::Moved)
                }
            }
        }
    }

    /// Reversals are dropped silently. Returns whether the direction changed.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        // Checked against the last step taken as well as the pending direction
        let changed = self.snake.set_direction(direction);
        if !changed {
            debug!(?direction, current = ?self.snake.get_direction(), "ignoring reversal");
        }
        changed
    }

    /// Ends a running game as if the snake had crashed.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == GameState::Started {
            self.game_over(false)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.renderer.clear()?;
        self.state = GameState::NotStarted;
        self.clock.reset();
        self.snake = Snake::new(self.config.start_cell, self.config.start_direction);
        self.food = None;
        self.renderer.set_score_display(self.score())?;
        self.renderer.show_overlay(DEFAULT_INSTRUCTION_TEXT, "")?;
        info!("game reset");
        Ok(())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Always one less than the snake's length.
    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    pub fn clock(&self) -> &GameClock<T> {
        &self.clock
    }

    pub fn timer_mut(&mut self) -> &mut T {
        self.clock.timer_mut()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, won: bool) -> Result<()> {
        self.state = GameState::Over;
        self.clock.stop();
        let score = self.score();
        self.renderer.set_score_display(score)?;
        self.renderer.clear()?;

        let primary = if won { BOARD_FILLED_TEXT } else { GAME_OVER_TEXT };
        let score_text = format!("Your score - {}. {}", score, DEFAULT_INSTRUCTION_TEXT);
        self.renderer.show_overlay(primary, &score_text)?;
        info!(score, won, "game over");
        Ok(())
    }
}

#[cfg(test)]
impl<R: Renderer, T: Timer> SnakeGame<R, T> {
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn set_food(&mut self, food: Cell) {
        self.food = Some(food);
    }
}
