use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::snake::Direction;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Turn(Direction),
    Quit,
}

/// Turns raw terminal events into game commands.
#[derive(Debug, Default)]
pub struct InputAdapter {
    last_click: Option<Instant>,
}

impl InputAdapter {
    pub fn new() -> Self {
        InputAdapter { last_click: None }
    }

    pub fn translate(&mut self, event: &Event, now: Instant) -> Option<Command> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), .. }) => {
                self.register_click(now)
            }
            _ => None,
        }
    }

    fn register_click(&mut self, now: Instant) -> Option<Command> {
        match self.last_click.take() {
            Some(prev) if now.saturating_duration_since(prev) <= DOUBLE_CLICK_WINDOW => Some(Command::Start),
            _ => {
                self.last_click = Some(now);
                None
            }
        }
    }
}

fn translate_key(key: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char(' ') => Some(Command::Start),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
