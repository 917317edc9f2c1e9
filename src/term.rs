use std::cmp::max;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::warn;

use crate::grid::{all_cells, Cell, GRID_SIZE};
use crate::render::{format_score, Renderer};

type Coords = (u16, u16);

// Board cell (x, y) sits at terminal column x, row y; the border takes the
// rows and columns just outside the play area.
const BORDER_END: u16 = GRID_SIZE as u16 + 1;
const SCORE_ROW: u16 = BORDER_END + 1;
const REQUIRED_SIZE: Coords = (BORDER_END + 1, SCORE_ROW + 1);

const SNAKE_BODY_CHAR: char = '█';
const SNAKE_HEAD_CHAR: char = '@';
const FOOD_CHAR: char = 'O';

/// Renders the game into the terminal's alternate screen.
pub struct TermRenderer {
    width: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermRenderer {
    pub fn new() -> Result<Self> {
        let (term_width, term_height) = terminal::size()?;
        if term_width < REQUIRED_SIZE.0 || term_height < REQUIRED_SIZE.1 {
            warn!(term_width, term_height, required = ?REQUIRED_SIZE, "terminal is smaller than the board");
        }

        // The buffer always covers the board, even on a small terminal
        let width = max(term_width, REQUIRED_SIZE.0);
        let height = max(term_height, REQUIRED_SIZE.1);
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermRenderer { width, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, DisableMouseCapture, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn draw_borders(&mut self) -> Result<()> {
        for x in 0..=BORDER_END {
            let ch = if x == 0 || x == BORDER_END {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, BORDER_END), ch)?;
        }

        for y in 1..BORDER_END {
            self.print_at((0, y), '|')?;
            self.print_at((BORDER_END, y), '|')?;
        }

        self.flush()
    }

    fn clear_board(&mut self) -> Result<()> {
        for cell in all_cells() {
            self.print_at(to_coords(cell), ' ')?;
        }
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Overlay text stays out of the buffer so hiding it can restore the board
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Renderer for TermRenderer {
    fn render(&mut self, snake: &[Cell], food: Cell) -> Result<()> {
        self.clear_board()?;
        self.print_at(to_coords(food), FOOD_CHAR)?;

        for (i, cell) in snake.iter().enumerate() {
            let ch = if i == 0 {SNAKE_HEAD_CHAR} else {SNAKE_BODY_CHAR};
            self.print_at(to_coords(*cell), ch)?;
        }

        self.flush()
    }

    fn clear(&mut self) -> Result<()> {
        self.clear_board()?;
        self.flush()
    }

    fn show_overlay(&mut self, primary: &str, score_text: &str) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_overlay()?;
        }

        // One sentence per line keeps the box inside the board
        let mut lines = vec![primary];
        lines.extend(score_text.split(". ").filter(|line| !line.is_empty()));

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = (BORDER_END / 2, BORDER_END / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    fn hide_overlay(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                let ch = self.screen.get(self.width as usize * y as usize + x as usize).copied().unwrap_or(' ');
                self.print_at_no_save((x, y), ch)?;
            }
        }

        self.flush()
    }

    fn set_score_display(&mut self, score: u32) -> Result<()> {
        let text = format!("Score: {}", format_score(score));
        for (x, ch) in text.chars().enumerate() {
            self.print_at((1 + x as u16, SCORE_ROW), ch)?;
        }
        self.flush()
    }
}

/// Waits up to `timeout` for input, then drains whatever else is queued.
pub fn read_events(timeout: Duration) -> Result<Vec<Event>> {
    let mut events = vec![];

    if poll(timeout)? {
        events.push(read()?);
        while poll(Duration::from_millis(0))? {
            events.push(read()?);
        }
    }

    Ok(events)
}

fn to_coords(cell: Cell) -> Coords {
    (cell.x as u16, cell.y as u16)
}
