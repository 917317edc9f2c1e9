use anyhow::Result;

use crate::grid::Cell;

/// Drawing surface the controller reports to. Implementations redraw the
/// whole board on every `render` call.
pub trait Renderer {
    fn render(&mut self, snake: &[Cell], food: Cell) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    fn show_overlay(&mut self, primary: &str, score_text: &str) -> Result<()>;
    fn hide_overlay(&mut self) -> Result<()>;
    fn set_score_display(&mut self, score: u32) -> Result<()>;
}

/// Score as shown on the scoreboard: four digits, zero padded.
pub fn format_score(score: u32) -> String {
    format!("{:04}", score)
}
