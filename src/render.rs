use crate::state::GameState;
use crate::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
}

pub const SNAKE_COLOR: Color = Color::Green;
pub const FOOD_COLOR: Color = Color::Red;

/// Anything the board can be painted on.
pub trait Canvas {
    fn clear(&mut self) -> Result<()>;

    /// Fills the square with its top-left corner at `(x, y)`, in board pixels.
    fn fill_rect(&mut self, x: i32, y: i32, size: i32, color: Color) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}

/// Paints one frame. A game that is over leaves the board blank.
pub fn draw<C: Canvas>(state: &GameState, canvas: &mut C) -> Result<()> {
    canvas.clear()?;

    if state.is_running() {
        let size = state.cell_size();
        for &(x, y) in state.snake().body() {
            canvas.fill_rect(x, y, size, SNAKE_COLOR)?;
        }

        let (x, y) = state.food();
        canvas.fill_rect(x, y, size, FOOD_COLOR)?;
    }

    canvas.present()
}
