use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::warn;

use crate::config::GameConfig;
use crate::error::Error;
use crate::render::{Canvas, Color};
use crate::{Result, TermInt};

const WINDOW_TITLE: &str = "Snake Game";
const CELL_CHARS: &str = "██";
const EMPTY_CHARS: &str = "  ";
// Each board cell is two characters wide so it looks roughly square.
const CHARS_PER_CELL: TermInt = 2;

/// A canvas the game can also prompt the player on and read keys from.
pub trait Screen: Canvas {
    fn setup(&mut self) -> Result<()>;

    fn restore(&mut self) -> Result<()>;

    fn show_message(&mut self, lines: &[&str]) -> Result<()>;

    fn hide_message(&mut self) -> Result<()>;

    fn read_key_blocking(&mut self) -> Result<KeyEvent>;

    /// Waits up to `timeout` for input, then drains everything already queued.
    fn read_key_events(&mut self, timeout: Duration) -> Result<Vec<KeyEvent>>;
}

/// Board cells as painted for the next frame and as last written out.
pub struct Frame {
    cell_size: i32,
    columns: usize,
    rows: usize,
    shown: Vec<Option<Color>>,
    next: Vec<Option<Color>>,
}

impl Frame {
    pub fn new(columns: usize, rows: usize, cell_size: i32) -> Self {
        Frame {
            cell_size,
            columns,
            rows,
            shown: vec![None; columns * rows],
            next: vec![None; columns * rows],
        }
    }

    pub fn clear(&mut self) {
        for cell in self.next.iter_mut() {
            *cell = None;
        }
    }

    /// Paints the cells a square of board pixels covers; anything off the board is dropped.
    pub fn fill(&mut self, x: i32, y: i32, size: i32, color: Color) {
        let (first_col, first_row) = (x.div_euclid(self.cell_size), y.div_euclid(self.cell_size));
        let span = ((size + self.cell_size - 1) / self.cell_size).max(1);

        for row in first_row..first_row + span {
            for col in first_col..first_col + span {
                if (0..self.columns as i32).contains(&col) && (0..self.rows as i32).contains(&row) {
                    self.next[row as usize * self.columns + col as usize] = Some(color);
                }
            }
        }
    }

    /// Cells that differ from what was last written, as `(column, row, color)`.
    /// They count as written once returned.
    pub fn take_changes(&mut self) -> Vec<(usize, usize, Option<Color>)> {
        let mut changes = vec![];

        for (index, (shown, next)) in self.shown.iter_mut().zip(self.next.iter()).enumerate() {
            if shown != next {
                *shown = *next;
                changes.push((index % self.columns, index / self.columns, *next));
            }
        }

        changes
    }

    /// Every cell as last written, for repainting after an overlay.
    pub fn shown(&self) -> Vec<(usize, usize, Option<Color>)> {
        self.shown
            .iter()
            .enumerate()
            .map(|(index, color)| (index % self.columns, index / self.columns, *color))
            .collect()
    }
}

/// Draws the board inside a border on the terminal's alternate screen.
pub struct TermCanvas {
    stdout: Stdout,
    columns: TermInt,
    rows: TermInt,
    frame: Frame,
    current_msg: Option<Message>,
    active: bool,
}

struct Message {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermCanvas {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let columns = config.columns() as TermInt;
        let rows = config.rows() as TermInt;
        let needed = board_size(columns, rows);
        let actual = terminal::size()?;

        if actual.0 < needed.0 || actual.1 < needed.1 {
            return Err(Error::TerminalTooSmall { needed, actual });
        }

        Ok(TermCanvas {
            stdout: stdout(),
            columns,
            rows,
            frame: Frame::new(columns as usize, rows as usize, config.cell_size),
            current_msg: None,
            active: false,
        })
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = board_size(self.columns, self.rows);
        let end_x = width - 1;
        let end_y = height - 1;

        queue!(self.stdout, style::ResetColor)?;
        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, 0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        self.flush()
    }

    fn print_cell(&mut self, column: usize, row: usize, color: Option<Color>) -> Result<()> {
        let pos = (1 + column as TermInt * CHARS_PER_CELL, 1 + row as TermInt);

        match color {
            Some(color) => queue!(
                self.stdout,
                cursor::MoveTo(pos.0, pos.1),
                style::SetForegroundColor(term_color(color)),
                style::Print(CELL_CHARS),
                style::ResetColor
            )?,
            None => queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(EMPTY_CHARS))?,
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Canvas for TermCanvas {
    fn clear(&mut self) -> Result<()> {
        self.frame.clear();
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, size: i32, color: Color) -> Result<()> {
        self.frame.fill(x, y, size, color);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        for (column, row, color) in self.frame.take_changes() {
            self.print_cell(column, row, color)?;
        }

        self.flush()
    }
}

impl Screen for TermCanvas {
    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle(WINDOW_TITLE))?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let (board_width, board_height) = board_size(self.columns, self.rows);
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = message_origin((board_width, board_height), (msg_width, msg_height));

        let blank = " ".repeat(msg_width as usize);
        queue!(self.stdout, style::ResetColor)?;
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Removes the message box and repaints what it covered.
    fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        queue!(self.stdout, style::ResetColor)?;
        let blank = " ".repeat(msg.width as usize);
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            queue!(self.stdout, cursor::MoveTo(msg.top_left.0, y), style::Print(&blank))?;
        }

        self.draw_borders()?;
        for (column, row, color) in self.frame.shown() {
            self.print_cell(column, row, color)?;
        }

        self.flush()
    }

    fn read_key_blocking(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    fn read_key_events(&mut self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        if !poll(timeout)? {
            return Ok(events);
        }

        loop {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            if !poll(Duration::from_millis(0))? {
                break;
            }
        }

        Ok(events)
    }
}

impl Drop for TermCanvas {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore the terminal: {}", e);
        }
    }
}

/// Terminal columns and rows taken by the board and its border.
fn board_size(columns: TermInt, rows: TermInt) -> (TermInt, TermInt) {
    (columns * CHARS_PER_CELL + 2, rows + 2)
}

/// Top-left corner of a box centered on the board.
fn message_origin(board: (TermInt, TermInt), msg: (TermInt, TermInt)) -> (TermInt, TermInt) {
    let center = (board.0 / 2, board.1 / 2);
    (center.0.saturating_sub(msg.0 / 2), center.1.saturating_sub(msg.1 / 2))
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Green => style::Color::Green,
        Color::Red => style::Color::Red,
    }
}
