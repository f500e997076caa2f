use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result, bail};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{info, warn};

use crate::geometry::{CHROME_ROWS, Dimensions, Region, Vector2};

const EXIT_PROMPT: &str = "F1 to Exit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    F1,
    /// Ctrl+C, which raw mode delivers as a key instead of a signal.
    Interrupt,
    Char(char),
}

/// Fixed-size window the game draws into. Coordinates are window-relative;
/// cells outside the window are dropped.
pub trait Surface {
    fn dimensions(&self) -> Dimensions;

    fn draw_cell(&mut self, pos: Vector2, glyph: char) -> Result<()>;

    /// Outer box plus the separator under the title row.
    fn draw_border(&mut self) -> Result<()>;

    fn draw_title(&mut self, text: &str) -> Result<()>;

    /// Pushes everything drawn so far to the screen.
    fn present(&mut self) -> Result<()>;

    fn draw_text(&mut self, pos: Vector2, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.draw_cell(Vector2::new(pos.y, pos.x + i as i32), ch)?;
        }
        Ok(())
    }

    fn clear_region(&mut self, region: Region) -> Result<()> {
        for cell in region.cells() {
            self.draw_cell(cell, ' ')?;
        }
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }

    fn draw_cell(&mut self, pos: Vector2, glyph: char) -> Result<()> {
        (**self).draw_cell(pos, glyph)
    }

    fn draw_border(&mut self) -> Result<()> {
        (**self).draw_border()
    }

    fn draw_title(&mut self, text: &str) -> Result<()> {
        (**self).draw_title(text)
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }

    fn draw_text(&mut self, pos: Vector2, text: &str) -> Result<()> {
        (**self).draw_text(pos, text)
    }

    fn clear_region(&mut self, region: Region) -> Result<()> {
        (**self).clear_region(region)
    }
}

pub trait Input {
    /// Waits at most `timeout` for a key. Unmapped keys and other terminal
    /// events come back as `None`.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Key>>;
}

/// Owns the terminal for the lifetime of the game: raw mode, alternate
/// screen and a window centred on the screen. Restored on drop.
pub struct TermManager {
    stdout: Stdout,
    origin: (u16, u16),
    dims: Dimensions,
    restored: bool,
}

impl TermManager {
    pub fn open(height: u16, width: u16) -> Result<Self> {
        let (cols, rows) = terminal::size().context("Error reading terminal size")?;
        if cols < width || rows < height {
            bail!("terminal is {}x{}, the game needs at least {}x{}", cols, rows, width, height);
        }

        let origin = ((cols - width) / 2, (rows - height) / 2);
        let mut term = TermManager {
            stdout: stdout(),
            origin,
            dims: Dimensions::new(height as i32, width as i32),
            restored: false,
        };

        // From here on a failure still goes through Drop and restores the terminal.
        term.setup()?;
        term.draw_exit_prompt(rows)?;

        info!(
            "Terminal ready: {}x{} window at column {}, row {}",
            width, height, origin.0, origin.1
        );
        Ok(term)
    }

    /// Hands the terminal back to the shell. Only the first call has any effect.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        terminal::disable_raw_mode().context("Error leaving raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        info!("Terminal restored");
        Ok(())
    }

    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )
        .context("Error preparing screen")?;
        Ok(())
    }

    fn draw_exit_prompt(&mut self, rows: u16) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, rows.saturating_sub(2)),
            style::SetForegroundColor(Color::Red),
            style::Print(EXIT_PROMPT),
            style::ResetColor
        )
        .context("Error drawing exit prompt")?;
        self.present()
    }

    fn screen_coords(&self, pos: Vector2) -> Option<(u16, u16)> {
        if !self.dims.contains(pos) {
            return None;
        }
        Some((self.origin.0 + pos.x as u16, self.origin.1 + pos.y as u16))
    }
}

impl Surface for TermManager {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn draw_cell(&mut self, pos: Vector2, glyph: char) -> Result<()> {
        if let Some((x, y)) = self.screen_coords(pos) {
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(glyph))
                .context("Error drawing cell")?;
        }
        Ok(())
    }

    fn draw_border(&mut self) -> Result<()> {
        let Dimensions { height, width } = self.dims;
        let separator = CHROME_ROWS - 1;

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.draw_cell(Vector2::new(0, x), ch)?;
            self.draw_cell(Vector2::new(separator, x), ch)?;
            self.draw_cell(Vector2::new(height - 1, x), ch)?;
        }

        for y in 1..height - 1 {
            if y == separator {
                continue;
            }
            self.draw_cell(Vector2::new(y, 0), '|')?;
            self.draw_cell(Vector2::new(y, width - 1), '|')?;
        }

        Ok(())
    }

    fn draw_title(&mut self, text: &str) -> Result<()> {
        let col = (self.dims.width - text.chars().count() as i32) / 2;
        if let Some((x, y)) = self.screen_coords(Vector2::new(1, col.max(1))) {
            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                style::SetForegroundColor(Color::Red),
                style::Print(text),
                style::ResetColor
            )
            .context("Error drawing title")?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("Failed to restore terminal: {:#}", err);
        }
    }
}

/// Non-blocking keyboard reader on top of crossterm's event queue.
pub struct KeyReader;

impl Input for KeyReader {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Key>> {
        if !poll(timeout).context("Error polling for input")? {
            return Ok(None);
        }

        match read().context("Error reading input")? {
            Event::Key(ev) => Ok(translate(ev)),
            _ => Ok(None),
        }
    }
}

fn translate(ev: KeyEvent) -> Option<Key> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => {
            Some(Key::Interrupt)
        }
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::F(1) => Some(Key::F1),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn translates_game_keys() {
        assert_eq!(translate(key(KeyCode::Up)), Some(Key::Up));
        assert_eq!(translate(key(KeyCode::Down)), Some(Key::Down));
        assert_eq!(translate(key(KeyCode::Left)), Some(Key::Left));
        assert_eq!(translate(key(KeyCode::Right)), Some(Key::Right));
        assert_eq!(translate(key(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(translate(key(KeyCode::F(1))), Some(Key::F1));
        assert_eq!(translate(key(KeyCode::Char('p'))), Some(Key::Char('p')));
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        let ev = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(translate(ev), Some(Key::Interrupt));
    }

    #[test]
    fn other_keys_are_dropped() {
        assert_eq!(translate(key(KeyCode::F(2))), None);
        assert_eq!(translate(key(KeyCode::Esc)), None);
        assert_eq!(translate(key(KeyCode::Tab)), None);
    }
}
