use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use super::{Display, Glyph, InputEvent, Rgb};
use crate::grid::Direction;

/// Raw mode and the alternate screen for as long as this value lives.
/// Dropping it restores the terminal, including on error paths.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Double-buffered crossterm surface; `present` only writes cells that
/// changed since the previous frame.
pub struct TerminalDisplay {
    out: Stdout,
    width: u16,
    height: u16,
    back: Vec<Glyph>,
    front: Vec<Option<Glyph>>,
    needs_clear: bool,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Failed to query terminal size")?;
        let mut display = Self {
            out: io::stdout(),
            width: 0,
            height: 0,
            back: Vec::new(),
            front: Vec::new(),
            needs_clear: true,
        };
        display.resize(width, height);
        Ok(display)
    }

    fn resize(&mut self, width: u16, height: u16) {
        let cells = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.back = vec![Glyph::BLANK; cells];
        self.front = vec![None; cells];
        self.needs_clear = true;
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Display for TerminalDisplay {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key)),
            Event::Resize(width, height) => {
                self.resize(width, height);
                Ok(Some(InputEvent::Resize))
            }
            _ => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.back.fill(Glyph::BLANK);
        Ok(())
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: Glyph) -> Result<()> {
        if let Some(index) = self.index(x, y) {
            self.back[index] = glyph;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        if self.needs_clear {
            queue!(self.out, Clear(ClearType::All))?;
            self.needs_clear = false;
        }
        let width = self.width as usize;
        for (index, glyph) in self.back.iter().enumerate() {
            if self.front[index] == Some(*glyph) {
                continue;
            }
            let x = (index % width) as u16;
            let y = (index / width) as u16;
            queue!(
                self.out,
                cursor::MoveTo(x, y),
                SetForegroundColor(color(glyph.style.fg)),
                SetBackgroundColor(color(glyph.style.bg)),
                Print(glyph.ch)
            )?;
            self.front[index] = Some(*glyph);
        }
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }
}

fn color(rgb: Option<Rgb>) -> Color {
    match rgb {
        Some(Rgb(r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

/// Arrows move, space chops all around, WASD chops one side, Esc/q/Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }
    let event = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => InputEvent::Quit,
        KeyCode::Up => InputEvent::Move(Direction::Up),
        KeyCode::Right => InputEvent::Move(Direction::Right),
        KeyCode::Down => InputEvent::Move(Direction::Down),
        KeyCode::Left => InputEvent::Move(Direction::Left),
        KeyCode::Char(' ') => InputEvent::Chop(Direction::Omni),
        KeyCode::Char('w') => InputEvent::Chop(Direction::Up),
        KeyCode::Char('d') => InputEvent::Chop(Direction::Right),
        KeyCode::Char('s') => InputEvent::Chop(Direction::Down),
        KeyCode::Char('a') => InputEvent::Chop(Direction::Left),
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_move_and_letters_chop() {
        assert_eq!(map_key(key(KeyCode::Left)), Some(InputEvent::Move(Direction::Left)));
        assert_eq!(map_key(key(KeyCode::Char('d'))), Some(InputEvent::Chop(Direction::Right)));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(InputEvent::Chop(Direction::Omni)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
        assert_eq!(map_key(key(KeyCode::Enter)), None);
    }
}
