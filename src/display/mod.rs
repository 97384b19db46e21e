//! Display and input surface consumed by the tick loop.
//!
//! The simulation only sees the [`Display`] trait; [`terminal`] provides the
//! crossterm implementation used by the binary.

mod glyphs;
mod render;
pub mod terminal;

use std::time::Duration;

use anyhow::Result;

use crate::grid::Direction;

pub use glyphs::{glyph_for_ground, glyph_for_tile, Glyph, Rgb, Style, PLAYER, ROAMER};
pub use render::{draw_frame, PANEL_WIDTH};

/// Decoded input, one per tick at most
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Chop(Direction),
    Resize,
    Quit,
}

pub trait Display: Send {
    /// Wait up to `timeout` for one input event.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
    fn clear(&mut self) -> Result<()>;
    fn set_cell(&mut self, x: i32, y: i32, glyph: Glyph) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}
