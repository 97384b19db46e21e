use anyhow::Result;

use super::{
    glyphs::{glyph_for_ground, glyph_for_tile, Glyph, PLAYER, ROAMER},
    Display,
};
use crate::{grid::TreeState, world::GameState};

pub const PANEL_WIDTH: i32 = 15;
const PANEL_GAP: i32 = 2;

/// Paint one whole frame: tiles, ground cover under empty tiles, both actors
/// and the status panel to the right of the map.
pub fn draw_frame(display: &mut dyn Display, state: &GameState) -> Result<()> {
    display.clear()?;

    for coord in state.grid.coordinates() {
        let glyph = glyph_for_tile(state.grid.occupant(coord))
            .or_else(|| state.grid.ground(coord).map(glyph_for_ground));
        if let Some(glyph) = glyph {
            display.set_cell(coord.x, coord.y, glyph)?;
        }
    }
    display.set_cell(state.roamer.position.x, state.roamer.position.y, ROAMER)?;
    display.set_cell(state.player.position.x, state.player.position.y, PLAYER)?;

    let left = state.grid.width() + PANEL_GAP;
    let lines = [
        format!("Score  {}", state.player.score),
        format!("Tick   {}", state.tick()),
        format!("Adults {}", state.grid.count_trees(TreeState::Adult)),
        format!("Seeds  {}", state.grid.count_trees(TreeState::Seed)),
    ];
    for (row, line) in lines.iter().enumerate() {
        draw_text(display, left, row as i32, line)?;
    }

    display.present()
}

fn draw_text(display: &mut dyn Display, x: i32, y: i32, text: &str) -> Result<()> {
    for (offset, ch) in text.chars().take(PANEL_WIDTH as usize).enumerate() {
        display.set_cell(x + offset as i32, y, Glyph::plain(ch))?;
    }
    Ok(())
}
