use tracing::debug;

use crate::{
    grid::{Coordinate, Direction, TileContent, TreeState},
    world::GameState,
};

/// Chop in `direction` from the player's tile, or at all four neighbours for
/// `Direction::Omni`. Returns the number of tiles that changed.
///
/// Adults enter the harvest path and award `award` points. Harvested trees
/// advance one step, and the last step clears the tile. Growing trees and
/// non-tree tiles are left alone.
pub fn chop(state: &mut GameState, direction: Direction, award: u32) -> usize {
    let origin = state.player.position;
    let targets: Vec<Coordinate> = match direction {
        Direction::Omni => origin.neighbors().to_vec(),
        d if d.is_cardinal() => vec![origin.offset(d, 1)],
        _ => Vec::new(),
    };

    let mut changed = 0;
    for target in targets {
        let Some(tree) = state.grid.occupant(target).tree_state() else {
            continue;
        };
        let Some(next) = tree.chopped() else {
            continue;
        };
        if tree == TreeState::Adult {
            state.player.score += award;
            debug!(x = target.x, y = target.y, score = state.player.score, "tree felled");
        }
        if next == TreeState::Removed {
            state.grid.clear_occupant(target);
        } else {
            state.grid.set_occupant(target, TileContent::Tree(next));
        }
        changed += 1;
    }
    changed
}
