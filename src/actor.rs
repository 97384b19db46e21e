use serde::Serialize;

use crate::grid::{Coordinate, Direction, Grid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub position: Coordinate,
    /// Navigation target, only used by the roamer
    pub destination: Option<Coordinate>,
    /// Carried on every actor but not read by any behaviour yet.
    pub vision_radius: u32,
    pub score: u32,
}

impl Actor {
    pub fn new(position: Coordinate, vision_radius: u32) -> Self {
        Self {
            position,
            destination: None,
            vision_radius,
            score: 0,
        }
    }

    pub fn is_adjacent_to_destination(&self) -> bool {
        self.destination
            .is_some_and(|destination| self.position.is_adjacent(destination))
    }
}

/// Move `actor` `distance` tiles in a cardinal direction. Returns whether the
/// actor moved; a blocked target or a non-cardinal direction is a no-op.
pub fn move_actor(grid: &Grid, actor: &mut Actor, direction: Direction, distance: i32) -> bool {
    if !direction.is_cardinal() {
        return false;
    }
    let target = actor.position.offset(direction, distance);
    if grid.is_blocked(target) {
        return false;
    }
    actor.position = target;
    true
}
