//! The roamer: picks a plantable tile, walks to it greedily and plants a seed.

use anyhow::Result;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, warn};

use crate::{
    actor::move_actor,
    engine::{System, SystemContext},
    grid::{Coordinate, Direction, Grid, TileContent, TreeState},
    rng::SystemRng,
    world::GameState,
};

/// Single greedy step from `from` toward `to`.
///
/// The axis with the larger distance is tried first, horizontal on ties,
/// then the other axis. Returns `Direction::None` when both are blocked or
/// there is nowhere left to go. No memory, no backtracking: a straight wall
/// between the two points will stall it.
pub fn navigate(grid: &Grid, from: Coordinate, to: Coordinate) -> Direction {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let horizontal = toward(dx, Direction::Right, Direction::Left);
    let vertical = toward(dy, Direction::Down, Direction::Up);
    let (preferred, fallback) = if dx.abs() >= dy.abs() {
        (horizontal, vertical)
    } else {
        (vertical, horizontal)
    };

    [preferred, fallback]
        .into_iter()
        .flatten()
        .find(|direction| !grid.is_blocked(from.offset(*direction, 1)))
        .unwrap_or(Direction::None)
}

fn toward(delta: i32, positive: Direction, negative: Direction) -> Option<Direction> {
    match delta.signum() {
        1 => Some(positive),
        -1 => Some(negative),
        _ => None,
    }
}

/// Uniform pick among every plantable tile other than `standing_on`, `None`
/// when there is none left.
pub fn sample_destination<R: Rng + ?Sized>(
    grid: &Grid,
    standing_on: Coordinate,
    rng: &mut R,
) -> Option<Coordinate> {
    let candidates: Vec<Coordinate> = grid
        .plantable_coordinates()
        .into_iter()
        .filter(|coord| *coord != standing_on)
        .collect();
    candidates.choose(rng).copied()
}

/// Plant a seed if the tile is still plantable.
pub fn plant_seed(grid: &mut Grid, coord: Coordinate) -> bool {
    if !grid.is_plantable(coord) {
        return false;
    }
    grid.set_occupant(coord, TileContent::Tree(TreeState::Seed));
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoamOutcome {
    /// Planted (or tried to plant) at the old destination and picked a new one
    Planted { at: Coordinate, planted: bool },
    Moved(Direction),
    /// Nothing to walk toward, the retry budget ran out, or the fresh
    /// destination is already next to the roamer
    Idle,
}

/// One tick of roamer behaviour.
pub fn roam<R: Rng + ?Sized>(state: &mut GameState, retry_limit: u32, rng: &mut R) -> RoamOutcome {
    let needs_destination = match state.roamer.destination {
        None => true,
        Some(destination) => state.grid.is_blocked(destination),
    };
    if needs_destination {
        state.roamer.destination = sample_destination(&state.grid, state.roamer.position, rng);
    }
    let Some(destination) = state.roamer.destination else {
        return RoamOutcome::Idle;
    };

    if state.roamer.is_adjacent_to_destination() {
        let planted = plant_seed(&mut state.grid, destination);
        if planted {
            state.record_planting();
            debug!(x = destination.x, y = destination.y, "roamer planted a seed");
        }
        state.roamer.destination = sample_destination(&state.grid, state.roamer.position, rng);
        return RoamOutcome::Planted {
            at: destination,
            planted,
        };
    }

    let mut target = destination;
    for _ in 0..retry_limit {
        let position = state.roamer.position;
        // Stepping onto it would leave nothing adjacent to plant from.
        if position.is_adjacent(target) {
            return RoamOutcome::Idle;
        }
        let direction = navigate(&state.grid, position, target);
        if direction != Direction::None {
            move_actor(&state.grid, &mut state.roamer, direction, 1);
            return RoamOutcome::Moved(direction);
        }
        match sample_destination(&state.grid, position, rng) {
            Some(next) => {
                state.roamer.destination = Some(next);
                target = next;
            }
            None => {
                state.roamer.destination = None;
                return RoamOutcome::Idle;
            }
        }
    }

    warn!(
        x = state.roamer.position.x,
        y = state.roamer.position.y,
        retry_limit,
        "roamer found no step, idling this tick"
    );
    RoamOutcome::Idle
}

pub struct RoamerSystem {
    retry_limit: u32,
}

impl RoamerSystem {
    pub fn new(retry_limit: u32) -> Self {
        Self { retry_limit }
    }
}

impl System for RoamerSystem {
    fn name(&self) -> &str {
        "roamer"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        state: &mut GameState,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        roam(state, self.retry_limit, rng);
        Ok(())
    }
}
