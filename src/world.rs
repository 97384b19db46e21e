use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

use crate::{
    actor::Actor,
    config::PopulationConfig,
    grid::{Grid, GroundCover, TileContent, TreeState},
    map::LoadedMap,
};

/// The single live game. Owned by the orchestrator and only ever touched
/// from the simulation thread.
pub struct GameState {
    pub player: Actor,
    pub roamer: Actor,
    pub grid: Grid,
    pub exit: bool,
    tick: u64,
    plantings: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeCensus {
    pub seeds: usize,
    pub saplings: usize,
    pub adults: usize,
    pub trunks: usize,
    pub stumps: usize,
    pub stumplings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub roamer_plantings: u64,
    pub trees: TreeCensus,
}

impl GameState {
    pub fn new(map: LoadedMap, vision_radius: u32) -> Self {
        Self {
            player: Actor::new(map.player_start, vision_radius),
            roamer: Actor::new(map.roamer_start, vision_radius),
            grid: map.grid,
            exit: false,
            tick: 0,
            plantings: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
    }

    pub fn roamer_plantings(&self) -> u64 {
        self.plantings
    }

    pub(crate) fn record_planting(&mut self) {
        self.plantings += 1;
    }

    pub fn census(&self) -> TreeCensus {
        TreeCensus {
            seeds: self.grid.count_trees(TreeState::Seed),
            saplings: self.grid.count_trees(TreeState::Sapling),
            adults: self.grid.count_trees(TreeState::Adult),
            trunks: self.grid.count_trees(TreeState::Trunk),
            stumps: self.grid.count_trees(TreeState::Stump),
            stumplings: self.grid.count_trees(TreeState::Stumpling),
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.tick,
            score: self.player.score,
            roamer_plantings: self.plantings,
            trees: self.census(),
        }
    }

    /// Scatter trees in random living states and grass over the empty
    /// ground. Run once after the map is loaded.
    pub fn populate<R: Rng + ?Sized>(&mut self, config: &PopulationConfig, rng: &mut R) -> usize {
        const LIVING: [TreeState; 3] = [TreeState::Seed, TreeState::Sapling, TreeState::Adult];

        let mut planted = 0;
        for coord in self.grid.plantable_coordinates() {
            if rng.gen_bool(config.initial_tree_density) {
                if let Some(state) = LIVING.choose(rng) {
                    self.grid.set_occupant(coord, TileContent::Tree(*state));
                    planted += 1;
                }
                continue;
            }
            let roll: f64 = rng.gen();
            if roll < config.grass_heavy_density {
                self.grid.set_ground(coord, GroundCover::GrassHeavy);
            } else if roll < config.grass_heavy_density + config.grass_light_density {
                self.grid.set_ground(coord, GroundCover::GrassLight);
            }
        }
        planted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::Coordinate, map::parse_map};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn populate_only_fills_plantable_tiles() {
        let map = parse_map("#####\n#...#\n#.w.#\n#####");
        let mut state = GameState::new(map, 100);
        let config = PopulationConfig {
            initial_tree_density: 1.0,
            grass_light_density: 0.0,
            grass_heavy_density: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let planted = state.populate(&config, &mut rng);

        assert_eq!(planted, 5);
        assert_eq!(state.grid.occupant(Coordinate::new(0, 0)), TileContent::Wall);
        assert_eq!(state.grid.occupant(Coordinate::new(2, 2)), TileContent::WaterLight);
        assert!(state.grid.plantable_coordinates().is_empty());
    }

    #[test]
    fn grass_never_changes_plantability() {
        let map = parse_map("....\n....");
        let mut state = GameState::new(map, 100);
        let config = PopulationConfig {
            initial_tree_density: 0.0,
            grass_light_density: 0.5,
            grass_heavy_density: 0.5,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        state.populate(&config, &mut rng);

        for coord in state.grid.coordinates().collect::<Vec<_>>() {
            assert!(state.grid.ground(coord).is_some());
            assert!(state.grid.is_plantable(coord));
        }
    }
}
