//! Tree lifecycle: stochastic growth of living trees and ambient seeding

use anyhow::Result;
use rand::Rng;
use tracing::trace;

use crate::{
    config::GrowthConfig,
    engine::{System, SystemContext},
    grid::{Coordinate, Grid, TileContent, TreeState},
    rng::SystemRng,
    world::GameState,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRates {
    pub seed_to_sapling: f64,
    pub sapling_to_adult: f64,
    pub seed_creation_chance: f64,
    pub seed_creation_max: u32,
}

impl Default for GrowthRates {
    fn default() -> Self {
        Self::from(&GrowthConfig::default())
    }
}

impl From<&GrowthConfig> for GrowthRates {
    fn from(config: &GrowthConfig) -> Self {
        Self {
            seed_to_sapling: config.seed_to_sapling,
            sapling_to_adult: config.sapling_to_adult,
            seed_creation_chance: config.seed_creation_chance,
            seed_creation_max: config.seed_creation_max,
        }
    }
}

impl GrowthRates {
    fn chance(&self, state: TreeState) -> Option<f64> {
        match state {
            TreeState::Seed => Some(self.seed_to_sapling),
            TreeState::Sapling => Some(self.sapling_to_adult),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GrowthReport {
    pub grown: usize,
    pub cleared: usize,
    pub seeded: usize,
}

/// One independent Bernoulli trial per tree. Adults and harvested trees hold
/// their state; a `Removed` tree is cleared on sight.
pub fn grow_trees<R: Rng + ?Sized>(grid: &mut Grid, rates: &GrowthRates, rng: &mut R) -> GrowthReport {
    let mut report = GrowthReport::default();
    for coord in grid.tree_coordinates() {
        let Some(state) = grid.occupant(coord).tree_state() else {
            continue;
        };
        if state == TreeState::Removed {
            grid.clear_occupant(coord);
            report.cleared += 1;
            continue;
        }
        let (Some(chance), Some(next)) = (rates.chance(state), state.grown()) else {
            continue;
        };
        if rng.gen_bool(chance) {
            grid.set_occupant(coord, TileContent::Tree(next));
            report.grown += 1;
        }
    }
    report
}

/// Up to `seed_creation_max` independent trials; each success drops a seed on
/// a uniformly random in-bounds tile if that tile is plantable.
pub fn spread_seeds<R: Rng + ?Sized>(grid: &mut Grid, rates: &GrowthRates, rng: &mut R) -> usize {
    if grid.width() <= 0 || grid.height() <= 0 {
        return 0;
    }
    let mut seeded = 0;
    for _ in 0..rates.seed_creation_max {
        if !rng.gen_bool(rates.seed_creation_chance) {
            continue;
        }
        let coord = Coordinate::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        if grid.is_plantable(coord) {
            grid.set_occupant(coord, TileContent::Tree(TreeState::Seed));
            seeded += 1;
        }
    }
    seeded
}

pub struct TreeLifecycleSystem {
    rates: GrowthRates,
}

impl TreeLifecycleSystem {
    pub fn new(rates: GrowthRates) -> Self {
        Self { rates }
    }

    pub fn from_config(config: &GrowthConfig) -> Self {
        Self::new(GrowthRates::from(config))
    }
}

impl Default for TreeLifecycleSystem {
    fn default() -> Self {
        Self::new(GrowthRates::default())
    }
}

impl System for TreeLifecycleSystem {
    fn name(&self) -> &str {
        "growth"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        state: &mut GameState,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let mut report = grow_trees(&mut state.grid, &self.rates, rng);
        report.seeded = spread_seeds(&mut state.grid, &self.rates, rng);
        if report != GrowthReport::default() {
            trace!(
                tick = ctx.tick,
                grown = report.grown,
                cleared = report.cleared,
                seeded = report.seeded,
                "trees updated"
            );
        }
        Ok(())
    }
}
