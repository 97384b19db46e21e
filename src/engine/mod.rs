use anyhow::Result;
use tracing::trace;

use crate::{
    actor::move_actor,
    config::GameConfig,
    growth::TreeLifecycleSystem,
    grid::Direction,
    harvest::chop,
    rng::{RngManager, SystemRng},
    roamer::RoamerSystem,
    world::GameState,
};

pub struct EngineSettings {
    pub seed: u64,
    pub chop_award: u32,
}

/// Player intent for one tick, already decoded from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Move(Direction),
    Chop(Direction),
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    /// Roamer then tree lifecycle, the order every tick runs them in.
    pub fn standard(config: &GameConfig, seed: u64) -> Self {
        let settings = EngineSettings {
            seed,
            chop_award: config.harvest.chop_award,
        };
        Self::new(settings)
            .with_system(RoamerSystem::new(config.roamer.retry_limit))
            .with_system(TreeLifecycleSystem::from_config(&config.growth))
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: u64,
    pub player_moved: bool,
    pub tiles_chopped: usize,
}

impl Engine {
    /// Advance the game exactly one step: the player's command first, then
    /// every registered system unconditionally.
    pub fn step(&mut self, state: &mut GameState, command: Option<PlayerCommand>) -> Result<TickSummary> {
        let mut summary = TickSummary {
            tick: state.tick(),
            player_moved: false,
            tiles_chopped: 0,
        };
        match command {
            Some(PlayerCommand::Move(direction)) => {
                summary.player_moved = move_actor(&state.grid, &mut state.player, direction, 1);
            }
            Some(PlayerCommand::Chop(direction)) => {
                summary.tiles_chopped = chop(state, direction, self.settings.chop_award);
            }
            None => {}
        }

        for system in &mut self.systems {
            let mut rng_stream = self.rng.stream(system.name());
            let ctx = SystemContext {
                tick: summary.tick,
            };
            system.run(&ctx, state, &mut rng_stream)?;
        }
        state.advance_time();
        trace!(tick = summary.tick, "step complete");
        Ok(summary)
    }

    /// Run `ticks` steps with no player input.
    pub fn run(&mut self, state: &mut GameState, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.step(state, None)?;
        }
        Ok(())
    }

    pub fn rng(&mut self) -> &mut RngManager {
        &mut self.rng
    }
}

pub struct SystemContext {
    pub tick: u64,
}

pub trait System: Send {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        state: &mut GameState,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{Coordinate, TileContent, TreeState},
        map::parse_map,
    };

    struct CountingSystem {
        calls: std::sync::Arc<std::sync::atomic::AtomicU64>,
    }

    impl System for CountingSystem {
        fn name(&self) -> &str {
            "counting"
        }

        fn run(
            &mut self,
            _ctx: &SystemContext,
            _state: &mut GameState,
            _rng: &mut SystemRng<'_>,
        ) -> Result<()> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    fn settings() -> EngineSettings {
        EngineSettings {
            seed: 1,
            chop_award: 1,
        }
    }

    #[test]
    fn systems_run_every_step_regardless_of_input() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0));
        let mut engine = EngineBuilder::new(settings())
            .with_system(CountingSystem {
                calls: calls.clone(),
            })
            .build();
        let mut state = GameState::new(parse_map("p.."), 100);

        engine.step(&mut state, None).unwrap();
        engine
            .step(&mut state, Some(PlayerCommand::Move(Direction::Right)))
            .unwrap();
        engine
            .step(&mut state, Some(PlayerCommand::Chop(Direction::Omni)))
            .unwrap();

        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
        assert_eq!(state.tick(), 3);
    }

    #[test]
    fn player_command_is_applied_before_systems() {
        let mut engine = EngineBuilder::new(settings()).build();
        let mut state = GameState::new(parse_map("p.."), 100);
        state
            .grid
            .set_occupant(Coordinate::new(2, 0), TileContent::Tree(TreeState::Adult));

        let moved = engine
            .step(&mut state, Some(PlayerCommand::Move(Direction::Right)))
            .unwrap();
        assert!(moved.player_moved);
        assert_eq!(moved.tick, 0);

        let chopped = engine
            .step(&mut state, Some(PlayerCommand::Chop(Direction::Right)))
            .unwrap();
        assert_eq!(chopped.tiles_chopped, 1);
        assert_eq!(state.player.score, 1);
    }
}
