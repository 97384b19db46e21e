//! Fixed-rate tick loop: one input poll, one simulation step, one redraw.

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::{
    display::{draw_frame, Display, InputEvent},
    engine::{Engine, PlayerCommand},
    world::{GameState, RunSummary},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Exiting,
}

pub struct Orchestrator<D: Display> {
    engine: Engine,
    state: GameState,
    display: D,
    tick_period: Duration,
}

impl<D: Display> Orchestrator<D> {
    pub fn new(engine: Engine, state: GameState, display: D, tick_period: Duration) -> Self {
        Self {
            engine,
            state,
            display,
            tick_period,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// One tick. A quit event ends the loop before any simulation happens;
    /// every other outcome, including no input at all, advances the game.
    pub fn tick(&mut self) -> Result<LoopState> {
        let event = self.display.poll_event(self.tick_period)?;
        let command = match event {
            Some(InputEvent::Quit) => {
                self.state.exit = true;
                return Ok(LoopState::Exiting);
            }
            Some(InputEvent::Move(direction)) => Some(PlayerCommand::Move(direction)),
            Some(InputEvent::Chop(direction)) => Some(PlayerCommand::Chop(direction)),
            Some(InputEvent::Resize) | None => None,
        };
        self.engine.step(&mut self.state, command)?;
        draw_frame(&mut self.display, &self.state)?;
        Ok(LoopState::Running)
    }

    /// Loop at the fixed tick period until the exit flag is set.
    pub fn run(&mut self) -> Result<RunSummary> {
        draw_frame(&mut self.display, &self.state)?;
        loop {
            let started = Instant::now();
            if self.tick()? == LoopState::Exiting {
                break;
            }
            if let Some(remaining) = self.tick_period.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
        let summary = self.state.summary();
        info!(
            ticks = summary.ticks,
            score = summary.score,
            plantings = summary.roamer_plantings,
            "simulation finished"
        );
        Ok(summary)
    }
}

/// Run the whole loop on a dedicated simulation thread and block until it
/// finishes. The caller keeps ownership of display teardown.
pub fn run_on_simulation_thread<D>(mut orchestrator: Orchestrator<D>) -> Result<RunSummary>
where
    D: Display + 'static,
{
    let handle = thread::Builder::new()
        .name("simulation".into())
        .spawn(move || orchestrator.run())
        .context("Failed to start simulation thread")?;
    handle
        .join()
        .map_err(|_| anyhow!("simulation thread panicked"))?
}
