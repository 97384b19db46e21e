pub mod actor;
pub mod config;
pub mod display;
pub mod engine;
pub mod grid;
pub mod growth;
pub mod harvest;
pub mod map;
pub mod orchestrator;
pub mod rng;
pub mod roamer;
pub mod telemetry;
pub mod world;

pub use config::GameConfig;
pub use engine::{Engine, EngineBuilder, EngineSettings, PlayerCommand, TickSummary};
pub use grid::{Coordinate, Direction, Grid, TileContent, TreeState};
pub use world::GameState;
