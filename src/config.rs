//! Runtime configuration, loaded from YAML with every field defaulted

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub growth: GrowthConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub roamer: RoamerConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthConfig {
    #[serde(default = "default_seed_to_sapling")]
    pub seed_to_sapling: f64,
    #[serde(default = "default_sapling_to_adult")]
    pub sapling_to_adult: f64,
    #[serde(default = "default_seed_creation_chance")]
    pub seed_creation_chance: f64,
    #[serde(default = "default_seed_creation_max")]
    pub seed_creation_max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default = "default_chop_award")]
    pub chop_award: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoamerConfig {
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    #[serde(default = "default_vision_radius")]
    pub vision_radius: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    #[serde(default = "default_tree_density")]
    pub initial_tree_density: f64,
    #[serde(default = "default_grass_light_density")]
    pub grass_light_density: f64,
    #[serde(default = "default_grass_heavy_density")]
    pub grass_heavy_density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_maps_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_map_extension")]
    pub extension: String,
    #[serde(default = "default_map_name")]
    pub default_map: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_tick_ms() -> u64 {
    30
}

fn default_seed_to_sapling() -> f64 {
    0.010
}

fn default_sapling_to_adult() -> f64 {
    0.005
}

fn default_seed_creation_chance() -> f64 {
    0.005
}

fn default_seed_creation_max() -> u32 {
    3
}

fn default_chop_award() -> u32 {
    1
}

fn default_retry_limit() -> u32 {
    16
}

fn default_vision_radius() -> u32 {
    100
}

fn default_tree_density() -> f64 {
    0.04
}

fn default_grass_light_density() -> f64 {
    0.08
}

fn default_grass_heavy_density() -> f64 {
    0.03
}

fn default_maps_dir() -> PathBuf {
    PathBuf::from("maps")
}

fn default_map_extension() -> String {
    "map".to_string()
}

fn default_map_name() -> String {
    "forest".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("skog.log")
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            seed: None,
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            seed_to_sapling: default_seed_to_sapling(),
            sapling_to_adult: default_sapling_to_adult(),
            seed_creation_chance: default_seed_creation_chance(),
            seed_creation_max: default_seed_creation_max(),
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            chop_award: default_chop_award(),
        }
    }
}

impl Default for RoamerConfig {
    fn default() -> Self {
        Self {
            retry_limit: default_retry_limit(),
            vision_radius: default_vision_radius(),
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_tree_density: default_tree_density(),
            grass_light_density: default_grass_light_density(),
            grass_heavy_density: default_grass_heavy_density(),
        }
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            dir: default_maps_dir(),
            extension: default_map_extension(),
            default_map: default_map_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("simulation.tick_ms must be greater than zero")]
    ZeroTick,
    #[error("roamer.retry_limit must be greater than zero")]
    ZeroRetryLimit,
}

impl GameConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: GameConfig =
            serde_yaml::from_str(text).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&data)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("growth.seed_to_sapling", self.growth.seed_to_sapling),
            ("growth.sapling_to_adult", self.growth.sapling_to_adult),
            ("growth.seed_creation_chance", self.growth.seed_creation_chance),
            (
                "population.initial_tree_density",
                self.population.initial_tree_density,
            ),
            (
                "population.grass_light_density",
                self.population.grass_light_density,
            ),
            (
                "population.grass_heavy_density",
                self.population.grass_heavy_density,
            ),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }
        if self.simulation.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.roamer.retry_limit == 0 {
            return Err(ConfigError::ZeroRetryLimit);
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_ms)
    }

    /// Resolve a map argument: an existing file is used as-is, anything else
    /// is treated as a name under the maps directory.
    pub fn map_path(&self, map: Option<&str>) -> PathBuf {
        let name = map.unwrap_or(&self.maps.default_map);
        let direct = Path::new(name);
        if direct.is_file() {
            return direct.to_path_buf();
        }
        self.maps
            .dir
            .join(format!("{}.{}", name, self.maps.extension))
    }
}
