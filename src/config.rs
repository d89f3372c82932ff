use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tunable parameters of the simulation engine.
///
/// Every field has a default matching the canonical scenario; a TOML file
/// can override any subset.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    /// Pheromone influence exponent in the transition rule.
    pub alpha: f32,
    /// Heuristic (inverse distance) influence exponent.
    pub beta: f32,
    /// Per-cycle pheromone retention factor.
    pub evaporation_rate: f32,
    /// Exponent applied to the evaporation rate per cycle.
    pub time_scale: f32,
    /// Lower bound every pheromone entry is clamped to.
    pub min_pheromone: f32,
    /// Arrival deposit numerator (deposit = base / path distance).
    pub pheromone_deposit: f32,
    /// Per-colony ant cap.
    pub num_ants_per_colony: u32,
    /// Maximum off-axis distance for automatic edges.
    pub edge_threshold: f32,
    /// Milliseconds between ant spawns per colony.
    pub spawn_interval_ms: f32,
    /// Milliseconds between ACO cycles.
    pub cycle_interval_ms: f32,
    /// Milliseconds between traffic light toggles.
    pub traffic_interval_ms: f32,
    /// Range the per-ant speed multiplier is drawn from at spawn.
    pub ant_speed_range: (f32, f32),
    /// Transit duration per length unit, in milliseconds.
    pub duration_factor: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha: 1.2,
            beta: 2.5,
            evaporation_rate: 0.97,
            time_scale: 1.0,
            min_pheromone: 0.001,
            pheromone_deposit: 100.0,
            num_ants_per_colony: 8,
            edge_threshold: 80.0,
            spawn_interval_ms: 1000.0,
            cycle_interval_ms: 150.0,
            traffic_interval_ms: 10_000.0,
            ant_speed_range: (0.8, 1.2),
            duration_factor: 25.0,
        }
    }
}

/// Load a configuration from a TOML file, or defaults when no path is
/// given.
pub fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            let config = toml::from_str(&content)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            Ok(config)
        }
        None => Ok(SimulationConfig::default()),
    }
}
