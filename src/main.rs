use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pherograph::config;
use pherograph::simulation::{Simulation, layout};

/// Command-line arguments for the headless runner.
#[derive(Parser)]
#[command(name = "pherograph", version, about = "Multi-colony ACO street simulation")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for a deterministic run.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 60.0)]
    duration: f32,

    /// Suppress the final stats line.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;
    let mut sim = Simulation::new(config, layout::city_grid(), cli.seed)?;

    if !sim.connectivity.is_connected() {
        eprintln!(
            "Warning: graph is not fully connected ({} components); some targets may be unreachable",
            sim.connectivity.components.len()
        );
    }

    // Fixed 10 ms steps, the cadence a render loop would drive.
    let step = 0.01;
    let steps = (cli.duration / step) as u64;
    for _ in 0..steps {
        sim.update(step);
    }

    for colony in &sim.colonies {
        match (colony.best_distance, &colony.best_path) {
            (Some(distance), Some(path)) => println!(
                "Colony {}: {}/{} arrived, best {:.1} over {} nodes",
                colony.name,
                colony.arrived_count,
                colony.spawn_count,
                distance,
                path.len()
            ),
            _ => println!(
                "Colony {}: {}/{} arrived",
                colony.name, colony.arrived_count, colony.spawn_count
            ),
        }
    }

    if !cli.quiet {
        let stats = sim.stats();
        println!(
            "cycles={} ants={} active={} mean_path={:.1} max_pheromone={:.4}",
            sim.cycle, stats.total_ants, stats.active_ants, stats.mean_path_len, stats.max_pheromone
        );
    }

    Ok(())
}
