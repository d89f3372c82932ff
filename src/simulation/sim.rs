use std::collections::HashSet;

use anyhow::{Result, bail};
use slotmap::SlotMap;

use crate::config::SimulationConfig;

use super::ant::{Ant, AntKey, AntRef, MoveContext, MoveOutcome};
use super::colony::Colony;
use super::graph::{ConnectivityReport, EdgeKey, Graph};
use super::layout::Layout;
use super::pheromone::PheromoneField;
use super::timer::Timer;
use super::traffic::TrafficController;
use super::{BEST_PATH_BONUS, MS_PER_SEC};

/// What one ACO cycle did.
#[derive(Debug, Default, Clone)]
pub struct CycleReport {
    /// Ants that committed a step this cycle (including arrivals).
    pub moved: Vec<AntRef>,
    /// Ants whose arrival was counted this cycle. Each ant appears here
    /// exactly once over its lifetime.
    pub arrived: Vec<AntRef>,
}

/// Aggregate view for status displays.
#[derive(Debug, Clone, Copy)]
pub struct SimStats {
    pub total_ants: usize,
    pub active_ants: usize,
    pub mean_path_len: f32,
    pub max_pheromone: f32,
}

/// The whole engine state: graph, pheromone field, traffic lights,
/// colonies, and the ant arena, plus the timers that schedule them.
///
/// An embedder drives it with [`Simulation::update`] at whatever cadence it
/// likes; everything inside is strictly sequential.
pub struct Simulation {
    pub graph: Graph,
    pub connectivity: ConnectivityReport,
    pub pheromones: PheromoneField,
    pub traffic: TrafficController,
    pub colonies: Vec<Colony>,
    pub ants: SlotMap<AntKey, Ant>,
    pub config: SimulationConfig,
    pub cycle: u64,
    pub is_paused: bool,
    cycle_timer: Timer,
    traffic_timer: Timer,
    rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(config: SimulationConfig, layout: Layout, seed: u64) -> Result<Self> {
        if layout.nodes.is_empty() {
            bail!("layout has no nodes");
        }

        let n = layout.nodes.len();
        let endpoint_nodes: Vec<usize> = layout
            .colonies
            .iter()
            .filter(|spec| spec.start < n && spec.target < n)
            .flat_map(|spec| [spec.start, spec.target])
            .collect();

        let (graph, connectivity) = Graph::build(
            &layout.nodes,
            &layout.critical_edges,
            &endpoint_nodes,
            config.edge_threshold,
        );

        let spawn_interval = config.spawn_interval_ms / MS_PER_SEC;
        let mut colonies = Vec::new();
        for spec in layout.colonies {
            if spec.start >= n || spec.target >= n {
                eprintln!(
                    "Warning: colony '{}' references node out of range ({} or {}), skipping.",
                    spec.name, spec.start, spec.target
                );
                continue;
            }
            colonies.push(Colony::new(
                colonies.len(),
                spec.name,
                spec.start,
                spec.target,
                spec.color,
                spawn_interval,
            ));
        }

        let mut special_edges = Vec::new();
        for &(u, v) in &layout.special_edges {
            if u >= n || v >= n {
                eprintln!(
                    "Warning: special edge ({}, {}) out of range, skipping.",
                    u, v
                );
                continue;
            }
            special_edges.push(EdgeKey::new(u, v));
        }

        let pheromones = PheromoneField::init(&graph, config.min_pheromone);
        let traffic = TrafficController::new(&special_edges);
        let cycle_timer = Timer::new(config.cycle_interval_ms / MS_PER_SEC);
        let traffic_timer = Timer::new(config.traffic_interval_ms / MS_PER_SEC);

        Ok(Self {
            graph,
            connectivity,
            pheromones,
            traffic,
            colonies,
            ants: SlotMap::with_key(),
            config,
            cycle: 0,
            is_paused: false,
            cycle_timer,
            traffic_timer,
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    /// Advance all wall-clock scheduling by `dt` seconds: transit windows,
    /// per-colony spawning, traffic toggling, and the ACO cycle itself.
    pub fn update(&mut self, dt: f32) {
        if self.is_paused {
            return;
        }

        for ant in self.ants.values_mut() {
            ant.advance_transit(dt);
        }

        for i in 0..self.colonies.len() {
            if self.colonies[i].spawn_timer.advance(dt) {
                self.spawn_ant(i);
            }
        }

        if self.traffic_timer.advance(dt) {
            self.traffic.toggle_all();
        }

        if self.cycle_timer.advance(dt) {
            self.run_cycle();
        }
    }

    /// Spawn one ant for the colony unless its cap is reached.
    pub fn spawn_ant(&mut self, colony_idx: usize) -> Option<AntRef> {
        let colony = &self.colonies[colony_idx];
        if colony.spawn_count >= self.config.num_ants_per_colony {
            return None;
        }

        let (lo, hi) = self.config.ant_speed_range;
        let speed = lo + self.rng.f32() * (hi - lo);
        let mut ant = Ant::new(colony.start, colony.target, colony.id, speed);
        let key = self.ants.insert_with_key(|k| {
            ant.ant_ref.key = k;
            ant
        });

        self.colonies[colony_idx].spawn_count += 1;
        Some(AntRef {
            key,
            colony_id: self.colonies[colony_idx].id,
        })
    }

    /// One logical ACO cycle: move every ant, then evaporate, absorb
    /// arrivals and deposits, and re-clamp the pheromone floor.
    pub fn run_cycle(&mut self) -> CycleReport {
        self.cycle += 1;
        let mut report = CycleReport::default();
        self.move_ants(&mut report);
        self.update_pheromones(&mut report);
        report
    }

    fn move_ants(&mut self, report: &mut CycleReport) {
        let keys: Vec<AntKey> = self.ants.keys().collect();
        for key in keys {
            let Some(colony_id) = self.ants.get(key).map(|a| a.ant_ref.colony_id) else {
                continue;
            };

            // Nodes held by ants of other colonies, as of this instant:
            // earlier movers in the same cycle are already at their new
            // positions.
            let occupied: HashSet<usize> = self
                .ants
                .iter()
                .filter(|(k, other)| *k != key && other.ant_ref.colony_id != colony_id)
                .map(|(_, other)| other.current)
                .collect();

            let Some(ant) = self.ants.get_mut(key) else {
                continue;
            };
            let mut ctx = MoveContext {
                graph: &self.graph,
                pheromones: &self.pheromones,
                traffic: &self.traffic,
                occupied: &occupied,
                alpha: self.config.alpha,
                beta: self.config.beta,
                duration_factor: self.config.duration_factor,
                rng: &mut self.rng,
            };
            match ant.try_move(&mut ctx) {
                MoveOutcome::Moved | MoveOutcome::Arrived => report.moved.push(ant.ant_ref),
                MoveOutcome::Waiting => {}
            }
        }
    }

    fn update_pheromones(&mut self, report: &mut CycleReport) {
        self.pheromones.evaporate(
            &self.graph,
            self.config.evaporation_rate,
            self.config.time_scale,
        );

        for ant in self.ants.values_mut() {
            if !ant.arrived {
                continue;
            }

            if !ant.counted {
                ant.counted = true;
                report.arrived.push(ant.ant_ref);
                if let Some(colony) = self.colonies.iter_mut().find(|c| c.start == ant.path[0]) {
                    colony.record_arrival(ant);
                }
            }

            // Every arrived ant keeps reinforcing its route, doubled while
            // the route is its colony's best.
            if ant.total_distance > 0.0 {
                let is_best = self
                    .colonies
                    .iter()
                    .find(|c| c.start == ant.path[0])
                    .map_or(false, |c| c.is_best_path(&ant.path));
                let bonus = if is_best { BEST_PATH_BONUS } else { 1.0 };
                let amount = self.config.pheromone_deposit / ant.total_distance * bonus;
                self.pheromones.deposit(&ant.path, amount);
            }
        }

        self.pheromones.clamp_floor();
    }

    /// Clear all ant, colony, and pheromone state in one step and restart
    /// scheduling. Nothing runs in between: the engine is single-threaded.
    pub fn reset(&mut self) {
        self.ants.clear();
        self.pheromones.reset(&self.graph);
        for colony in &mut self.colonies {
            colony.reset();
        }
        self.cycle_timer.reset();
        self.cycle = 0;
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn unpause(&mut self) {
        self.is_paused = false;
    }

    pub fn stats(&self) -> SimStats {
        let total_ants = self.ants.len();
        let active_ants = self.ants.values().filter(|a| !a.arrived).count();
        let mean_path_len = if total_ants > 0 {
            self.ants.values().map(|a| a.path.len() as f32).sum::<f32>() / total_ants as f32
        } else {
            0.0
        };
        SimStats {
            total_ants,
            active_ants,
            mean_path_len,
            max_pheromone: self.pheromones.max_on_edges(&self.graph),
        }
    }
}
