use std::collections::HashSet;

use slotmap::{Key, new_key_type};

use super::graph::Graph;
use super::pheromone::PheromoneField;
use super::traffic::TrafficController;
use super::{LENGTH_EPSILON, MS_PER_SEC};

new_key_type! {
    /// Key for the ant arena.
    pub struct AntKey;
}

/// Arena handle for an ant together with its colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AntRef {
    pub key: AntKey,
    pub colony_id: usize,
}

/// Outcome of a single move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Committed a step to a new node.
    Moved,
    /// Committed the step that reached the target.
    Arrived,
    /// No legal step this cycle; the ant stays put. Normal and frequent.
    Waiting,
}

/// Read-only surroundings for one move attempt.
pub struct MoveContext<'a> {
    pub graph: &'a Graph,
    pub pheromones: &'a PheromoneField,
    pub traffic: &'a TrafficController,
    /// Nodes currently held by ants of other colonies.
    pub occupied: &'a HashSet<usize>,
    pub alpha: f32,
    pub beta: f32,
    pub duration_factor: f32,
    pub rng: &'a mut fastrand::Rng,
}

/// A path-walker. Spawned at its colony's start node, it steps one edge per
/// cycle toward its target and stays inert there once arrived.
pub struct Ant {
    pub ant_ref: AntRef,
    pub current: usize,
    pub target: usize,
    /// Visited nodes in order, starting with the spawn node. Strictly
    /// appended; a backtrack appends the previous node again.
    pub path: Vec<usize>,
    pub total_distance: f32,
    pub arrived: bool,
    /// Set exactly once, when colony bookkeeping absorbs the arrival.
    pub counted: bool,
    /// Cosmetic transit window in seconds; only guards re-entrant moves.
    pub transit_remaining: f32,
    /// Speed multiplier drawn once at spawn.
    pub speed: f32,
}

impl Ant {
    pub fn new(start: usize, target: usize, colony_id: usize, speed: f32) -> Self {
        Self {
            ant_ref: AntRef {
                key: AntKey::null(),
                colony_id,
            },
            current: start,
            target,
            path: vec![start],
            total_distance: 0.0,
            arrived: false,
            counted: false,
            transit_remaining: 0.0,
            speed,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.transit_remaining > 0.0
    }

    /// Wind down the transit window. Purely cosmetic timing; the next
    /// logical cycle is never gated on it beyond the re-entrancy guard.
    pub fn advance_transit(&mut self, dt: f32) {
        if self.transit_remaining > 0.0 {
            self.transit_remaining = (self.transit_remaining - dt).max(0.0);
        }
    }

    /// One move attempt. No-op while arrived or mid-transit.
    pub fn try_move(&mut self, ctx: &mut MoveContext) -> MoveOutcome {
        if self.arrived || self.is_moving() {
            return MoveOutcome::Waiting;
        }

        let mut neighbors: Vec<usize> = ctx.graph.neighbors(self.current).to_vec();

        // The first step ignores collisions; afterwards nodes held by other
        // colonies are off limits, with a single-step backtrack as the
        // escape hatch when everything around is taken.
        if self.path.len() > 1 {
            let free: Vec<usize> = neighbors
                .iter()
                .copied()
                .filter(|n| !ctx.occupied.contains(n))
                .collect();
            if !free.is_empty() {
                neighbors = free;
            } else {
                neighbors = vec![self.path[self.path.len() - 2]];
            }
        }

        neighbors.retain(|&n| !ctx.traffic.is_blocked(self.current, n));
        if neighbors.is_empty() {
            return MoveOutcome::Waiting;
        }

        let next = if neighbors.len() == 1 {
            neighbors[0]
        } else {
            select_next_node(ctx, self.current, &neighbors)
        };

        // A red light on the chosen edge means wait, not reroute.
        if ctx.traffic.is_blocked(self.current, next) {
            return MoveOutcome::Waiting;
        }

        let distance = ctx.graph.distance(self.current, next);
        self.commit_move(next, distance, ctx.duration_factor)
    }

    fn commit_move(&mut self, next: usize, distance: f32, duration_factor: f32) -> MoveOutcome {
        self.current = next;
        self.path.push(next);
        self.total_distance += distance;

        if next == self.target {
            self.arrived = true;
            self.transit_remaining = 0.0;
            return MoveOutcome::Arrived;
        }

        self.transit_remaining = distance * duration_factor * self.speed / MS_PER_SEC;
        MoveOutcome::Moved
    }
}

/// The ACO transition rule.
///
/// Each candidate is weighted by `pheromone^alpha * (1/distance)^beta`; a
/// single uniform draw walks the candidates in order and picks the first
/// whose cumulative normalized mass covers it. Rounding shortfall falls
/// through to the last candidate. A degenerate distribution (zero or
/// non-finite total) picks uniformly instead of crashing.
pub fn select_next_node(ctx: &mut MoveContext, current: usize, neighbors: &[usize]) -> usize {
    let weights: Vec<f32> = neighbors
        .iter()
        .map(|&n| {
            let pher = ctx.pheromones.get(current, n);
            let heur = 1.0 / ctx.graph.distance(current, n).max(LENGTH_EPSILON);
            pher.powf(ctx.alpha) * heur.powf(ctx.beta)
        })
        .collect();

    let total: f32 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return neighbors[ctx.rng.usize(..neighbors.len())];
    }

    let draw = ctx.rng.f32();
    let mut cumulative = 0.0;
    for (i, &n) in neighbors.iter().enumerate() {
        cumulative += weights[i] / total;
        if draw <= cumulative {
            return n;
        }
    }
    neighbors[neighbors.len() - 1]
}
