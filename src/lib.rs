//! Multi-colony ant colony optimization on a shared street graph.
//!
//! This crate is the simulation engine only: graph construction with
//! connectivity guarantees, the pheromone field, traffic-light edge
//! blocking, ant movement, and per-colony bookkeeping. Rendering and input
//! belong to the embedding application, which drives
//! [`simulation::Simulation::update`] from its own scheduler. A small
//! headless runner binary is included as the reference embedder.

pub mod config;
pub mod simulation;

pub use config::SimulationConfig;
pub use simulation::Simulation;
