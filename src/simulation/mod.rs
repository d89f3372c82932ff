pub mod ant;
pub mod colony;
pub mod graph;
pub mod layout;
pub mod pheromone;
pub mod sim;
pub mod timer;
pub mod traffic;

// Re-export key types for easier imports
pub use ant::{Ant, AntKey, AntRef, MoveOutcome};
pub use colony::Colony;
pub use graph::{ConnectivityReport, EdgeKey, Graph, Node, Point};
pub use layout::{ColonySpec, Layout};
pub use pheromone::PheromoneField;
pub use sim::{CycleReport, SimStats, Simulation};
pub use timer::Timer;
pub use traffic::TrafficController;

// Geometry constants
/// Nodes sharing an axis within this many units count as aligned.
pub const ALIGN_TOLERANCE: f32 = 5.0;
/// Guard for divisions by near-zero edge lengths.
pub const LENGTH_EPSILON: f32 = 0.1;

// Pheromone constants
/// Deposit multiplier for ants retracing their colony's best path.
pub const BEST_PATH_BONUS: f32 = 2.0;

pub(crate) const MS_PER_SEC: f32 = 1000.0;
