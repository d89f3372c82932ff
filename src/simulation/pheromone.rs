use super::LENGTH_EPSILON;
use super::graph::Graph;

/// Symmetric pheromone intensity matrix over the graph's edges.
///
/// Entries for non-edge pairs exist (clamped to the floor at init) but are
/// never queried by the engine. Both directions of an edge always hold the
/// same value.
pub struct PheromoneField {
    values: Vec<Vec<f32>>,
    pub min_pheromone: f32,
}

impl PheromoneField {
    /// Seed every edge with the inverse of its length and clamp the whole
    /// matrix up to the floor. Short edges start attractive.
    pub fn init(graph: &Graph, min_pheromone: f32) -> Self {
        let n = graph.node_count();
        let mut field = Self {
            values: vec![vec![0.0; n]; n],
            min_pheromone,
        };
        for edge in graph.edges() {
            let d = graph.distance(edge.u, edge.v);
            let p = 1.0 / d.max(LENGTH_EPSILON);
            field.values[edge.u][edge.v] = p;
            field.values[edge.v][edge.u] = p;
        }
        field.clamp_floor();
        field
    }

    pub fn get(&self, u: usize, v: usize) -> f32 {
        self.values[u][v]
    }

    /// Multiply every edge's intensity by `rate^time_scale`, both
    /// directions, then re-apply the floor.
    pub fn evaporate(&mut self, graph: &Graph, rate: f32, time_scale: f32) {
        let factor = rate.powf(time_scale);
        for edge in graph.edges() {
            self.values[edge.u][edge.v] *= factor;
            self.values[edge.v][edge.u] *= factor;
        }
        self.clamp_floor();
    }

    /// Add `amount` symmetrically to every consecutive edge of `path`.
    pub fn deposit(&mut self, path: &[usize], amount: f32) {
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            self.values[u][v] += amount;
            self.values[v][u] += amount;
        }
    }

    pub fn clamp_floor(&mut self) {
        for row in &mut self.values {
            for value in row.iter_mut() {
                if *value < self.min_pheromone {
                    *value = self.min_pheromone;
                }
            }
        }
    }

    /// Reinitialize from the graph, keeping the configured floor.
    pub fn reset(&mut self, graph: &Graph) {
        *self = Self::init(graph, self.min_pheromone);
    }

    /// Strongest trail on any edge, for status displays.
    pub fn max_on_edges(&self, graph: &Graph) -> f32 {
        graph
            .edges()
            .iter()
            .fold(0.0, |max, e| max.max(self.values[e.u][e.v]))
    }
}
