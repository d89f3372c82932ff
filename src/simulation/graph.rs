use std::collections::HashMap;

use super::ALIGN_TOLERANCE;

/// 2D position of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when the two points share an axis within [`ALIGN_TOLERANCE`].
    pub fn axis_aligned(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < ALIGN_TOLERANCE || (self.y - other.y).abs() < ALIGN_TOLERANCE
    }
}

/// A graph node: immutable position plus the colony-endpoint flag.
#[derive(Debug, Clone)]
pub struct Node {
    pub pos: Point,
    pub special: bool,
}

/// Canonical unordered edge identifier: the smaller index always comes
/// first, so two lookups for (u, v) and (v, u) hit the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub u: usize,
    pub v: usize,
}

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { u: a, v: b }
        } else {
            Self { u: b, v: a }
        }
    }
}

/// Connected components of the finished graph. More than one component
/// means some nodes stayed unreachable: that is reported, never an error.
#[derive(Debug, Clone)]
pub struct ConnectivityReport {
    pub components: Vec<Vec<usize>>,
}

impl ConnectivityReport {
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }
}

/// The street graph: built once, read-only for the rest of the simulation.
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<EdgeKey>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Construct the edge set over the given node positions.
    ///
    /// Candidate edges connect axis-aligned nodes whose off-axis distance is
    /// at most `edge_threshold`. A union-find pass over the candidates
    /// (shortest first) then bridges disconnected components with the
    /// shortest axis-aligned pair available, repeating until the graph is
    /// connected or no axis-aligned bridge exists. Curated critical edges
    /// are unioned in last, skipping duplicates and out-of-range indices.
    pub fn build(
        positions: &[Point],
        critical_edges: &[(usize, usize)],
        special_nodes: &[usize],
        edge_threshold: f32,
    ) -> (Self, ConnectivityReport) {
        let n = positions.len();
        let mut edges = base_edges(positions, edge_threshold);

        // Shortest edges first so the spanning-forest pass prefers short
        // links, matching the bridge selection below.
        edges.sort_by(|a, b| {
            let da = positions[a.u].distance(&positions[a.v]);
            let db = positions[b.u].distance(&positions[b.v]);
            da.total_cmp(&db)
        });

        let mut dsu = DisjointSet::new(n);
        for edge in &edges {
            dsu.union(edge.u, edge.v);
        }

        // Bridge remaining components with the globally shortest
        // axis-aligned pair, one edge per pass. Components with no
        // axis-aligned pair to anywhere stay disconnected.
        loop {
            if dsu.component_count() <= 1 {
                break;
            }
            let mut best: Option<(EdgeKey, f32)> = None;
            for i in 0..n {
                for j in (i + 1)..n {
                    if dsu.find(i) == dsu.find(j) || !positions[i].axis_aligned(&positions[j]) {
                        continue;
                    }
                    let d = positions[i].distance(&positions[j]);
                    if best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((EdgeKey::new(i, j), d));
                    }
                }
            }
            match best {
                Some((edge, _)) => {
                    dsu.union(edge.u, edge.v);
                    edges.push(edge);
                }
                None => break,
            }
        }

        for &(i, j) in critical_edges {
            if i >= n || j >= n {
                eprintln!(
                    "Warning: critical edge ({}, {}) out of range for {} nodes, skipping.",
                    i, j, n
                );
                continue;
            }
            if i == j {
                continue;
            }
            let key = EdgeKey::new(i, j);
            if !edges.contains(&key) {
                edges.push(key);
                dsu.union(i, j);
            }
        }

        let report = dsu.report();

        let mut special = vec![false; n];
        for &i in special_nodes {
            if i < n {
                special[i] = true;
            } else {
                eprintln!("Warning: special node {} out of range, skipping.", i);
            }
        }

        let mut adjacency = vec![Vec::new(); n];
        for edge in &edges {
            adjacency[edge.u].push(edge.v);
            adjacency[edge.v].push(edge.u);
        }

        let nodes = positions
            .iter()
            .zip(special)
            .map(|(&pos, special)| Node { pos, special })
            .collect();

        (
            Self {
                nodes,
                edges,
                adjacency,
            },
            report,
        )
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].contains(&v)
    }

    pub fn distance(&self, u: usize, v: usize) -> f32 {
        self.nodes[u].pos.distance(&self.nodes[v].pos)
    }
}

/// All candidate edges: axis-aligned pairs within the off-axis threshold.
fn base_edges(positions: &[Point], edge_threshold: f32) -> Vec<EdgeKey> {
    let mut edges = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let (a, b) = (&positions[i], &positions[j]);
            let dx = (a.x - b.x).abs();
            let dy = (a.y - b.y).abs();
            if (dx < ALIGN_TOLERANCE && dy <= edge_threshold)
                || (dy < ALIGN_TOLERANCE && dx <= edge_threshold)
            {
                edges.push(EdgeKey::new(i, j));
            }
        }
    }
    edges
}

/// Union-find with path halving.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut u: usize) -> usize {
        while self.parent[u] != u {
            self.parent[u] = self.parent[self.parent[u]];
            u = self.parent[u];
        }
        u
    }

    fn union(&mut self, u: usize, v: usize) {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru != rv {
            self.parent[rv] = ru;
        }
    }

    fn component_count(&mut self) -> usize {
        let n = self.parent.len();
        let mut roots: Vec<usize> = (0..n).map(|i| self.find(i)).collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }

    fn report(&mut self) -> ConnectivityReport {
        let n = self.parent.len();
        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..n {
            let root = self.find(i);
            by_root.entry(root).or_default().push(i);
        }
        let mut components: Vec<Vec<usize>> = by_root.into_values().collect();
        components.sort_by_key(|c| c[0]);
        ConnectivityReport { components }
    }
}
