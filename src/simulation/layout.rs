use super::graph::Point;

/// A complete scenario: node positions plus the edge and colony overlays
/// the engine builds from.
pub struct Layout {
    pub nodes: Vec<Point>,
    /// Curated edges unioned in after the automatic passes.
    pub critical_edges: Vec<(usize, usize)>,
    /// Edges under traffic-light control.
    pub special_edges: Vec<(usize, usize)>,
    pub colonies: Vec<ColonySpec>,
}

/// Colony description before the engine instantiates its bookkeeping.
#[derive(Debug, Clone)]
pub struct ColonySpec {
    pub name: String,
    pub start: usize,
    pub target: usize,
    pub color: u32,
}

/// The canonical city grid: 47 intersections, four colonies crossing the
/// map in different directions, four traffic-controlled streets in the
/// middle.
pub fn city_grid() -> Layout {
    let nodes = vec![
        Point::new(400.0, 100.0),
        Point::new(271.0, 100.0),
        Point::new(186.0, 143.0),
        Point::new(143.0, 186.0),
        Point::new(100.0, 229.0),
        Point::new(100.0, 314.0),
        Point::new(100.0, 400.0),
        Point::new(100.0, 486.0),
        Point::new(100.0, 571.0),
        Point::new(186.0, 657.0),
        Point::new(271.0, 700.0),
        Point::new(486.0, 143.0),
        Point::new(529.0, 186.0),
        Point::new(571.0, 229.0),
        Point::new(571.0, 314.0),
        Point::new(571.0, 400.0),
        Point::new(571.0, 486.0),
        Point::new(571.0, 571.0),
        Point::new(400.0, 700.0),
        Point::new(486.0, 657.0),
        Point::new(186.0, 229.0),
        Point::new(271.0, 314.0),
        Point::new(186.0, 571.0),
        Point::new(400.0, 143.0),
        Point::new(271.0, 186.0),
        Point::new(271.0, 143.0),
        Point::new(400.0, 186.0),
        Point::new(486.0, 186.0),
        Point::new(271.0, 657.0),
        Point::new(271.0, 571.0),
        Point::new(271.0, 486.0),
        Point::new(271.0, 400.0),
        Point::new(271.0, 229.0),
        Point::new(186.0, 486.0),
        Point::new(186.0, 400.0),
        Point::new(186.0, 314.0),
        Point::new(400.0, 186.0),
        Point::new(400.0, 486.0),
        Point::new(400.0, 400.0),
        Point::new(400.0, 229.0),
        Point::new(400.0, 314.0),
        Point::new(400.0, 571.0),
        Point::new(400.0, 657.0),
        Point::new(486.0, 314.0),
        Point::new(486.0, 486.0),
        Point::new(486.0, 400.0),
        Point::new(486.0, 229.0),
    ];

    let critical_edges = vec![
        (0, 23),
        (1, 25),
        (2, 20),
        (3, 4),
        (5, 6),
        (7, 8),
        (10, 18),
        (11, 12),
        (13, 14),
        (19, 17),
        (10, 9),
        (9, 8),
        (1, 2),
        (17, 41),
        (19, 18),
        (22, 29),
        (2, 3),
        (0, 11),
        (12, 13),
        (24, 25),
        (26, 36),
        (30, 31),
        (34, 35),
        (37, 38),
        (40, 41),
        (31, 38),
        (6, 34),
        (5, 35),
        (25, 23),
        (24, 36),
        (21, 35),
        (21, 40),
        (32, 39),
        (38, 45),
        (43, 45),
        (40, 43),
        (7, 33),
        (33, 30),
        (29, 41),
        (28, 42),
        (42, 41),
        (44, 19),
        (44, 37),
        (39, 46),
        (44, 45),
        (36, 27),
        (46, 43),
    ];

    let special_edges = vec![(30, 31), (31, 38), (37, 38), (30, 37)];

    let colonies = vec![
        ColonySpec {
            name: "Red".into(),
            start: 0,
            target: 18,
            color: 0xff0000,
        },
        ColonySpec {
            name: "Blue".into(),
            start: 6,
            target: 15,
            color: 0x0000ff,
        },
        ColonySpec {
            name: "Pink".into(),
            start: 16,
            target: 7,
            color: 0xff69b4,
        },
        ColonySpec {
            name: "Orange".into(),
            start: 10,
            target: 1,
            color: 0xffa500,
        },
    ];

    Layout {
        nodes,
        critical_edges,
        special_edges,
        colonies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::graph::Graph;

    #[test]
    fn test_city_grid_is_connected() {
        let layout = city_grid();
        let (_, report) = Graph::build(&layout.nodes, &layout.critical_edges, &[], 80.0);
        assert!(
            report.is_connected(),
            "expected one component, got {}",
            report.components.len()
        );
    }

    #[test]
    fn test_colony_endpoints_are_in_range() {
        let layout = city_grid();
        for colony in &layout.colonies {
            assert!(colony.start < layout.nodes.len());
            assert!(colony.target < layout.nodes.len());
            assert_ne!(colony.start, colony.target);
        }
    }

    #[test]
    fn test_edge_lists_are_in_range() {
        let layout = city_grid();
        let n = layout.nodes.len();
        for &(u, v) in layout.critical_edges.iter().chain(&layout.special_edges) {
            assert!(u < n && v < n, "edge ({}, {}) out of range", u, v);
        }
    }
}
