// Integration tests driving the public engine API on the canonical city
// grid with a seeded RNG.

use pherograph::config::SimulationConfig;
use pherograph::simulation::{Simulation, layout};

fn city_sim(seed: u64) -> Simulation {
    Simulation::new(SimulationConfig::default(), layout::city_grid(), seed).unwrap()
}

#[test]
fn city_grid_builds_fully_connected() {
    let sim = city_sim(1);
    assert!(
        sim.connectivity.is_connected(),
        "city grid should form one component, got {:?}",
        sim.connectivity.components
    );
    assert_eq!(sim.colonies.len(), 4);
    assert_eq!(sim.traffic.special_edge_count(), 4);
}

#[test]
fn long_run_holds_every_invariant() {
    let mut sim = city_sim(42);
    let mut previous_best: Vec<Option<f32>> = vec![None; sim.colonies.len()];

    // Two simulated minutes in 50 ms steps: spawning, traffic toggles, and
    // hundreds of ACO cycles.
    for _ in 0..2400 {
        sim.update(0.05);

        for (i, colony) in sim.colonies.iter().enumerate() {
            assert!(
                colony.spawn_count <= sim.config.num_ants_per_colony,
                "colony {} exceeded its spawn cap",
                colony.name
            );
            assert!(
                colony.arrived_count <= colony.spawn_count,
                "colony {} counted more arrivals than spawns",
                colony.name
            );
            if let (Some(best), Some(prev)) = (colony.best_distance, previous_best[i]) {
                assert!(
                    best <= prev,
                    "colony {} best distance regressed from {} to {}",
                    colony.name,
                    prev,
                    best
                );
            }
            previous_best[i] = colony.best_distance;
        }
    }

    // Pheromone floor and symmetry over every edge, after everything.
    for edge in sim.graph.edges() {
        let forward = sim.pheromones.get(edge.u, edge.v);
        let backward = sim.pheromones.get(edge.v, edge.u);
        assert!(
            forward >= sim.config.min_pheromone,
            "edge {:?} dropped below the floor: {}",
            edge,
            forward
        );
        assert_eq!(forward, backward, "asymmetry on edge {:?}", edge);
    }

    // With two minutes of simulated time the colonies should have spawned
    // their full complement and routed at least some ants home.
    let total_spawned: u32 = sim.colonies.iter().map(|c| c.spawn_count).sum();
    let total_arrived: u32 = sim.colonies.iter().map(|c| c.arrived_count).sum();
    assert_eq!(total_spawned, 4 * sim.config.num_ants_per_colony);
    assert!(total_arrived > 0, "no ant arrived in two simulated minutes");
}

#[test]
fn arrivals_are_never_double_counted() {
    let mut sim = city_sim(7);
    for _ in 0..2400 {
        sim.update(0.05);
    }
    for colony in &sim.colonies {
        assert_eq!(
            colony.arrived_ants.len() as u32,
            colony.arrived_count,
            "colony {} arrival list and counter disagree",
            colony.name
        );
        let counted = sim
            .ants
            .values()
            .filter(|a| a.counted && a.path[0] == colony.start)
            .count() as u32;
        assert_eq!(counted, colony.arrived_count);
    }
}

#[test]
fn best_paths_start_and_end_correctly() {
    let mut sim = city_sim(1234);
    for _ in 0..2400 {
        sim.update(0.05);
    }
    for colony in &sim.colonies {
        if let Some(path) = &colony.best_path {
            assert_eq!(path[0], colony.start);
            assert_eq!(*path.last().unwrap(), colony.target);
            // Every consecutive pair must be a real edge.
            for pair in path.windows(2) {
                assert!(
                    sim.graph.has_edge(pair[0], pair[1]),
                    "best path of {} uses a non-edge {:?}",
                    colony.name,
                    pair
                );
            }
        }
    }
}

#[test]
fn reset_returns_the_engine_to_its_initial_state() {
    let mut sim = city_sim(99);
    for _ in 0..600 {
        sim.update(0.05);
    }
    assert!(!sim.ants.is_empty());

    sim.reset();
    assert!(sim.ants.is_empty());
    assert_eq!(sim.cycle, 0);
    for colony in &sim.colonies {
        assert_eq!(colony.spawn_count, 0);
        assert_eq!(colony.arrived_count, 0);
        assert!(colony.best_path.is_none());
    }

    // The field matches a freshly initialized one.
    let fresh = city_sim(99);
    for edge in sim.graph.edges() {
        assert_eq!(
            sim.pheromones.get(edge.u, edge.v),
            fresh.pheromones.get(edge.u, edge.v),
            "pheromone on {:?} differs from a fresh field",
            edge
        );
    }

    // And the engine keeps running normally afterwards.
    for _ in 0..600 {
        sim.update(0.05);
    }
    assert!(!sim.ants.is_empty());
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let mut sim = city_sim(seed);
        for _ in 0..1200 {
            sim.update(0.05);
        }
        sim.colonies
            .iter()
            .map(|c| (c.arrived_count, c.best_distance.map(f32::to_bits)))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}
