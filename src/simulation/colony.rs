use super::ant::{Ant, AntRef};
use super::timer::Timer;

/// One colony: a start/target pair with spawn and arrival bookkeeping.
pub struct Colony {
    pub id: usize,
    pub name: String,
    pub start: usize,
    pub target: usize,
    /// RGB tag for presentation layers.
    pub color: u32,
    pub spawn_count: u32,
    pub arrived_count: u32,
    pub arrived_ants: Vec<AntRef>,
    pub best_path: Option<Vec<usize>>,
    pub best_distance: Option<f32>,
    pub spawn_timer: Timer,
}

impl Colony {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        start: usize,
        target: usize,
        color: u32,
        spawn_interval: f32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start,
            target,
            color,
            spawn_count: 0,
            arrived_count: 0,
            arrived_ants: Vec::new(),
            best_path: None,
            best_distance: None,
            spawn_timer: Timer::new(spawn_interval),
        }
    }

    /// One-time arrival bookkeeping for an ant that just finished. Returns
    /// true when the ant set a new best path.
    pub fn record_arrival(&mut self, ant: &Ant) -> bool {
        self.arrived_count += 1;
        self.arrived_ants.push(ant.ant_ref);

        let improved = self
            .best_distance
            .map_or(true, |best| ant.total_distance < best);
        if improved {
            self.best_distance = Some(ant.total_distance);
            self.best_path = Some(ant.path.clone());
        }
        improved
    }

    /// Element-wise comparison against the current best path.
    pub fn is_best_path(&self, path: &[usize]) -> bool {
        self.best_path.as_deref() == Some(path)
    }

    /// Zero counters and best-path state and restart spawn scheduling.
    pub fn reset(&mut self) {
        self.spawn_count = 0;
        self.arrived_count = 0;
        self.arrived_ants.clear();
        self.best_path = None;
        self.best_distance = None;
        self.spawn_timer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrived_ant(colony_id: usize, path: Vec<usize>, total_distance: f32) -> Ant {
        let mut ant = Ant::new(path[0], *path.last().unwrap(), colony_id, 1.0);
        ant.current = *path.last().unwrap();
        ant.path = path;
        ant.total_distance = total_distance;
        ant.arrived = true;
        ant
    }

    #[test]
    fn test_first_arrival_sets_best() {
        let mut colony = Colony::new(0, "Red", 0, 2, 0xff0000, 1.0);
        assert!(colony.best_distance.is_none());

        let ant = arrived_ant(0, vec![0, 1, 2], 150.0);
        assert!(colony.record_arrival(&ant));
        assert_eq!(colony.arrived_count, 1);
        assert_eq!(colony.best_distance, Some(150.0));
        assert!(colony.is_best_path(&[0, 1, 2]));
    }

    #[test]
    fn test_best_distance_only_improves() {
        let mut colony = Colony::new(0, "Red", 0, 2, 0xff0000, 1.0);
        colony.record_arrival(&arrived_ant(0, vec![0, 1, 2], 150.0));

        // Worse and equal arrivals leave the best untouched.
        assert!(!colony.record_arrival(&arrived_ant(0, vec![0, 3, 2], 180.0)));
        assert!(!colony.record_arrival(&arrived_ant(0, vec![0, 4, 2], 150.0)));
        assert_eq!(colony.best_distance, Some(150.0));
        assert!(colony.is_best_path(&[0, 1, 2]));

        assert!(colony.record_arrival(&arrived_ant(0, vec![0, 2], 100.0)));
        assert_eq!(colony.best_distance, Some(100.0));
        assert_eq!(colony.arrived_count, 4);
    }

    #[test]
    fn test_is_best_path_is_element_wise() {
        let mut colony = Colony::new(0, "Red", 0, 2, 0xff0000, 1.0);
        colony.record_arrival(&arrived_ant(0, vec![0, 1, 2], 150.0));
        assert!(!colony.is_best_path(&[0, 1]));
        assert!(!colony.is_best_path(&[0, 3, 2]));
    }

    #[test]
    fn test_reset_clears_bookkeeping() {
        let mut colony = Colony::new(0, "Red", 0, 2, 0xff0000, 1.0);
        colony.spawn_count = 5;
        colony.record_arrival(&arrived_ant(0, vec![0, 1, 2], 150.0));
        colony.reset();
        assert_eq!(colony.spawn_count, 0);
        assert_eq!(colony.arrived_count, 0);
        assert!(colony.arrived_ants.is_empty());
        assert!(colony.best_path.is_none());
        assert!(colony.best_distance.is_none());
    }
}
