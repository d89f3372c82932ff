use std::collections::HashMap;

use super::graph::EdgeKey;

/// Passability state for the traffic-controlled edges. true = green.
///
/// Blocked edges are temporarily impassable, never removed: ants skip them
/// and re-evaluate on the next cycle.
pub struct TrafficController {
    states: HashMap<EdgeKey, bool>,
}

impl TrafficController {
    /// All lights start green.
    pub fn new(special_edges: &[EdgeKey]) -> Self {
        Self {
            states: special_edges.iter().map(|&edge| (edge, true)).collect(),
        }
    }

    /// Flip every light at once: one synchronized cycle, not per-edge
    /// timers.
    pub fn toggle_all(&mut self) {
        for state in self.states.values_mut() {
            *state = !*state;
        }
    }

    /// True iff (u, v) is traffic-controlled and currently red.
    pub fn is_blocked(&self, u: usize, v: usize) -> bool {
        self.states
            .get(&EdgeKey::new(u, v))
            .map_or(false, |&green| !green)
    }

    pub fn is_special(&self, u: usize, v: usize) -> bool {
        self.states.contains_key(&EdgeKey::new(u, v))
    }

    pub fn special_edge_count(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_green() {
        let traffic = TrafficController::new(&[EdgeKey::new(0, 1)]);
        assert!(!traffic.is_blocked(0, 1));
        assert!(!traffic.is_blocked(1, 0));
    }

    #[test]
    fn test_toggle_flips_all_lights_together() {
        let mut traffic = TrafficController::new(&[EdgeKey::new(0, 1), EdgeKey::new(2, 3)]);
        traffic.toggle_all();
        assert!(traffic.is_blocked(0, 1));
        assert!(traffic.is_blocked(3, 2));
        traffic.toggle_all();
        assert!(!traffic.is_blocked(0, 1));
        assert!(!traffic.is_blocked(2, 3));
    }

    #[test]
    fn test_normal_edges_are_never_blocked() {
        let mut traffic = TrafficController::new(&[EdgeKey::new(0, 1)]);
        traffic.toggle_all();
        assert!(!traffic.is_blocked(4, 5));
        assert!(!traffic.is_special(4, 5));
        assert!(traffic.is_special(1, 0));
    }
}
