// Count-up interval timer for cycle/spawn/traffic scheduling.

#[derive(Debug, Clone)]
pub struct Timer {
    pub interval: f32,
    pub elapsed: f32,
}

impl Timer {
    /// Create a timer that fires every `interval` seconds.
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns true when the interval elapses,
    /// wrapping the remainder into the next period.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            if self.interval > 0.0 {
                self.elapsed %= self.interval;
            } else {
                self.elapsed = 0.0;
            }
            true
        } else {
            false
        }
    }

    /// Make the next `advance` call fire regardless of its dt.
    pub fn force_ready(&mut self) {
        self.elapsed = self.interval;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = Timer::new(1.0);
        assert!(!timer.advance(0.4));
        assert!(!timer.advance(0.4));
        assert!(timer.advance(0.4));
    }

    #[test]
    fn test_wraps_remainder() {
        let mut timer = Timer::new(1.0);
        assert!(timer.advance(1.3));
        assert!(
            (timer.elapsed - 0.3).abs() < 1e-6,
            "remainder should carry into the next period, got {}",
            timer.elapsed
        );
    }

    #[test]
    fn test_force_ready() {
        let mut timer = Timer::new(10.0);
        timer.force_ready();
        assert!(timer.advance(0.0));
    }

    #[test]
    fn test_reset() {
        let mut timer = Timer::new(1.0);
        timer.advance(0.9);
        timer.reset();
        assert!(!timer.advance(0.9));
    }
}
