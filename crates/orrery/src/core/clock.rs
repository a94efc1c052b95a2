/// Wall-clock to simulation-time conversion.
/// The only time source for orbital motion: `sim_time = (now - start) * speed`.
///
/// The multiplier is never folded into stored state, so changing it rescales
/// every body's angular velocity on the very next evaluation.
#[derive(Debug, Clone)]
pub struct OrbitClock {
    /// Wall-clock origin in milliseconds.
    start_ms: f64,
    /// Global speed multiplier (simulation time per millisecond).
    speed: f64,
}

impl OrbitClock {
    pub fn new(start_ms: f64, speed: f64) -> Self {
        Self { start_ms, speed }
    }

    /// Move the wall-clock origin, e.g. once the host reports its first timestamp.
    pub fn restart(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
    }

    /// Simulation time at wall-clock `now_ms`.
    pub fn sim_time(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_ms) * self.speed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_seconds_at_default_speed_is_one_unit() {
        let clock = OrbitClock::new(0.0, 0.0001);
        assert!((clock.sim_time(10_000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn offset_start_is_subtracted() {
        let clock = OrbitClock::new(5_000.0, 0.001);
        assert!((clock.sim_time(6_000.0) - 1.0).abs() < 1e-12);
        assert_eq!(clock.sim_time(5_000.0), 0.0);
    }

    #[test]
    fn speed_change_applies_on_next_evaluation() {
        let mut clock = OrbitClock::new(0.0, 0.0001);
        let before = clock.sim_time(20_000.0);
        clock.set_speed(0.0002);
        let after = clock.sim_time(20_000.0);
        assert!((after - 2.0 * before).abs() < 1e-12);
    }

    #[test]
    fn restart_resets_origin() {
        let mut clock = OrbitClock::new(0.0, 1.0);
        clock.restart(100.0);
        assert_eq!(clock.start_ms(), 100.0);
        assert_eq!(clock.sim_time(100.0), 0.0);
    }
}
