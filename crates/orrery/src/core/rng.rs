//! Seedable pseudo-random number generator (xorshift64).
//! Used for default phase offsets and satellite roll; deterministic under a fixed seed.

use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits fill the mantissa exactly.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform angle in [0, 2π).
    pub fn phase(&mut self) -> f64 {
        self.next_f64() * TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_f64(), rng2.next_f64());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let _ = rng.next_f64();
    }

    #[test]
    fn phase_stays_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let p = rng.phase();
            assert!((0.0..TAU).contains(&p), "phase out of range: {p}");
        }
    }

    #[test]
    fn range_respects_bounds() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let r = rng.range(-0.1, 0.1);
            assert!(r >= -0.1 && r < 0.1, "value out of range: {r}");
        }
    }
}
