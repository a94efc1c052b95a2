/// Time-driven orbit evaluation: pure math, no engine dependencies.
///
/// f64 throughout; positions are converted to f32 only at the rendering boundary.
use glam::DVec3;
use std::f64::consts::TAU;

/// Orbital parameters of a body around the shared centre.
/// Orbits lie in the XZ plane; `radius_x != radius_z` gives an elliptical trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius_x: f64,
    pub radius_z: f64,
    /// Signed multiplier of simulation time (radians per unit).
    pub angular_speed: f64,
    /// Angle at simulation time zero (radians). Fixed once the body exists.
    pub phase_offset: f64,
}

impl Orbit {
    /// Circular orbit of the given radius.
    pub fn circular(radius: f64, angular_speed: f64, phase_offset: f64) -> Self {
        Self {
            radius_x: radius,
            radius_z: radius,
            angular_speed,
            phase_offset,
        }
    }

    /// Orbital angle at simulation time `t`.
    pub fn angle(&self, t: f64) -> f64 {
        orbital_angle(t, self.angular_speed, self.phase_offset)
    }

    /// Position at simulation time `t`.
    pub fn position(&self, t: f64) -> DVec3 {
        position(t, self.radius_x, self.radius_z, self.angular_speed, self.phase_offset)
    }
}

/// `θ = t·speed + phase`.
pub fn orbital_angle(t: f64, angular_speed: f64, phase_offset: f64) -> f64 {
    t * angular_speed + phase_offset
}

/// `(cos θ · radius_x, 0, sin θ · radius_z)`.
pub fn position(t: f64, radius_x: f64, radius_z: f64, angular_speed: f64, phase_offset: f64) -> DVec3 {
    let theta = orbital_angle(t, angular_speed, phase_offset);
    DVec3::new(theta.cos() * radius_x, 0.0, theta.sin() * radius_z)
}

/// Closed ellipse through the orbit, sampled at `samples` evenly spaced angles.
/// The last point repeats the first.
pub fn orbit_trace(orbit: &Orbit, samples: usize) -> Vec<DVec3> {
    let samples = samples.max(3);
    (0..=samples)
        .map(|i| {
            let theta = (i as f64 / samples as f64) * TAU;
            DVec3::new(theta.cos() * orbit.radius_x, 0.0, theta.sin() * orbit.radius_z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_after_ten_seconds_at_default_speed() {
        // sim time 1.0, speed 1, phase 0, radius 25
        let p = position(1.0, 25.0, 25.0, 1.0, 0.0);
        assert!((p.x - 1.0f64.cos() * 25.0).abs() < 1e-12);
        assert_eq!(p.y, 0.0);
        assert!((p.z - 1.0f64.sin() * 25.0).abs() < 1e-12);
        assert!((p.x - 13.51).abs() < 0.01);
        assert!((p.z - 21.04).abs() < 0.01);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let orbit = Orbit { radius_x: 33.0, radius_z: 29.7, angular_speed: 0.8, phase_offset: 2.1 };
        assert_eq!(orbit.position(17.25), orbit.position(17.25));
    }

    #[test]
    fn negative_speed_runs_backwards() {
        let forward = position(0.5, 10.0, 10.0, 1.0, 0.0);
        let backward = position(0.5, 10.0, 10.0, -1.0, 0.0);
        assert!((forward.x - backward.x).abs() < 1e-12);
        assert!((forward.z + backward.z).abs() < 1e-12);
    }

    #[test]
    fn elliptical_radii_scale_axes_independently() {
        let orbit = Orbit { radius_x: 12.0, radius_z: 10.8, angular_speed: 1.0, phase_offset: 0.0 };
        assert!((orbit.position(0.0).x - 12.0).abs() < 1e-12);
        let quarter = orbit.position(std::f64::consts::FRAC_PI_2);
        assert!((quarter.z - 10.8).abs() < 1e-12);
    }

    #[test]
    fn trace_is_closed_and_on_the_ellipse() {
        let orbit = Orbit { radius_x: 45.0, radius_z: 42.75, angular_speed: 0.6, phase_offset: 1.0 };
        let points = orbit_trace(&orbit, 100);
        assert_eq!(points.len(), 101);
        assert!((points[0] - points[100]).length() < 1e-9);
        for p in &points {
            let e = (p.x / orbit.radius_x).powi(2) + (p.z / orbit.radius_z).powi(2);
            assert!((e - 1.0).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }
}
