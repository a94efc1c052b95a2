use glam::DVec3;

use crate::renderer::ray::Ray;

/// Where a pointer ray lands on the orbital plane, and the orbit that passes through it now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub point: DVec3,
    pub orbital_distance: f64,
    /// Phase that puts a body of the given speed exactly at `point` at the current simulation time.
    pub phase_offset: f64,
}

/// Resolves placement clicks against the shared orbital plane (Y = 0).
pub struct PlacementResolver;

impl PlacementResolver {
    /// None when the ray runs parallel to the plane or points away from it.
    pub fn resolve(ray: &Ray, sim_time: f64, angular_speed: f64) -> Option<Placement> {
        let t = ray.intersect_plane(DVec3::ZERO, DVec3::Y)?;
        let hit = ray.at(t);
        // Snap exactly onto the plane.
        let point = DVec3::new(hit.x, 0.0, hit.z);
        Some(Placement {
            point,
            orbital_distance: point.x.hypot(point.z),
            phase_offset: point.z.atan2(point.x) - sim_time * angular_speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::solver;

    #[test]
    fn placed_orbit_passes_through_click_point() {
        let ray = Ray::new(DVec3::new(30.0, 20.0, 50.0), DVec3::new(-0.4, -0.5, -0.8));
        for (sim_time, speed) in [(0.0, 1.0), (1.0, 1.0), (37.5, 2.3), (4.2, -0.7)] {
            let p = PlacementResolver::resolve(&ray, sim_time, speed).unwrap();
            assert!(p.point.y.abs() < 1e-12);
            let solved = solver::position(sim_time, p.orbital_distance, p.orbital_distance, speed, p.phase_offset);
            assert!(
                (solved - p.point).length() < 1e-6,
                "solver {solved:?} vs click {:?}",
                p.point
            );
        }
    }

    #[test]
    fn distance_is_planar_radius() {
        let ray = Ray::new(DVec3::new(3.0, 10.0, 4.0), DVec3::NEG_Y);
        let p = PlacementResolver::resolve(&ray, 0.0, 1.0).unwrap();
        assert!((p.orbital_distance - 5.0).abs() < 1e-12);
        assert!((p.phase_offset - 4f64.atan2(3.0)).abs() < 1e-12);
    }

    #[test]
    fn parallel_ray_yields_nothing() {
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::X);
        assert!(PlacementResolver::resolve(&ray, 1.0, 1.0).is_none());
    }

    #[test]
    fn ray_pointing_away_yields_nothing() {
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::new(0.2, 1.0, 0.0));
        assert!(PlacementResolver::resolve(&ray, 1.0, 1.0).is_none());
    }
}
