//! Ray casting against the primitives the renderer draws.

use glam::DVec3;

const PARALLEL_EPSILON: f64 = 1e-12;

/// Half-line from `origin` along unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, distance: f64) -> DVec3 {
        self.origin + self.direction * distance
    }

    /// Distance to the infinite plane through `point` with `normal`.
    /// None when the ray runs parallel to it or the plane lies behind the origin.
    pub fn intersect_plane(&self, point: DVec3, normal: DVec3) -> Option<f64> {
        let denom = normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        if t > 0.0 {
            Some(t)
        } else {
            None
        }
    }

    /// Nearest non-negative distance to a sphere surface.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere
        let far = -b + sqrt_disc;
        if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    /// Distance to a flat annulus centred at `center` with the given `normal`.
    pub fn intersect_annulus(
        &self,
        center: DVec3,
        normal: DVec3,
        inner_radius: f64,
        outer_radius: f64,
    ) -> Option<f64> {
        let t = self.intersect_plane(center, normal)?;
        let r = (self.at(t) - center).length();
        if r >= inner_radius && r <= outer_radius {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_hit_from_above() {
        let ray = Ray::new(DVec3::new(0.0, 10.0, 0.0), DVec3::new(1.0, -1.0, 0.0));
        let t = ray.intersect_plane(DVec3::ZERO, DVec3::Y).unwrap();
        let p = ray.at(t);
        assert!(p.y.abs() < 1e-12);
        assert!((p.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn plane_parallel_or_behind_misses() {
        let parallel = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::X);
        assert!(parallel.intersect_plane(DVec3::ZERO, DVec3::Y).is_none());

        let away = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::Y);
        assert!(away.intersect_plane(DVec3::ZERO, DVec3::Y).is_none());
    }

    #[test]
    fn sphere_hit_returns_near_surface() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        let t = ray.intersect_sphere(DVec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-9);
    }

    #[test]
    fn sphere_miss() {
        let ray = Ray::new(DVec3::new(5.0, 0.0, 10.0), DVec3::NEG_Z);
        assert!(ray.intersect_sphere(DVec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn annulus_ignores_the_hole() {
        let through_hole = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        assert!(through_hole
            .intersect_annulus(DVec3::ZERO, DVec3::Z, 1.2, 2.3)
            .is_none());

        let on_band = Ray::new(DVec3::new(2.0, 0.0, 10.0), DVec3::NEG_Z);
        assert!(on_band
            .intersect_annulus(DVec3::ZERO, DVec3::Z, 1.2, 2.3)
            .is_some());
    }
}
