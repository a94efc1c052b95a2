//! Preset star, planets, moons and rings.
//!
//! Sizes and distances are scene units, exaggerated for readability rather
//! than to scale. Flat colours stand in for surface textures.

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

// ── Star ─────────────────────────────────────────────────────────────

pub const STAR_NAME: &str = "Sun";
pub const STAR_RADIUS: f32 = 2.5;
pub const STAR_COLOR: u32 = 0xffd27a;
pub const STAR_EMISSIVE: f32 = 1.0;

// ── Planets ──────────────────────────────────────────────────────────

pub struct PlanetPreset {
    pub name: &'static str,
    pub radius: f64,
    pub distance: f64,
    pub speed: f64,
    /// Ellipse scale along X and Z.
    pub factor_x: f64,
    pub factor_z: f64,
    pub color: u32,
    pub clouds: bool,
}

pub const PLANETS: [PlanetPreset; PLANET_COUNT] = [
    PlanetPreset { name: "Mercury", radius: 0.4, distance: 12.0, speed: 1.5, factor_x: 1.0, factor_z: 0.9, color: 0x9c8f84, clouds: false },
    PlanetPreset { name: "Venus", radius: 0.5, distance: 18.0, speed: 1.2, factor_x: 1.0, factor_z: 0.96, color: 0xe3c07a, clouds: false },
    PlanetPreset { name: "Earth", radius: 0.6, distance: 25.0, speed: 1.0, factor_x: 1.0, factor_z: 0.98, color: 0x3f7fd0, clouds: true },
    PlanetPreset { name: "Mars", radius: 0.5, distance: 33.0, speed: 0.8, factor_x: 1.0, factor_z: 0.9, color: 0xc1502e, clouds: false },
    PlanetPreset { name: "Jupiter", radius: 1.0, distance: 45.0, speed: 0.6, factor_x: 1.0, factor_z: 0.95, color: 0xc9a27e, clouds: false },
    PlanetPreset { name: "Saturn", radius: 0.9, distance: 60.0, speed: 0.5, factor_x: 1.0, factor_z: 0.9, color: 0xe0c68f, clouds: false },
    PlanetPreset { name: "Uranus", radius: 0.7, distance: 75.0, speed: 0.4, factor_x: 1.0, factor_z: 0.97, color: 0x9fd8e0, clouds: false },
    PlanetPreset { name: "Neptune", radius: 0.7, distance: 90.0, speed: 0.3, factor_x: 1.0, factor_z: 0.93, color: 0x4166d5, clouds: false },
];

// ── Moons ────────────────────────────────────────────────────────────

pub struct MoonPreset {
    pub name: &'static str,
    /// Index into `PLANETS`.
    pub parent: usize,
    pub radius: f64,
    pub distance: f64,
    pub speed: f64,
    pub inclination: f64,
    pub color: u32,
}

pub const MOON_COUNT: usize = 3;

pub fn moons() -> [MoonPreset; MOON_COUNT] {
    use std::f64::consts::{FRAC_PI_4, FRAC_PI_6};
    [
        MoonPreset { name: "Luna", parent: EARTH, radius: 0.15, distance: 1.5, speed: 2.0, inclination: FRAC_PI_4, color: 0xffffff },
        MoonPreset { name: "Phobos", parent: MARS, radius: 0.08, distance: 1.0, speed: 2.5, inclination: FRAC_PI_6, color: 0xaaaaaa },
        MoonPreset { name: "Deimos", parent: MARS, radius: 0.06, distance: 2.0, speed: 1.8, inclination: FRAC_PI_4, color: 0x888888 },
    ]
}

// ── Rings ────────────────────────────────────────────────────────────

pub struct RingPreset {
    pub parent: usize,
    pub inner: f64,
    pub outer: f64,
    pub inclination_deg: f64,
    pub color: u32,
}

pub const RINGS: [RingPreset; 2] = [
    RingPreset { parent: SATURN, inner: 1.2, outer: 2.3, inclination_deg: 27.0, color: 0xcdb98f },
    RingPreset { parent: URANUS, inner: 0.8, outer: 1.6, inclination_deg: 97.77, color: 0x8fb3bd },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].distance < pair[1].distance, "{} before {}", pair[0].name, pair[1].name);
        }
        assert_eq!(PLANETS[NEPTUNE].name, "Neptune");
        assert_eq!(PLANETS[MERCURY].speed, 1.5);
        assert!(PLANETS[EARTH].clouds);
    }

    #[test]
    fn moon_parents_valid() {
        for moon in &moons() {
            assert!(moon.parent < PLANET_COUNT, "moon {} has invalid parent", moon.name);
        }
    }

    #[test]
    fn rings_are_well_formed() {
        for ring in &RINGS {
            assert!(ring.parent < PLANET_COUNT);
            assert!(ring.inner < ring.outer);
        }
        assert_eq!(RINGS[0].parent, SATURN);
        assert_eq!(PLANETS[VENUS].name, "Venus");
        assert_eq!(PLANETS[JUPITER].radius, 1.0);
    }
}
