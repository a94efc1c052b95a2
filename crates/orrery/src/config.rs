use serde::{Deserialize, Serialize};

/// Tunables for the simulation, camera rigs and the new-body panel.
/// Loaded from a JSON file at runtime; every missing field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Global speed multiplier at startup (simulation time per wall-clock millisecond).
    pub initial_speed: f64,
    /// Lower bound of the operator speed range.
    pub speed_min: f64,
    /// Upper bound of the operator speed range.
    pub speed_max: f64,

    /// Body self-rotation per tick (radians).
    pub spin_step: f64,
    /// Cloud shell rotation per tick (radians).
    pub cloud_spin_step: f64,
    /// Satellite inclination drift per tick (radians).
    pub satellite_precession_step: f64,
    /// Ring rotation about its normal per tick (radians).
    pub ring_spin_step: f64,

    /// Free-flight translation per tick (world units).
    pub move_speed: f64,
    /// Free-look rotation per pointer pixel (radians).
    pub look_sensitivity: f64,
    /// Follow-rig rotation per dragged pixel (radians).
    pub drag_sensitivity: f64,
    /// Follow-rig distance change per wheel delta unit.
    pub wheel_sensitivity: f64,
    /// Margin kept between follow pitch and the poles (radians).
    pub pitch_epsilon: f64,
    pub follow_distance_min: f64,
    pub follow_distance_max: f64,
    /// Framing distance per unit of body radius when a body is selected.
    pub follow_distance_factor: f64,
    /// Follow distance before any selection.
    pub follow_distance_initial: f64,

    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub initial_camera_position: [f64; 3],

    pub new_body: NewBodyConfig,

    /// Fixed seed for the phase-offset generator. `None` reseeds from the host
    /// clock at `Simulation::init`, so each session starts from new phases.
    pub rng_seed: Option<u64>,
}

/// Defaults and operator ranges for bodies created by placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBodyConfig {
    pub radius: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub speed: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    /// RGB in 0.0–1.0.
    pub color: [f32; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_speed: 0.0001,
            speed_min: 0.0001,
            speed_max: 0.001,
            spin_step: 0.01,
            cloud_spin_step: 0.02,
            satellite_precession_step: 0.0005,
            ring_spin_step: 0.001,
            move_speed: 0.5,
            look_sensitivity: 0.002,
            drag_sensitivity: 0.005,
            wheel_sensitivity: 0.01,
            pitch_epsilon: 0.1,
            follow_distance_min: 2.0,
            follow_distance_max: 100.0,
            follow_distance_factor: 6.0,
            follow_distance_initial: 10.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
            initial_camera_position: [30.0, 20.0, 50.0],
            new_body: NewBodyConfig::default(),
            rng_seed: None,
        }
    }
}

impl Default for NewBodyConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            radius_min: 0.1,
            radius_max: 2.0,
            speed: 1.0,
            speed_min: 0.1,
            speed_max: 5.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp an operator-supplied speed multiplier into the configured range.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        // Tolerates an inverted range from JSON.
        speed.max(self.speed_min).min(self.speed_max)
    }
}
