use glam::{DQuat, DVec3, EulerRot};
use std::f64::consts::FRAC_PI_2;

use crate::config::SimConfig;

/// Spherical-offset rig used while following a body.
///
/// Yaw and pitch accumulate drag deltas; distance accumulates wheel deltas.
/// Pitch stays strictly inside the poles and distance inside its range after
/// every update, whatever the input magnitude.
#[derive(Debug, Clone)]
pub struct FollowOrbitRig {
    yaw: f64,
    pitch: f64,
    distance: f64,
    drag_sensitivity: f64,
    wheel_sensitivity: f64,
    pitch_limit: f64,
    min_distance: f64,
    max_distance: f64,
    distance_factor: f64,
}

impl FollowOrbitRig {
    pub fn new(config: &SimConfig) -> Self {
        let min_distance = config.follow_distance_min;
        let max_distance = config.follow_distance_max.max(min_distance);
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: config.follow_distance_initial.clamp(min_distance, max_distance),
            drag_sensitivity: config.drag_sensitivity,
            wheel_sensitivity: config.wheel_sensitivity,
            pitch_limit: (FRAC_PI_2 - config.pitch_epsilon).max(0.0),
            min_distance,
            max_distance,
            distance_factor: config.follow_distance_factor,
        }
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Largest |pitch| the rig allows.
    pub fn pitch_limit(&self) -> f64 {
        self.pitch_limit
    }

    /// Zero yaw and pitch. Distance is kept.
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    /// Reset angles and pick a framing distance for a body of `radius`.
    /// A zero or undefined radius frames as if it were 1.
    pub fn frame(&mut self, radius: f64) {
        self.reset();
        let radius = if radius == 0.0 || !radius.is_finite() { 1.0 } else { radius };
        let framed = (radius * self.distance_factor).max(self.distance_factor);
        self.distance = framed.clamp(self.min_distance, self.max_distance);
    }

    /// Apply a pointer drag of (dx, dy) pixels.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw -= dx * self.drag_sensitivity;
        self.pitch = (self.pitch + dy * self.drag_sensitivity).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Apply a wheel delta. Positive moves away from the body.
    pub fn zoom(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            return;
        }
        self.distance = (self.distance + delta_y * self.wheel_sensitivity).clamp(self.min_distance, self.max_distance);
    }

    /// Camera offset from the followed body: +Z rotated by (pitch, yaw, 0), scaled by distance.
    pub fn offset(&self) -> DVec3 {
        DQuat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0) * DVec3::Z * self.distance
    }
}
