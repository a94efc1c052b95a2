use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DQuat, DVec2, DVec3, EulerRot};
use std::f64::consts::FRAC_PI_2;

use crate::config::SimConfig;
use crate::renderer::ray::Ray;

/// Perspective camera with FPS-style yaw/pitch orientation.
/// Position and orientation are f64; the uniform is converted to f32 for the GPU.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: DVec3,
    /// Rotation about world Y (radians).
    yaw: f64,
    /// Rotation about the camera's X axis (radians), within ±π/2.
    pitch: f64,
    /// Vertical field of view (radians).
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
    /// Viewport size in CSS pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// World position (w unused).
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Camera3D {
    pub fn new(config: &SimConfig) -> Self {
        let [x, y, z] = config.initial_camera_position;
        Self {
            position: DVec3::new(x, y, z),
            yaw: 0.0,
            pitch: 0.0,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn orientation(&self) -> DQuat {
        DQuat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> DVec3 {
        self.orientation() * DVec3::NEG_Z
    }

    pub fn right(&self) -> DVec3 {
        self.orientation() * DVec3::X
    }

    pub fn aspect(&self) -> f64 {
        if self.viewport_height > 0.0 {
            self.viewport_width / self.viewport_height
        } else {
            1.0
        }
    }

    /// Update viewport dimensions (e.g. on window resize).
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.viewport_width = width;
            self.viewport_height = height;
        }
    }

    /// Free-look rotation by pointer delta (pixels). Pitch stops at the poles.
    pub fn rotate(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Translate along the camera's own axes.
    /// `local` is (right, up, back) in camera space.
    pub fn translate_local(&mut self, local: DVec3) {
        self.position += self.orientation() * local;
    }

    /// Aim at a world point. No-op when the point coincides with the camera.
    pub fn look_at(&mut self, target: DVec3) {
        let dir = target - self.position;
        if dir.length_squared() < 1e-18 {
            return;
        }
        let dir = dir.normalize();
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
    }

    /// Convert a pointer position in CSS pixels to normalized device coordinates.
    pub fn pixels_to_ndc(&self, x: f64, y: f64) -> DVec2 {
        DVec2::new(
            (x / self.viewport_width) * 2.0 - 1.0,
            -(y / self.viewport_height) * 2.0 + 1.0,
        )
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: DVec2) -> Ray {
        let tan_half = (self.fov_y * 0.5).tan();
        let view_dir = DVec3::new(ndc.x * tan_half * self.aspect(), ndc.y * tan_half, -1.0);
        Ray::new(self.position, self.orientation() * view_dir)
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        let view_projection = (self.projection_matrix() * self.view_matrix()).as_mat4();
        let p = self.position.as_vec3();
        CameraUniform {
            view_projection: view_projection.to_cols_array_2d(),
            position: [p.x, p.y, p.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera3D {
        let mut cam = Camera3D::new(&SimConfig::default());
        cam.resize(800.0, 600.0);
        cam
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = camera();
        let f = cam.forward();
        assert!((f - DVec3::NEG_Z).length() < 1e-12);
        assert!((cam.right() - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = camera();
        let target = DVec3::new(-4.0, 3.0, 7.0);
        cam.look_at(target);
        let expected = (target - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-9);
    }

    #[test]
    fn look_at_self_is_noop() {
        let mut cam = camera();
        cam.rotate(100.0, 0.0, 0.002);
        let yaw = cam.yaw();
        cam.look_at(cam.position);
        assert_eq!(cam.yaw(), yaw);
    }

    #[test]
    fn rotate_clamps_pitch_at_poles() {
        let mut cam = camera();
        cam.rotate(0.0, -1.0e6, 0.002);
        assert!(cam.pitch() <= FRAC_PI_2);
        cam.rotate(0.0, 1.0e6, 0.002);
        assert!(cam.pitch() >= -FRAC_PI_2);
    }

    #[test]
    fn center_ray_follows_forward() {
        let mut cam = camera();
        cam.look_at(DVec3::ZERO);
        let ray = cam.ray_from_ndc(DVec2::ZERO);
        assert!((ray.direction - cam.forward()).length() < 1e-9);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn pixels_to_ndc_maps_corners() {
        let cam = camera();
        assert_eq!(cam.pixels_to_ndc(0.0, 0.0), DVec2::new(-1.0, 1.0));
        assert_eq!(cam.pixels_to_ndc(800.0, 600.0), DVec2::new(1.0, -1.0));
        assert_eq!(cam.pixels_to_ndc(400.0, 300.0), DVec2::ZERO);
    }

    #[test]
    fn translate_local_moves_along_forward() {
        let mut cam = camera();
        let start = cam.position;
        cam.translate_local(DVec3::new(0.0, 0.0, -1.0));
        assert!((cam.position - (start + cam.forward())).length() < 1e-12);
    }

    #[test]
    fn uniform_projects_target_to_center() {
        let mut cam = camera();
        cam.look_at(DVec3::ZERO);
        let u = cam.uniform();
        let m = glam::Mat4::from_cols_array_2d(&u.view_projection);
        let clip = m * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-4);
        assert!((clip.y / clip.w).abs() < 1e-4);
    }
}
