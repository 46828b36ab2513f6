//! Shared perspective camera and its (mostly locked) controls.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_Z, CONTROLS_DAMPING, CONTROLS_MAX_DISTANCE,
    CONTROLS_MIN_DISTANCE,
};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix (wgpu depth range 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// World-space width/height of the frustum slice `distance` units in front of the eye.
    pub fn frustum_size_at(&self, distance: f32) -> Vec2 {
        let height = 2.0 * (self.fovy_radians * 0.5).tan() * distance;
        Vec2::new(height * self.aspect, height)
    }
}

/// Orbit-style controls with every interaction disabled: they only apply
/// damping toward the orbit target and keep the distance within limits.
#[derive(Clone, Debug)]
pub struct CameraControls {
    pub target: Vec3,
    pub damping_factor: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_orbit: Vec2,
    disposed: bool,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            damping_factor: CONTROLS_DAMPING,
            enable_rotate: false,
            enable_zoom: false,
            enable_pan: false,
            min_distance: CONTROLS_MIN_DISTANCE,
            max_distance: CONTROLS_MAX_DISTANCE,
            pending_orbit: Vec2::ZERO,
            disposed: false,
        }
    }
}

impl CameraControls {
    /// Queue an orbit by `(azimuth, polar)` radians; ignored while rotation is disabled.
    pub fn rotate(&mut self, delta: Vec2) {
        if self.enable_rotate && !self.disposed {
            self.pending_orbit += delta;
        }
    }

    /// Advance damping and constrain the camera. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if self.disposed {
            return false;
        }
        let before = camera.eye;
        let offset = camera.eye - self.target;
        let mut radius = offset.length();
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius.max(f32::EPSILON)).clamp(-1.0, 1.0).acos();

        let step = self.pending_orbit * self.damping_factor;
        azimuth += step.x;
        polar = (polar + step.y).clamp(1e-4, std::f32::consts::PI - 1e-4);
        self.pending_orbit -= step;

        radius = radius.clamp(self.min_distance, self.max_distance);
        let sin_polar = polar.sin();
        camera.eye = self.target
            + Vec3::new(
                radius * sin_polar * azimuth.sin(),
                radius * polar.cos(),
                radius * sin_polar * azimuth.cos(),
            );
        camera.target = self.target;
        camera.eye.distance_squared(before) > 1e-12
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending_orbit = Vec2::ZERO;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_controls_keep_camera_in_place() {
        let mut cam = Camera::new(16.0 / 9.0);
        let mut controls = CameraControls::default();
        controls.rotate(Vec2::new(1.0, 0.5));
        for _ in 0..10 {
            controls.update(&mut cam);
        }
        assert!((cam.eye - Vec3::new(0.0, 0.0, CAMERA_Z)).length() < 1e-5);
    }

    #[test]
    fn frustum_height_matches_fov() {
        let cam = Camera::new(2.0);
        let size = cam.frustum_size_at(1.0);
        let expected_h = 2.0 * (22.5f32).to_radians().tan();
        assert!((size.y - expected_h).abs() < 1e-6);
        assert!((size.x - expected_h * 2.0).abs() < 1e-6);
    }
}
