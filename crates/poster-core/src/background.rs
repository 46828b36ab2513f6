use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::constants::BACKGROUND_PLANE_SIZE;
use crate::geometry::PlaneGeometry;
use crate::params::Params;
use crate::uniforms::{BackgroundUniforms, ViewportUniform};

/// Full-screen noise plane.
///
/// The uniform block is shared through an `Rc<RefCell<_>>` so the parameter
/// bindings can write into it; nothing else holds a handle.
pub struct BackgroundSurface {
    uniforms: Rc<RefCell<BackgroundUniforms>>,
    geometry: PlaneGeometry,
    scale: Vec3,
}

impl BackgroundSurface {
    pub fn new(params: &Params) -> Self {
        Self {
            uniforms: Rc::new(RefCell::new(BackgroundUniforms::from_params(
                params,
                ViewportUniform::default(),
            ))),
            geometry: PlaneGeometry::new(BACKGROUND_PLANE_SIZE, BACKGROUND_PLANE_SIZE, 1, 1),
            scale: Vec3::ONE,
        }
    }

    pub fn uniforms_handle(&self) -> &Rc<RefCell<BackgroundUniforms>> {
        &self.uniforms
    }

    pub fn uniforms(&self) -> BackgroundUniforms {
        *self.uniforms.borrow()
    }

    pub fn geometry(&self) -> &PlaneGeometry {
        &self.geometry
    }

    pub fn update_time(&self, elapsed_ms: f64, timestamp_ms: f64) {
        let mut u = self.uniforms.borrow_mut();
        u.clock.elapsed = elapsed_ms as f32;
        u.clock.timestamp = timestamp_ms as f32;
    }

    pub fn update_scroll(&self, current: f64, delta: f64) {
        let mut u = self.uniforms.borrow_mut();
        u.scroll.current = current as f32;
        u.scroll.delta = delta as f32;
    }

    pub fn resize(&self, width: f32, height: f32, device_pixel_ratio: f32) {
        let ratio = if height > 0.0 { width / height } else { 1.0 };
        let mut u = self.uniforms.borrow_mut();
        u.viewport = ViewportUniform {
            size: [width, height],
            dpr: device_pixel_ratio,
            ratio,
        };
        u.aspect_ratio = ratio;
    }

    /// Scale the plane so it spans a frustum slice of the given world size.
    pub fn set_scale_from_frustum(&mut self, frustum_width: f32, frustum_height: f32) {
        self.scale = Vec3::new(
            frustum_width / BACKGROUND_PLANE_SIZE,
            frustum_height / BACKGROUND_PLANE_SIZE,
            1.0,
        );
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
    }
}
