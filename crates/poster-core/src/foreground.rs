use glam::{Mat4, Vec3};

use crate::constants::{FOREGROUND_SCALE, FOREGROUND_SEGMENTS, PIXEL_GRID_ASPECT};
use crate::geometry::PlaneGeometry;
use crate::pixelation::PixelationState;
use crate::uniforms::ForegroundUniforms;

/// The textured poster mesh and its scroll-reactive pixelation.
pub struct ForegroundStack {
    uniforms: ForegroundUniforms,
    pixelation: PixelationState,
    geometry: PlaneGeometry,
    scale: f32,
}

impl Default for ForegroundStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ForegroundStack {
    pub fn new() -> Self {
        let pixelation = PixelationState::default();
        Self {
            uniforms: ForegroundUniforms {
                pixel_factor: pixelation.current(),
                ..Default::default()
            },
            pixelation,
            geometry: PlaneGeometry::new(
                1.0,
                PIXEL_GRID_ASPECT,
                FOREGROUND_SEGMENTS,
                FOREGROUND_SEGMENTS,
            ),
            scale: FOREGROUND_SCALE,
        }
    }

    /// Push this frame's time and scroll signals, then relax pixelation one step.
    pub fn update(&mut self, elapsed_ms: f64, scroll_progress: f64, scroll_delta: f64) {
        self.uniforms.time = elapsed_ms as f32;
        self.uniforms.scroll_progress = scroll_progress as f32;
        self.uniforms.scroll_delta = scroll_delta as f32;
        self.uniforms.pixel_factor = self.pixelation.step(scroll_delta as f32);
    }

    pub fn current_pixel_factor(&self) -> f32 {
        self.pixelation.current()
    }

    pub fn uniforms(&self) -> ForegroundUniforms {
        self.uniforms
    }

    pub fn geometry(&self) -> &PlaneGeometry {
        &self.geometry
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_writes_signals_and_pixel_factor() {
        let mut fg = ForegroundStack::new();
        fg.update(1234.0, 0.25, 75.0);
        let u = fg.uniforms();
        assert_eq!(u.time, 1234.0);
        assert_eq!(u.scroll_progress, 0.25);
        assert_eq!(u.scroll_delta, 75.0);
        // One step from 1080 toward 20 at rate 0.05.
        assert!((u.pixel_factor - 1027.0).abs() < 1e-3);
        assert_eq!(u.pixel_factor, fg.current_pixel_factor());
    }
}
