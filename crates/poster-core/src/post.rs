use std::cell::RefCell;
use std::rc::Rc;

use crate::atlas::{CharacterAtlas, GlyphRasterizer};
use crate::image::RgbaImage;
use crate::params::Params;
use crate::uniforms::AsciiUniforms;

/// Scene-to-ASCII composite stage.
///
/// Cell size, glyph count and the atlas bitmap are fixed at construction.
/// Time and resolution are written per frame/resize; the ink/paper colors
/// arrive through the parameter bindings.
pub struct PostProcessStage {
    uniforms: Rc<RefCell<AsciiUniforms>>,
    atlas_image: RgbaImage,
    target_size: [u32; 2],
}

impl PostProcessStage {
    pub fn new(
        params: &Params,
        atlas: &CharacterAtlas,
        rasterizer: Option<&mut dyn GlyphRasterizer>,
    ) -> Self {
        let atlas_image = atlas.build(rasterizer);
        Self {
            uniforms: Rc::new(RefCell::new(AsciiUniforms::new(
                params,
                [0.0, 0.0],
                atlas.cell_size(),
                atlas.glyph_count(),
            ))),
            atlas_image,
            target_size: [1, 1],
        }
    }

    pub fn uniforms_handle(&self) -> &Rc<RefCell<AsciiUniforms>> {
        &self.uniforms
    }

    pub fn uniforms(&self) -> AsciiUniforms {
        *self.uniforms.borrow()
    }

    pub fn atlas_image(&self) -> &RgbaImage {
        &self.atlas_image
    }

    /// Store elapsed time in seconds.
    pub fn update_time(&self, elapsed_ms: f64) {
        self.uniforms.borrow_mut().time = (elapsed_ms * 0.001) as f32;
    }

    /// `width`/`height` are CSS pixels; the targets are allocated at device
    /// resolution while `uResolution` keeps the CSS size.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.target_size = [
            ((width * device_pixel_ratio).round() as u32).max(1),
            ((height * device_pixel_ratio).round() as u32).max(1),
        ];
        self.uniforms.borrow_mut().resolution = [width, height];
    }

    pub fn target_size(&self) -> [u32; 2] {
        self.target_size
    }
}
