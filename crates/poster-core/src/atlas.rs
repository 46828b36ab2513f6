//! Character atlas for the ASCII pass.
//!
//! The atlas is a square RGBA bitmap with the glyph ramp laid out row-major,
//! `ATLAS_GLYPHS_PER_ROW` cells per row, each glyph centered in its cell. Glyph
//! drawing itself is delegated to a [`GlyphRasterizer`] so the layout stays
//! testable off the web.

use crate::constants::{
    ATLAS_CANVAS_PX, ATLAS_CELL_PX, ATLAS_CELL_SIZE, ATLAS_FONT_SIZE_PX, ATLAS_GLYPHS_PER_ROW,
    ATLAS_GLYPH_RAMP,
};
use crate::image::RgbaImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    pub font_size_px: u32,
    pub glyphs_per_row: u32,
    pub cell_px: u32,
    pub canvas_px: u32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            font_size_px: ATLAS_FONT_SIZE_PX,
            glyphs_per_row: ATLAS_GLYPHS_PER_ROW,
            cell_px: ATLAS_CELL_PX,
            canvas_px: ATLAS_CANVAS_PX,
        }
    }
}

/// Where one glyph of the ramp is drawn, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub index: u32,
    pub glyph: char,
    pub center_x: f32,
    pub center_y: f32,
}

/// Draws glyphs centered at the given placements onto a transparent square
/// canvas and returns its RGBA bytes, or `None` when no drawing context exists.
pub trait GlyphRasterizer {
    fn rasterize(&mut self, layout: &AtlasLayout, placements: &[GlyphPlacement]) -> Option<Vec<u8>>;
}

#[derive(Clone, Debug)]
pub struct CharacterAtlas {
    layout: AtlasLayout,
    ramp: Vec<char>,
}

impl Default for CharacterAtlas {
    fn default() -> Self {
        Self::new(AtlasLayout::default(), ATLAS_GLYPH_RAMP)
    }
}

impl CharacterAtlas {
    pub fn new(layout: AtlasLayout, ramp: &str) -> Self {
        Self {
            layout,
            ramp: ramp.chars().collect(),
        }
    }

    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    pub fn ramp(&self) -> &[char] {
        &self.ramp
    }

    /// UV-space size of one cell as consumed by the ASCII shader.
    pub fn cell_size(&self) -> f32 {
        ATLAS_CELL_SIZE
    }

    pub fn glyph_count(&self) -> u32 {
        self.ramp.len() as u32
    }

    pub fn placements(&self) -> Vec<GlyphPlacement> {
        let per_row = self.layout.glyphs_per_row.max(1);
        let cell = self.layout.cell_px as f32;
        self.ramp
            .iter()
            .enumerate()
            .map(|(i, &glyph)| {
                let i = i as u32;
                GlyphPlacement {
                    index: i,
                    glyph,
                    center_x: (i % per_row) as f32 * cell + cell / 2.0,
                    center_y: (i / per_row) as f32 * cell + cell / 2.0,
                }
            })
            .collect()
    }

    /// Render the atlas bitmap. Without a usable rasterizer the result is a
    /// blank canvas of the same size rather than an error.
    pub fn build(&self, rasterizer: Option<&mut dyn GlyphRasterizer>) -> RgbaImage {
        let side = self.layout.canvas_px;
        let Some(rasterizer) = rasterizer else {
            log::warn!("[atlas] no 2d context, glyphs skipped");
            return RgbaImage::blank(side, side);
        };
        match rasterizer.rasterize(&self.layout, &self.placements()) {
            Some(pixels) => RgbaImage::from_raw(side, side, pixels).unwrap_or_else(|| {
                log::warn!("[atlas] rasterizer returned wrong byte count, using blank atlas");
                RgbaImage::blank(side, side)
            }),
            None => {
                log::warn!("[atlas] rasterizer unavailable, using blank atlas");
                RgbaImage::blank(side, side)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_fits_on_canvas() {
        let atlas = CharacterAtlas::default();
        let last = atlas.placements().pop().unwrap();
        let max = atlas.layout().canvas_px as f32;
        assert!(last.center_x < max && last.center_y < max);
        assert_eq!(atlas.glyph_count() as usize, ATLAS_GLYPH_RAMP.chars().count());
    }

    #[test]
    fn first_row_wraps_after_sixteen_cells() {
        let p = CharacterAtlas::default().placements();
        assert_eq!((p[0].center_x, p[0].center_y), (32.0, 32.0));
        assert_eq!((p[15].center_x, p[15].center_y), (992.0, 32.0));
        assert_eq!((p[16].center_x, p[16].center_y), (32.0, 96.0));
    }
}
