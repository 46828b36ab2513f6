//! Image loading for the scene's textures and the canvas-backed glyph
//! rasterizer. Every loader has a fallback so a missing file never stops
//! the scene from starting.

use poster_core::atlas::{AtlasLayout, GlyphPlacement, GlyphRasterizer};
use poster_core::constants::{ENVIRONMENT_FACE_PATHS, NOISE_TEXTURE_PATH, POSTER_TEXTURE_PATH};
use poster_core::{noise, RgbaImage};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::{
    ATLAS_FILL_STYLE, ATLAS_FONT_FAMILY, FALLBACK_ENVIRONMENT_RGBA, FALLBACK_POSTER_PX,
    FALLBACK_POSTER_RGBA,
};
use crate::dom::{self, js_err};

pub struct SceneAssets {
    pub noise: RgbaImage,
    pub poster: RgbaImage,
    pub environment: [RgbaImage; 6],
}

impl SceneAssets {
    pub async fn load(document: &web::Document) -> Self {
        let noise = match load_image(document, NOISE_TEXTURE_PATH).await {
            Ok(img) => img,
            Err(e) => {
                log::warn!(
                    "[assets] {} unavailable ({:?}); using procedural noise",
                    NOISE_TEXTURE_PATH,
                    e
                );
                noise::default_noise()
            }
        };
        let poster = match load_image(document, POSTER_TEXTURE_PATH).await {
            Ok(img) => img,
            Err(e) => {
                log::warn!(
                    "[assets] {} unavailable ({:?}); using flat poster",
                    POSTER_TEXTURE_PATH,
                    e
                );
                RgbaImage::solid(FALLBACK_POSTER_PX, FALLBACK_POSTER_PX, FALLBACK_POSTER_RGBA)
            }
        };
        let environment = match load_cube(document).await {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("[assets] environment map unavailable ({:?}); using white cube", e);
                std::array::from_fn(|_| RgbaImage::solid(1, 1, FALLBACK_ENVIRONMENT_RGBA))
            }
        };
        Self {
            noise,
            poster,
            environment,
        }
    }
}

/// Decode an image by URL into RGBA8 through an offscreen 2D canvas.
pub async fn load_image(document: &web::Document, path: &str) -> anyhow::Result<RgbaImage> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(path);
    JsFuture::from(img.decode()).await.map_err(js_err)?;

    let (width, height) = (img.natural_width(), img.natural_height());
    if width == 0 || height == 0 {
        anyhow::bail!("{} decoded to an empty image", path);
    }
    let canvas: web::HtmlCanvasElement = dom::create_element(document, "canvas")?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = dom::context_2d(&canvas)?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(js_err)?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?;
    RgbaImage::from_raw(width, height, data.data().0)
        .ok_or_else(|| anyhow::anyhow!("{} returned a short pixel buffer", path))
}

async fn load_cube(document: &web::Document) -> anyhow::Result<[RgbaImage; 6]> {
    let mut faces = Vec::with_capacity(6);
    for path in ENVIRONMENT_FACE_PATHS {
        faces.push(load_image(document, path).await?);
    }
    let size = faces[0].width;
    if faces.iter().any(|f| f.width != size || f.height != size) {
        anyhow::bail!("environment faces must be equal squares");
    }
    faces
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected six environment faces"))
}

/// Draws the glyph ramp with the browser's text renderer.
pub struct Canvas2dRasterizer {
    document: web::Document,
}

impl Canvas2dRasterizer {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn draw(&self, layout: &AtlasLayout, placements: &[GlyphPlacement]) -> anyhow::Result<Vec<u8>> {
        let side = layout.canvas_px;
        let canvas: web::HtmlCanvasElement = dom::create_element(&self.document, "canvas")?;
        canvas.set_width(side);
        canvas.set_height(side);
        let ctx = dom::context_2d(&canvas)?;
        ctx.clear_rect(0.0, 0.0, side as f64, side as f64);
        ctx.set_font(&format!("{}px {}", layout.font_size_px, ATLAS_FONT_FAMILY));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(ATLAS_FILL_STYLE);

        let mut buf = [0u8; 4];
        for p in placements {
            let glyph: &str = p.glyph.encode_utf8(&mut buf);
            ctx.fill_text(glyph, p.center_x as f64, p.center_y as f64)
                .map_err(js_err)?;
        }
        let data = ctx
            .get_image_data(0.0, 0.0, side as f64, side as f64)
            .map_err(js_err)?;
        Ok(data.data().0)
    }
}

impl GlyphRasterizer for Canvas2dRasterizer {
    fn rasterize(
        &mut self,
        layout: &AtlasLayout,
        placements: &[GlyphPlacement],
    ) -> Option<Vec<u8>> {
        match self.draw(layout, placements) {
            Ok(pixels) => Some(pixels),
            Err(e) => {
                log::warn!("[atlas] glyph drawing skipped: {:?}", e);
                None
            }
        }
    }
}
