use poster_core::constants::MAX_DEVICE_PIXEL_RATIO;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// `window.devicePixelRatio`, capped for fill-rate.
pub fn device_pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO))
        .unwrap_or(1.0) as f32
}

/// Current viewport size in CSS pixels.
pub fn viewport_size() -> Option<(u32, u32)> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some((width.max(0.0) as u32, height.max(0.0) as u32))
}

/// Match the canvas backing store to `css size * dpr`.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, size: [u32; 2]) {
    if canvas.width() != size[0] {
        canvas.set_width(size[0].max(1));
    }
    if canvas.height() != size[1] {
        canvas.set_height(size[1].max(1));
    }
}

pub fn create_element<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(js_err)?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("<{}> has unexpected type: {:?}", tag, e))
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| js_err(e.into()))
}
