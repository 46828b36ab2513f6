#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod panel;
mod render;

use frame::SceneManager;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<SceneManager>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("poster-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| dom::js_err(e.into()))?;

    let manager = SceneManager::create(canvas).await?;
    SceneManager::start(&manager)?;
    if let Some(previous) = APP.with(|app| app.borrow_mut().replace(manager)) {
        SceneManager::dispose(&previous);
    }
    Ok(())
}

/// Host-driven resize in CSS pixels.
#[wasm_bindgen]
pub fn resize(width: u32, height: u32) {
    with_app(|m| {
        if let Ok(mut m) = m.try_borrow_mut() {
            m.resize(width, height);
        }
    });
}

#[wasm_bindgen]
pub fn handle_wheel(delta_y: f64) {
    with_app(|m| {
        if let Ok(mut m) = m.try_borrow_mut() {
            m.handle_wheel(delta_y);
        }
    });
}

/// Tear the scene down. Safe to call more than once.
#[wasm_bindgen]
pub fn dispose() {
    if let Some(manager) = APP.with(|app| app.borrow_mut().take()) {
        SceneManager::dispose(&manager);
    }
}

fn with_app(f: impl FnOnce(&Rc<RefCell<SceneManager>>)) {
    if let Some(manager) = APP.with(|app| app.borrow().clone()) {
        f(&manager);
    }
}
