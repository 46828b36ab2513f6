use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use poster_core::{CharacterAtlas, ParamKey, ParamValue, Params, SceneOrchestrator};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::assets::{Canvas2dRasterizer, SceneAssets};
use crate::dom::{self, js_err};
use crate::events::WindowListeners;
use crate::overlay::StatsOverlay;
use crate::panel::{DebugPanel, ParamSink};
use crate::render::GpuState;

/// Browser host for one scene: canvas, GPU state, DOM widgets and the
/// animation-frame loop around a [`SceneOrchestrator`].
pub struct SceneManager {
    canvas: web::HtmlCanvasElement,
    scene: SceneOrchestrator,
    gpu: Option<GpuState>,
    stats: Option<StatsOverlay>,
    panel: Option<DebugPanel>,
    listeners: Option<WindowListeners>,
    frame_loop: Option<FrameLoop>,
}

impl SceneManager {
    /// Build the scene against `canvas` and wire listeners. No frames are
    /// scheduled until [`SceneManager::start`].
    pub async fn create(canvas: web::HtmlCanvasElement) -> anyhow::Result<Rc<RefCell<Self>>> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let (width, height) =
            dom::viewport_size().ok_or_else(|| anyhow::anyhow!("viewport size unavailable"))?;

        let atlas = CharacterAtlas::default();
        let mut rasterizer = Canvas2dRasterizer::new(document.clone());
        let scene = SceneOrchestrator::new(
            width,
            height,
            dom::device_pixel_ratio(),
            Params::default(),
            &atlas,
            Some(&mut rasterizer),
        )?;
        dom::sync_canvas_backing_size(&canvas, scene.render_size());

        let assets = SceneAssets::load(&document).await;
        let gpu = GpuState::new(&canvas, &scene, &assets).await?;
        let stats = StatsOverlay::new(&document)?;

        let manager = Rc::new(RefCell::new(Self {
            canvas,
            scene,
            gpu: Some(gpu),
            stats: Some(stats),
            panel: None,
            listeners: None,
            frame_loop: None,
        }));

        let sink_target = Rc::downgrade(&manager);
        let sink: ParamSink = Rc::new(move |key, value| {
            let manager = sink_target.upgrade()?;
            let mut m = manager.try_borrow_mut().ok()?;
            m.set_param(key, value)
        });
        let panel = DebugPanel::new(&document, manager.borrow().scene.params().values(), sink)?;
        let listeners = WindowListeners::attach(Rc::downgrade(&manager))?;
        {
            let mut m = manager.borrow_mut();
            m.panel = Some(panel);
            m.listeners = Some(listeners);
        }
        Ok(manager)
    }

    /// Enter the running state and schedule the first frame.
    pub fn start(manager: &Rc<RefCell<Self>>) -> anyhow::Result<()> {
        let mut m = manager
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("scene busy"))?;
        m.scene.start()?;
        if m.frame_loop.is_none() {
            m.frame_loop = Some(FrameLoop::start(Rc::downgrade(manager))?);
        }
        Ok(())
    }

    /// Advance and draw one frame. Returns `false` once the scene stops running.
    pub fn frame(&mut self) -> bool {
        let Some(uniforms) = self.scene.tick() else {
            return false;
        };
        if let Some(gpu) = self.gpu.as_mut() {
            let [w, h] = self.scene.render_size();
            dom::sync_canvas_backing_size(&self.canvas, [w, h]);
            gpu.resize_if_needed(w, h);
            match gpu.render(&uniforms) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::error!("[frame] render error: {:?}", e),
            }
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.record(instant::now());
        }
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(e) = self.scene.resize(width, height, dom::device_pixel_ratio()) {
            log::warn!("[frame] resize to {}x{} ignored: {}", width, height, e);
            return;
        }
        let size = self.scene.render_size();
        dom::sync_canvas_backing_size(&self.canvas, size);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(size[0], size[1]);
        }
    }

    pub fn handle_wheel(&mut self, delta_y: f64) {
        self.scene.handle_wheel(delta_y);
    }

    pub fn set_param(&mut self, key: ParamKey, value: ParamValue) -> Option<ParamValue> {
        match self.scene.set_param(key, value) {
            Ok(stored) => Some(stored),
            Err(e) => {
                log::warn!("[frame] {} rejected: {}", key.name(), e);
                None
            }
        }
    }

    /// Stop the loop, detach listeners and release GPU and DOM resources.
    /// Only the first call does anything.
    pub fn dispose(manager: &Rc<RefCell<Self>>) -> bool {
        let Ok(mut m) = manager.try_borrow_mut() else {
            log::warn!("[frame] dispose while a frame is in flight; skipped");
            return false;
        };
        if !m.scene.dispose() {
            return false;
        }
        if let Some(frame_loop) = m.frame_loop.take() {
            frame_loop.cancel();
        }
        if let Some(listeners) = m.listeners.take() {
            listeners.detach();
        }
        if let Some(panel) = m.panel.take() {
            panel.remove();
        }
        if let Some(stats) = m.stats.take() {
            stats.remove();
        }
        if let Some(gpu) = m.gpu.take() {
            gpu.dispose();
        }
        true
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` chain. The callback re-schedules itself while the
/// scene is running; `cancel` drops the pending request and the closure.
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start(manager: Weak<RefCell<SceneManager>>) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let handle_tick = handle.clone();
        let callback_tick = callback.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_tick.set(None);
            let Some(manager) = manager.upgrade() else {
                return;
            };
            let running = match manager.try_borrow_mut() {
                Ok(mut m) => m.frame(),
                Err(_) => true,
            };
            if !running {
                return;
            }
            if let (Some(w), Some(cb)) = (web::window(), callback_tick.borrow().as_ref()) {
                match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle_tick.set(Some(id)),
                    Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
                }
            }
        }) as Box<dyn FnMut()>));

        let id = {
            let cb = callback.borrow();
            let cb = cb
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("frame callback missing"))?;
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(js_err)?
        };
        handle.set(Some(id));
        Ok(Self { handle, callback })
    }

    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.handle.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}
