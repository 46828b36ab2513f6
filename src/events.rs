use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, js_err};
use crate::frame::SceneManager;

/// Window-level wheel and resize listeners. They hold only a weak handle to
/// the manager, so a disposed scene is not kept alive by the page.
pub struct WindowListeners {
    window: web::Window,
    wheel: Closure<dyn FnMut(web::WheelEvent)>,
    resize: Closure<dyn FnMut()>,
}

impl WindowListeners {
    pub fn attach(manager: Weak<RefCell<SceneManager>>) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

        let wheel_target = manager.clone();
        let wheel = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let Some(manager) = wheel_target.upgrade() else {
                return;
            };
            if let Ok(mut m) = manager.try_borrow_mut() {
                m.handle_wheel(ev.delta_y());
            }
        }) as Box<dyn FnMut(web::WheelEvent)>);
        window
            .add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())
            .map_err(js_err)?;

        let resize = Closure::wrap(Box::new(move || {
            let (Some(manager), Some((w, h))) = (manager.upgrade(), dom::viewport_size()) else {
                return;
            };
            if let Ok(mut m) = manager.try_borrow_mut() {
                m.resize(w, h);
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(js_err)?;

        Ok(Self {
            window,
            wheel,
            resize,
        })
    }

    pub fn detach(self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("wheel", self.wheel.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}
