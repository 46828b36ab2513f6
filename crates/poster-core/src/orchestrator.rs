//! Per-frame driver for the poster scene.
//!
//! `SceneOrchestrator` owns the camera, scroll physics and the three render
//! components, and advances them in a fixed order on every tick. It produces
//! a [`FrameUniforms`] snapshot for the renderer; it never touches the GPU.

use crate::atlas::{CharacterAtlas, GlyphRasterizer};
use crate::background::BackgroundSurface;
use crate::bindings;
use crate::camera::{Camera, CameraControls};
use crate::clock::FrameClock;
use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use crate::error::SceneError;
use crate::foreground::ForegroundStack;
use crate::params::{ParamKey, ParamValue, ParameterStore, Params};
use crate::post::PostProcessStage;
use crate::scroll::{ScrollFrame, ScrollState};
use crate::uniforms::{FrameUniforms, LightUniforms, TransformUniforms};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Running,
    Disposed,
}

/// Host viewport in CSS pixels plus the capped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidSurface { width, height });
        }
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_DEVICE_PIXEL_RATIO as f32)
        } else {
            1.0
        };
        Ok(Self {
            width,
            height,
            device_pixel_ratio: dpr,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> [u32; 2] {
        [
            ((self.width as f32 * self.device_pixel_ratio).round() as u32).max(1),
            ((self.height as f32 * self.device_pixel_ratio).round() as u32).max(1),
        ]
    }
}

pub struct SceneOrchestrator {
    lifecycle: Lifecycle,
    params: ParameterStore,
    camera: Camera,
    controls: CameraControls,
    clock: FrameClock,
    scroll: ScrollState,
    last_frame: ScrollFrame,
    background: BackgroundSurface,
    foreground: ForegroundStack,
    post: PostProcessStage,
    lights: LightUniforms,
    viewport: Viewport,
    frame_count: u64,
}

impl SceneOrchestrator {
    /// Build every component, wire the parameter bindings and apply the
    /// initial viewport. Fails when the drawable surface has no area.
    pub fn new(
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
        params: Params,
        atlas: &CharacterAtlas,
        rasterizer: Option<&mut dyn GlyphRasterizer>,
    ) -> Result<Self, SceneError> {
        let viewport = Viewport::new(width, height, device_pixel_ratio)?;
        let mut store = ParameterStore::new(params);
        let background = BackgroundSurface::new(store.values());
        let post = PostProcessStage::new(store.values(), atlas, rasterizer);
        bindings::subscribe_all(
            &mut store,
            background.uniforms_handle(),
            post.uniforms_handle(),
        );

        let mut orchestrator = Self {
            lifecycle: Lifecycle::Constructed,
            params: store,
            camera: Camera::new(viewport.aspect()),
            controls: CameraControls::default(),
            clock: FrameClock::new(),
            scroll: ScrollState::default(),
            last_frame: ScrollFrame::default(),
            background,
            foreground: ForegroundStack::new(),
            post,
            lights: LightUniforms::default(),
            viewport,
            frame_count: 0,
        };
        orchestrator.apply_viewport(viewport);
        log::info!(
            "[scene] constructed {}x{} @{}x, {} glyphs",
            width,
            height,
            viewport.device_pixel_ratio,
            atlas.glyph_count()
        );
        Ok(orchestrator)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Enter `Running`. Starting twice is a no-op; a disposed scene cannot restart.
    pub fn start(&mut self) -> Result<(), SceneError> {
        match self.lifecycle {
            Lifecycle::Disposed => Err(SceneError::Disposed),
            Lifecycle::Running => Ok(()),
            Lifecycle::Constructed => {
                self.lifecycle = Lifecycle::Running;
                self.clock = FrameClock::new();
                log::info!("[scene] frame loop started");
                Ok(())
            }
        }
    }

    /// Accumulate a raw wheel delta into the scroll target.
    pub fn handle_wheel(&mut self, delta_y: f64) {
        if self.lifecycle != Lifecycle::Disposed {
            self.scroll.handle_wheel(delta_y);
        }
    }

    /// Advance one frame using the wall clock.
    pub fn tick(&mut self) -> Option<FrameUniforms> {
        let elapsed = self.clock.elapsed_ms();
        let timestamp = self.clock.timestamp_ms();
        self.tick_at(elapsed, timestamp)
    }

    /// Advance one frame at an explicit time. Returns `None` unless running.
    pub fn tick_at(&mut self, elapsed_ms: f64, timestamp_ms: f64) -> Option<FrameUniforms> {
        if self.lifecycle != Lifecycle::Running {
            return None;
        }
        self.controls.update(&mut self.camera);

        let frame = self.scroll.step();
        self.last_frame = frame;

        self.background.update_time(elapsed_ms, timestamp_ms);
        self.background.update_scroll(frame.current, frame.delta);
        self.post.update_time(elapsed_ms);
        self.foreground.update(elapsed_ms, frame.progress, frame.delta);

        self.frame_count += 1;
        Some(self.frame_uniforms())
    }

    /// Apply a new host viewport size. Ignored once disposed.
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
    ) -> Result<(), SceneError> {
        if self.lifecycle == Lifecycle::Disposed {
            return Err(SceneError::Disposed);
        }
        let viewport = Viewport::new(width, height, device_pixel_ratio)?;
        self.apply_viewport(viewport);
        log::info!(
            "[scene] resize {}x{} @{}x",
            width,
            height,
            viewport.device_pixel_ratio
        );
        Ok(())
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (w, h, dpr) = (
            viewport.width as f32,
            viewport.height as f32,
            viewport.device_pixel_ratio,
        );
        self.post.resize(w, h, dpr);
        self.camera.aspect = viewport.aspect();
        self.background.resize(w, h, dpr);
        let frustum = self.camera.frustum_size_at(self.camera.eye.z);
        self.background.set_scale_from_frustum(frustum.x, frustum.y);
    }

    /// Release everything. Returns `true` only for the call that disposed.
    pub fn dispose(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Disposed {
            return false;
        }
        self.lifecycle = Lifecycle::Disposed;
        self.controls.dispose();
        self.params.clear_listeners();
        log::info!("[scene] disposed after {} frames", self.frame_count);
        true
    }

    /// Forward a debug-panel edit to the parameter store.
    pub fn set_param(
        &mut self,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<ParamValue, SceneError> {
        if self.lifecycle == Lifecycle::Disposed {
            return Err(SceneError::Disposed);
        }
        self.params.set(key, value)
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn frame_uniforms(&self) -> FrameUniforms {
        let view_proj = self.camera.view_projection();
        FrameUniforms {
            background_transform: TransformUniforms::new(
                view_proj,
                self.background.model_matrix(),
                self.camera.eye,
            ),
            background: self.background.uniforms(),
            foreground_transform: TransformUniforms::new(
                view_proj,
                self.foreground.model_matrix(),
                self.camera.eye,
            ),
            foreground: self.foreground.uniforms(),
            lights: self.lights,
            ascii: self.post.uniforms(),
            target_size: self.post.target_size(),
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn last_scroll_frame(&self) -> ScrollFrame {
        self.last_frame
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &CameraControls {
        &self.controls
    }

    pub fn background(&self) -> &BackgroundSurface {
        &self.background
    }

    pub fn foreground(&self) -> &ForegroundStack {
        &self.foreground
    }

    pub fn post(&self) -> &PostProcessStage {
        &self.post
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Canvas backing-store size the renderer should be configured with.
    pub fn render_size(&self) -> [u32; 2] {
        self.viewport.physical_size()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
