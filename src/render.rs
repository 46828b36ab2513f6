use poster_core::composition::{ColorOp, DepthOp, StageKind, StageTarget, FRAME_PLAN};
use poster_core::{FrameUniforms, SceneOrchestrator};
use web_sys as web;

use crate::assets::SceneAssets;

mod background;
mod foreground;
mod helpers;
mod post;
mod targets;

use background::BackgroundPass;
use foreground::ForegroundPass;
use post::AsciiPass;
use targets::RenderTargets;

/// Every WebGPU resource of the scene. Frames are drawn by walking the
/// declared composition plan; no pass decides its own clear behaviour.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    background: BackgroundPass,
    foreground: ForegroundPass,
    ascii: AsciiPass,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &SceneOrchestrator,
        assets: &SceneAssets,
    ) -> anyhow::Result<Self> {
        let [width, height] = scene.render_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // Shaders write display values directly, so prefer a non-sRGB swapchain.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let background = BackgroundPass::new(&device, &queue, scene.background(), &assets.noise);
        let foreground = ForegroundPass::new(
            &device,
            &queue,
            scene.foreground(),
            &assets.poster,
            &assets.environment,
            format,
        );
        let ascii = AsciiPass::new(&device, &queue, scene.post(), &targets.scene_view, format);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            background,
            foreground,
            ascii,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.ascii.rebuild_bind_group(&self.device, &self.targets.scene_view);
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &FrameUniforms) -> Result<(), wgpu::SurfaceError> {
        self.background.write(&self.queue, frame);
        self.ascii.write(&self.queue, frame);
        self.foreground.write(&self.queue, frame);

        let output = self.surface.get_current_texture()?;
        let canvas_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        for stage in FRAME_PLAN.iter() {
            let target = match stage.target {
                StageTarget::Offscreen => &self.targets.scene_view,
                StageTarget::Canvas => &canvas_view,
            };
            let load = match stage.color {
                ColorOp::Clear([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                ColorOp::Load => wgpu::LoadOp::Load,
            };
            let depth_stencil_attachment = match stage.depth {
                DepthOp::None => None,
                DepthOp::Clear(depth) => Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(stage_label(stage.kind)),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            match stage.kind {
                StageKind::BackgroundScene => self.background.draw(&mut rpass),
                StageKind::AsciiComposite => self.ascii.draw(&mut rpass),
                StageKind::ForegroundScene => self.foreground.draw(&mut rpass),
            }
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Release every buffer and texture this state allocated.
    pub fn dispose(self) {
        self.background.destroy();
        self.foreground.destroy();
        self.ascii.destroy();
        self.targets.destroy();
        log::info!("[gpu] resources released");
    }
}

fn stage_label(kind: StageKind) -> &'static str {
    match kind {
        StageKind::BackgroundScene => "background_scene",
        StageKind::AsciiComposite => "ascii_composite",
        StageKind::ForegroundScene => "foreground_scene",
    }
}
