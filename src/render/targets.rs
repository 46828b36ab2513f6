use super::helpers;

/// Offscreen targets for one frame.
///
/// - `scene_*` receives the background scene and is sampled by the ASCII pass.
/// - `depth_*` backs the foreground pass on the canvas, so it tracks the
///   surface size.
pub(crate) struct RenderTargets {
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (scene_tex, scene_view) = create_scene_target(device, width, height);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        Self {
            scene_tex,
            scene_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.destroy();
        (self.scene_tex, self.scene_view) = create_scene_target(device, width, height);
        (self.depth_tex, self.depth_view) = helpers::create_depth_texture(device, width, height);
    }

    pub(crate) fn destroy(&self) {
        self.scene_tex.destroy();
        self.depth_tex.destroy();
    }
}

fn create_scene_target(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_color_texture_device(
        device,
        "scene_tex",
        width,
        height,
        SCENE_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}
