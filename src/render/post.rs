use poster_core::post::PostProcessStage;
use poster_core::{FrameUniforms, ASCII_WGSL};

use super::helpers;

/// ASCII composite: samples the offscreen scene target plus the glyph atlas.
///
/// The bind group references the scene view, so it is rebuilt whenever the
/// targets are recreated.
pub(crate) struct AsciiPass {
    bgl: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    atlas_tex: wgpu::Texture,
    atlas_view: wgpu::TextureView,
    scene_sampler: wgpu::Sampler,
    atlas_sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
}

impl AsciiPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        stage: &PostProcessStage,
        scene_view: &wgpu::TextureView,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ascii_wgsl"),
            source: wgpu::ShaderSource::Wgsl(ASCII_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ascii_bgl"),
            entries: &[
                helpers::texture_entry(0, wgpu::TextureViewDimension::D2),
                helpers::sampler_entry(1),
                helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
                helpers::texture_entry(3, wgpu::TextureViewDimension::D2),
                helpers::sampler_entry(4),
            ],
        });
        let uniform_buffer =
            helpers::create_uniform_buffer(device, "ascii_uniforms", &stage.uniforms());
        let (atlas_tex, atlas_view) =
            helpers::upload_rgba(device, queue, "ascii_atlas", stage.atlas_image());
        let scene_sampler = helpers::sampler(
            device,
            "scene_sampler",
            wgpu::AddressMode::ClampToEdge,
            wgpu::FilterMode::Linear,
        );
        let atlas_sampler = helpers::sampler(
            device,
            "atlas_sampler",
            wgpu::AddressMode::ClampToEdge,
            wgpu::FilterMode::Nearest,
        );
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_ascii"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_post_pipeline(
            device,
            &layout,
            &shader,
            "fs_ascii",
            color_format,
            Some(wgpu::BlendState::REPLACE),
        );
        let bind_group = create_bind_group(
            device,
            &bgl,
            scene_view,
            &scene_sampler,
            &uniform_buffer,
            &atlas_view,
            &atlas_sampler,
        );

        Self {
            bgl,
            pipeline,
            uniform_buffer,
            atlas_tex,
            atlas_view,
            scene_sampler,
            atlas_sampler,
            bind_group,
        }
    }

    pub(crate) fn rebuild_bind_group(
        &mut self,
        device: &wgpu::Device,
        scene_view: &wgpu::TextureView,
    ) {
        self.bind_group = create_bind_group(
            device,
            &self.bgl,
            scene_view,
            &self.scene_sampler,
            &self.uniform_buffer,
            &self.atlas_view,
            &self.atlas_sampler,
        );
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, frame: &FrameUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.ascii));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.atlas_tex.destroy();
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    scene_view: &wgpu::TextureView,
    scene_sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
    atlas_view: &wgpu::TextureView,
    atlas_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("ascii_bg"),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(scene_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(scene_sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(atlas_view),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::Sampler(atlas_sampler),
            },
        ],
    })
}
