use poster_core::background::BackgroundSurface;
use poster_core::uniforms::TransformUniforms;
use poster_core::{FrameUniforms, RgbaImage, BACKGROUND_WGSL};

use super::helpers::{self, MeshBuffers};
use super::targets::SCENE_FORMAT;

/// GPU side of the background plane: noise texture, uniforms and mesh.
pub(crate) struct BackgroundPass {
    pipeline: wgpu::RenderPipeline,
    transform_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    noise_tex: wgpu::Texture,
    mesh: MeshBuffers,
}

impl BackgroundPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &BackgroundSurface,
        noise: &RgbaImage,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_wgsl"),
            source: wgpu::ShaderSource::Wgsl(BACKGROUND_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
                helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
                helpers::texture_entry(2, wgpu::TextureViewDimension::D2),
                helpers::sampler_entry(3),
            ],
        });
        let transform_buffer = helpers::create_uniform_buffer(
            device,
            "background_transform",
            &TransformUniforms::new(
                glam::Mat4::IDENTITY,
                surface.model_matrix(),
                glam::Vec3::ZERO,
            ),
        );
        let uniform_buffer =
            helpers::create_uniform_buffer(device, "background_uniforms", &surface.uniforms());
        let (noise_tex, noise_view) = helpers::upload_rgba(device, queue, "noise_tex", noise);
        let noise_sampler = helpers::sampler(
            device,
            "noise_sampler",
            wgpu::AddressMode::Repeat,
            wgpu::FilterMode::Linear,
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background_bg"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: transform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&noise_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&noise_sampler),
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_background"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_mesh_pipeline(
            device,
            "background_pipeline",
            &layout,
            &shader,
            SCENE_FORMAT,
            Some(wgpu::BlendState::REPLACE),
            false,
        );

        Self {
            pipeline,
            transform_buffer,
            uniform_buffer,
            bind_group,
            noise_tex,
            mesh: MeshBuffers::new(device, "background", surface.geometry()),
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, frame: &FrameUniforms) {
        queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::bytes_of(&frame.background_transform),
        );
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.background));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(rpass);
    }

    pub(crate) fn destroy(&self) {
        self.transform_buffer.destroy();
        self.uniform_buffer.destroy();
        self.noise_tex.destroy();
        self.mesh.destroy();
    }
}
