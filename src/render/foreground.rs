use poster_core::composition::{self, StageKind};
use poster_core::foreground::ForegroundStack;
use poster_core::uniforms::{LightUniforms, TransformUniforms};
use poster_core::{FrameUniforms, RgbaImage, FOREGROUND_WGSL};

use super::helpers::{self, MeshBuffers};

/// GPU side of the poster mesh. Shares the environment cube with nothing
/// else; the background shader is unlit.
pub(crate) struct ForegroundPass {
    pipeline: wgpu::RenderPipeline,
    transform_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    poster_tex: wgpu::Texture,
    env_tex: wgpu::Texture,
    mesh: MeshBuffers,
}

impl ForegroundPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        stack: &ForegroundStack,
        poster: &RgbaImage,
        environment: &[RgbaImage; 6],
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("foreground_wgsl"),
            source: wgpu::ShaderSource::Wgsl(FOREGROUND_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("foreground_bgl"),
            entries: &[
                helpers::uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                helpers::uniform_entry(
                    1,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
                helpers::texture_entry(3, wgpu::TextureViewDimension::D2),
                helpers::sampler_entry(4),
                helpers::texture_entry(5, wgpu::TextureViewDimension::Cube),
                helpers::sampler_entry(6),
            ],
        });

        let transform_buffer = helpers::create_uniform_buffer(
            device,
            "foreground_transform",
            &TransformUniforms::new(glam::Mat4::IDENTITY, stack.model_matrix(), glam::Vec3::ZERO),
        );
        let uniform_buffer =
            helpers::create_uniform_buffer(device, "foreground_uniforms", &stack.uniforms());
        let light_buffer =
            helpers::create_uniform_buffer(device, "scene_lights", &LightUniforms::default());

        let (poster_tex, poster_view) = helpers::upload_rgba(device, queue, "poster_tex", poster);
        let poster_sampler = helpers::sampler(
            device,
            "poster_sampler",
            wgpu::AddressMode::ClampToEdge,
            wgpu::FilterMode::Nearest,
        );
        let (env_tex, env_view) = helpers::upload_cube(device, queue, environment);
        let env_sampler = helpers::sampler(
            device,
            "env_sampler",
            wgpu::AddressMode::ClampToEdge,
            wgpu::FilterMode::Linear,
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("foreground_bg"),
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
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&poster_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&poster_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(&env_view),
                },
                wgpu::BindGroupEntry {
                    binding: 6,
                    resource: wgpu::BindingResource::Sampler(&env_sampler),
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_foreground"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let depth_test = composition::stage(StageKind::ForegroundScene)
            .map(|s| s.depth_test)
            .unwrap_or(true);
        let pipeline = helpers::make_mesh_pipeline(
            device,
            "foreground_pipeline",
            &layout,
            &shader,
            color_format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            depth_test,
        );

        Self {
            pipeline,
            transform_buffer,
            uniform_buffer,
            light_buffer,
            bind_group,
            poster_tex,
            env_tex,
            mesh: MeshBuffers::new(device, "foreground", stack.geometry()),
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, frame: &FrameUniforms) {
        queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::bytes_of(&frame.foreground_transform),
        );
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.foreground));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&frame.lights));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(rpass);
    }

    pub(crate) fn destroy(&self) {
        self.transform_buffer.destroy();
        self.uniform_buffer.destroy();
        self.light_buffer.destroy();
        self.poster_tex.destroy();
        self.env_tex.destroy();
        self.mesh.destroy();
    }
}
