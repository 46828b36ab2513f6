//! GPU uniform blocks.
//!
//! Every block is `#[repr(C)]` + `Pod` and laid out to match the WGSL structs
//! in `shaders/` under uniform address-space rules (vec3 and nested structs
//! aligned to 16 bytes). Each render component owns one block exclusively;
//! the shape never changes after construction, only the values.

use glam::Mat4;

use crate::params::Params;

/// `{ size, dpr, ratio }` as seen by the background fragment stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    pub dpr: f32,
    pub ratio: f32,
}

/// `{ elapsed, timestamp }`: milliseconds since start and the high-resolution
/// monotonic clock reading of the same frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ClockUniform {
    pub elapsed: f32,
    pub timestamp: f32,
    pub _pad: [f32; 2],
}

/// `{ current, delta }` of the eased scroll position.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScrollUniform {
    pub current: f32,
    pub delta: f32,
    pub _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniforms {
    pub color1: [f32; 3],
    pub _pad0: f32,
    pub color2: [f32; 3],
    pub _pad1: f32,
    pub viewport: ViewportUniform,
    pub clock: ClockUniform,
    pub scroll: ScrollUniform,
    pub offset: [f32; 2],
    pub size_perlin: f32,
    pub blur: f32,
    pub threshold_speed: f32,
    pub threshold_value: f32,
    pub scroll_speed: f32,
    pub speed: f32,
    pub fbm_octaves: i32,
    pub fbm_gain: f32,
    pub fbm_lacunarity: f32,
    pub aspect_ratio: f32,
}

impl BackgroundUniforms {
    pub fn from_params(p: &Params, viewport: ViewportUniform) -> Self {
        Self {
            color1: p.color1.to_unit(),
            _pad0: 0.0,
            color2: p.color2.to_unit(),
            _pad1: 0.0,
            viewport,
            clock: ClockUniform::default(),
            scroll: ScrollUniform::default(),
            offset: [p.offset_x, p.offset_y],
            size_perlin: p.size_perlin_value,
            blur: p.blur,
            threshold_speed: p.threshold_speed,
            threshold_value: p.threshold_value,
            scroll_speed: p.scroll_speed,
            speed: p.speed,
            fbm_octaves: p.fbm_octaves,
            fbm_gain: p.fbm_gain,
            fbm_lacunarity: p.fbm_lacunarity,
            aspect_ratio: viewport.ratio,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ForegroundUniforms {
    pub time: f32,
    pub scroll_progress: f32,
    pub scroll_delta: f32,
    pub pixel_factor: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AsciiUniforms {
    pub color: [f32; 3],
    pub _pad0: f32,
    pub background_color: [f32; 3],
    pub _pad1: f32,
    pub resolution: [f32; 2],
    pub time: f32,
    pub cell_size: f32,
    pub characters_count: f32,
    pub _pad2: [f32; 3],
}

impl AsciiUniforms {
    pub fn new(p: &Params, resolution: [f32; 2], cell_size: f32, characters_count: u32) -> Self {
        Self {
            color: p.ascii_color.to_unit(),
            _pad0: 0.0,
            background_color: p.ascii_bg_color.to_unit(),
            _pad1: 0.0,
            resolution,
            time: 0.0,
            cell_size,
            characters_count: characters_count as f32,
            _pad2: [0.0; 3],
        }
    }
}

/// Camera and model transform for one mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

impl TransformUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, camera_pos: glam::Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
        }
    }
}

/// Light rig shared by both scenes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniforms {
    pub direction: [f32; 3],
    pub directional: f32,
    pub color: [f32; 3],
    pub ambient: f32,
}

impl Default for LightUniforms {
    fn default() -> Self {
        let dir = glam::Vec3::from(crate::constants::DIRECTIONAL_POSITION).normalize();
        Self {
            direction: dir.to_array(),
            directional: crate::constants::DIRECTIONAL_INTENSITY,
            color: [1.0, 1.0, 1.0],
            ambient: crate::constants::AMBIENT_INTENSITY,
        }
    }
}

/// Everything the renderer uploads for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameUniforms {
    pub background_transform: TransformUniforms,
    pub background: BackgroundUniforms,
    pub foreground_transform: TransformUniforms,
    pub foreground: ForegroundUniforms,
    pub lights: LightUniforms,
    pub ascii: AsciiUniforms,
    /// Pixel size of the post-process targets.
    pub target_size: [u32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        assert_eq!(std::mem::size_of::<ClockUniform>(), 16);
        assert_eq!(std::mem::size_of::<ScrollUniform>(), 16);
        assert_eq!(std::mem::size_of::<BackgroundUniforms>(), 128);
        assert_eq!(std::mem::size_of::<ForegroundUniforms>(), 16);
        assert_eq!(std::mem::size_of::<AsciiUniforms>(), 64);
        assert_eq!(std::mem::size_of::<TransformUniforms>(), 144);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 32);
    }

    #[test]
    fn background_defaults_convert_colors_to_unit_range() {
        let u = BackgroundUniforms::from_params(&Params::default(), ViewportUniform::default());
        assert!((u.color2[0] - 28.0 / 255.0).abs() < 1e-6);
        assert!((u.color2[2] - 65.0 / 255.0).abs() < 1e-6);
        assert_eq!(u.fbm_octaves, 5);
    }
}
