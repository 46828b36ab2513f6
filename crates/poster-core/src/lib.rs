pub mod atlas;
pub mod background;
pub mod bindings;
pub mod camera;
pub mod clock;
pub mod composition;
pub mod constants;
pub mod error;
pub mod foreground;
pub mod geometry;
pub mod image;
pub mod noise;
pub mod orchestrator;
pub mod params;
pub mod pixelation;
pub mod post;
pub mod scroll;
pub mod stats;
pub mod uniforms;

pub static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");
pub static FOREGROUND_WGSL: &str = include_str!("../shaders/foreground.wgsl");
pub static ASCII_WGSL: &str = include_str!("../shaders/ascii.wgsl");

pub use atlas::{AtlasLayout, CharacterAtlas, GlyphPlacement, GlyphRasterizer};
pub use error::SceneError;
pub use image::RgbaImage;
pub use orchestrator::{Lifecycle, SceneOrchestrator, Viewport};
pub use params::{ParamKey, ParamValue, ParameterStore, Params, Rgb8};
pub use uniforms::FrameUniforms;
