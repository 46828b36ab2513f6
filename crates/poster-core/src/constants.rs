// Shared scene tuning constants used by the core and the web front-end.

// Scroll physics
pub const SCROLL_EASE: f64 = 0.02; // fraction of the remaining distance covered per frame
pub const SCROLL_PROGRESS_DIVISOR: f64 = 5000.0; // scroll units per unit of progress

// Foreground pixelation
pub const PIXEL_FACTOR_MAX: f32 = 1080.0; // resting grid resolution (finest detail)
pub const PIXEL_FACTOR_MIN: f32 = 20.0; // grid resolution at full scroll velocity
pub const PIXEL_RELAX_RATE: f32 = 0.05; // per displayed frame, not per second
pub const PIXEL_DELTA_GAIN: f32 = 0.2; // scroll delta scale before normalisation
pub const PIXEL_DELTA_MAX: f32 = 15.0; // scaled delta that maps to full velocity
pub const PIXEL_MIX_EXPONENT: f32 = 0.3; // response curve applied to the normalised delta
pub const PIXEL_GRID_ASPECT: f32 = std::f32::consts::SQRT_2; // poster height / width

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 1.0; // fixed viewing distance to the background plane
pub const CONTROLS_DAMPING: f32 = 0.05;
pub const CONTROLS_MIN_DISTANCE: f32 = 1.0;
pub const CONTROLS_MAX_DISTANCE: f32 = 50.0;

// Viewport
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Meshes
pub const BACKGROUND_PLANE_SIZE: f32 = 2.0; // scaled to the frustum on resize
pub const FOREGROUND_SEGMENTS: u32 = 60;
pub const FOREGROUND_SCALE: f32 = 0.4;

// Lights shared by both scenes
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 5.0, 5.0];

// Background scene clear color (opaque white)
pub const BACKGROUND_CLEAR: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

// Character atlas
pub const ATLAS_FONT_SIZE_PX: u32 = 54;
pub const ATLAS_GLYPHS_PER_ROW: u32 = 16;
pub const ATLAS_CELL_PX: u32 = 64;
pub const ATLAS_CANVAS_PX: u32 = 1024;
pub const ATLAS_CELL_SIZE: f32 = 10.72; // metadata consumed by the ASCII pass
pub const ATLAS_GLYPH_RAMP: &str = r#"              @#W$9876543210?!abc;:+=-,._kbdpqwmZO0QLCJUYXzcvunxrjft/\|()1{}[]?-_+~<>i!lI;:,"^'"#;

// Procedural noise fallback
pub const NOISE_TEXTURE_PX: u32 = 256;
pub const NOISE_LATTICE: u32 = 16; // lattice cells per side, must divide the texture size
pub const NOISE_SEED: u64 = 42;

// Diagnostics overlay
pub const STATS_SAMPLES_LOG: usize = 40;
pub const STATS_LOGS_PER_SECOND: f64 = 4.0;

// Asset paths served next to the wasm bundle
pub const NOISE_TEXTURE_PATH: &str = "/assets/perlin.png";
pub const POSTER_TEXTURE_PATH: &str = "/assets/images/mockPoster1.webp";
pub const ENVIRONMENT_FACE_PATHS: [&str; 6] = [
    "/assets/images/environement/px.webp",
    "/assets/images/environement/nx.webp",
    "/assets/images/environement/py.webp",
    "/assets/images/environement/ny.webp",
    "/assets/images/environement/pz.webp",
    "/assets/images/environement/nz.webp",
];
