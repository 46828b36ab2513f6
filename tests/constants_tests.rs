// Host-side tests for constants and their relationships.
// The web crate is wasm-only, so its DOM constants are included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use poster_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn pixelation_range_is_ordered() {
    assert!(PIXEL_FACTOR_MIN > 0.0);
    assert!(PIXEL_FACTOR_MIN < PIXEL_FACTOR_MAX);
    assert!(PIXEL_RELAX_RATE > 0.0 && PIXEL_RELAX_RATE < 1.0);
    assert!(PIXEL_DELTA_MAX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scroll_easing_is_a_fraction() {
    assert!(SCROLL_EASE > 0.0 && SCROLL_EASE <= 1.0);
    assert!(SCROLL_PROGRESS_DIVISOR > 0.0);
}

#[test]
fn atlas_grid_covers_canvas() {
    assert_eq!(ATLAS_GLYPHS_PER_ROW * ATLAS_CELL_PX, ATLAS_CANVAS_PX);
    let rows = (ATLAS_GLYPH_RAMP.chars().count() as u32).div_ceil(ATLAS_GLYPHS_PER_ROW);
    assert!(rows * ATLAS_CELL_PX <= ATLAS_CANVAS_PX);
    assert!(ATLAS_FONT_SIZE_PX < ATLAS_CELL_PX);
}

#[test]
fn noise_lattice_divides_texture() {
    assert_eq!(NOISE_TEXTURE_PX % NOISE_LATTICE, 0);
    // Channels use up to 4x the base lattice.
    assert_eq!(NOISE_TEXTURE_PX % (NOISE_LATTICE << 2), 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_planes_bracket_the_scene() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_Z);
    assert!(CAMERA_FAR > CAMERA_Z);
    assert!(CONTROLS_MIN_DISTANCE <= CAMERA_Z && CAMERA_Z <= CONTROLS_MAX_DISTANCE);
}

#[test]
fn dom_ids_are_distinct() {
    assert_ne!(CANVAS_ID, PANEL_ID);
    assert_ne!(PANEL_ID, STATS_ID);
    assert_eq!(CANVAS_ID, "app-canvas");
}

#[test]
fn environment_has_six_faces() {
    assert_eq!(ENVIRONMENT_FACE_PATHS.len(), 6);
    for path in ENVIRONMENT_FACE_PATHS {
        assert!(path.starts_with("/assets/"));
    }
}
