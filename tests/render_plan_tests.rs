// Host-side integration tests for the GPU-independent render inputs: the
// frame plan, mesh data, the character atlas and the fallback noise.

use poster_core::composition::{stage, ColorOp, DepthOp, StageKind, StageTarget, FRAME_PLAN};
use poster_core::geometry::PlaneGeometry;
use poster_core::noise::default_noise;
use poster_core::{AtlasLayout, CharacterAtlas, GlyphPlacement, GlyphRasterizer};

#[test]
fn frame_plan_runs_background_ascii_foreground() {
    let kinds: Vec<StageKind> = FRAME_PLAN.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            StageKind::BackgroundScene,
            StageKind::AsciiComposite,
            StageKind::ForegroundScene
        ]
    );
    assert_eq!(FRAME_PLAN[0].target, StageTarget::Offscreen);
    assert_eq!(FRAME_PLAN[1].target, StageTarget::Canvas);
}

#[test]
fn foreground_keeps_color_but_clears_depth() {
    let fg = stage(StageKind::ForegroundScene).unwrap();
    assert_eq!(fg.target, StageTarget::Canvas);
    assert_eq!(fg.color, ColorOp::Load);
    assert_eq!(fg.depth, DepthOp::Clear(1.0));
    assert!(fg.depth_test);

    let bg = stage(StageKind::BackgroundScene).unwrap();
    assert!(matches!(bg.color, ColorOp::Clear(_)));
    assert!(!bg.depth_test);
}

#[test]
fn poster_plane_matches_grid_resolution() {
    let g = PlaneGeometry::new(1.0, std::f32::consts::SQRT_2, 60, 60);
    assert_eq!(g.vertices.len(), 61 * 61);
    assert_eq!(g.indices.len(), 60 * 60 * 6);
    assert!(g.indices.iter().all(|&i| (i as usize) < g.vertices.len()));
}

struct Stamp;

impl GlyphRasterizer for Stamp {
    fn rasterize(
        &mut self,
        layout: &AtlasLayout,
        placements: &[GlyphPlacement],
    ) -> Option<Vec<u8>> {
        let side = layout.canvas_px as usize;
        let mut px = vec![0u8; side * side * 4];
        for p in placements {
            let i = (p.center_y as usize * side + p.center_x as usize) * 4;
            px[i..i + 4].copy_from_slice(&[0, 0, 255, 255]);
        }
        Some(px)
    }
}

struct Truncated;

impl GlyphRasterizer for Truncated {
    fn rasterize(&mut self, _: &AtlasLayout, _: &[GlyphPlacement]) -> Option<Vec<u8>> {
        Some(vec![255; 16])
    }
}

#[test]
fn atlas_build_is_deterministic() {
    let atlas = CharacterAtlas::default();
    let a = atlas.build(Some(&mut Stamp));
    let b = atlas.build(Some(&mut Stamp));
    assert_eq!(a, b);
    assert_eq!((a.width, a.height), (1024, 1024));
    assert_eq!(a.pixel(32, 32), Some([0, 0, 255, 255]));
    assert_eq!(a.pixel(96, 96), Some([0, 0, 255, 255]));
}

#[test]
fn atlas_without_rasterizer_is_blank() {
    let atlas = CharacterAtlas::default();
    for img in [atlas.build(None), atlas.build(Some(&mut Truncated))] {
        assert_eq!((img.width, img.height), (1024, 1024));
        assert!(img.is_valid());
        assert!(img.pixels.iter().all(|&b| b == 0));
    }
}

#[test]
fn fallback_noise_is_stable() {
    let a = default_noise();
    assert_eq!(a, default_noise());
    assert!(a.is_valid());
}
