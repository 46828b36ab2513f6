// Host-side integration tests for the scene orchestrator: lifecycle, scroll
// physics, pixelation and resize. Frames are driven with explicit times.

use poster_core::{CharacterAtlas, Lifecycle, Params, SceneError, SceneOrchestrator};

fn scene(width: u32, height: u32, dpr: f32) -> SceneOrchestrator {
    SceneOrchestrator::new(
        width,
        height,
        dpr,
        Params::default(),
        &CharacterAtlas::default(),
        None,
    )
    .expect("scene builds")
}

fn running_scene() -> SceneOrchestrator {
    let mut s = scene(800, 600, 1.0);
    s.start().unwrap();
    s
}

#[test]
fn zero_sized_surface_is_rejected() {
    let err = SceneOrchestrator::new(
        0,
        600,
        1.0,
        Params::default(),
        &CharacterAtlas::default(),
        None,
    )
    .err();
    assert_eq!(
        err,
        Some(SceneError::InvalidSurface {
            width: 0,
            height: 600
        })
    );
}

#[test]
fn frames_only_tick_while_running() {
    let mut s = scene(800, 600, 1.0);
    assert_eq!(s.lifecycle(), Lifecycle::Constructed);
    assert!(s.tick_at(0.0, 0.0).is_none());

    s.start().unwrap();
    s.start().unwrap();
    assert_eq!(s.lifecycle(), Lifecycle::Running);
    assert!(s.tick_at(16.0, 16.0).is_some());
    assert_eq!(s.frame_count(), 1);

    assert!(s.dispose());
    assert!(!s.dispose());
    assert_eq!(s.lifecycle(), Lifecycle::Disposed);
    assert!(s.tick_at(32.0, 32.0).is_none());
    assert_eq!(s.start(), Err(SceneError::Disposed));
    assert_eq!(s.resize(640, 480, 1.0), Err(SceneError::Disposed));
    assert_eq!(s.frame_count(), 1);
}

#[test]
fn dispose_releases_controls_and_bindings() {
    let mut s = running_scene();
    s.dispose();
    assert!(s.controls().is_disposed());
    assert_eq!(
        s.params().listener_count(poster_core::ParamKey::Color1),
        0
    );
}

#[test]
fn scroll_is_monotonic_toward_target() {
    let mut s = running_scene();
    s.handle_wheel(500.0);
    let mut prev = 0.0;
    for i in 0..100 {
        s.tick_at(i as f64 * 16.0, 0.0);
        let f = s.last_scroll_frame();
        assert!(f.current > prev && f.current <= 500.0);
        assert!(f.delta > 0.0);
        prev = f.current;
    }
}

#[test]
fn scroll_converges_after_wheel() {
    let mut s = running_scene();
    s.handle_wheel(500.0);
    for i in 0..700 {
        s.tick_at(i as f64 * 16.0, 0.0);
    }
    let f = s.last_scroll_frame();
    assert!((f.current - 500.0).abs() < 1e-3, "current = {}", f.current);
    assert!((s.scroll_progress() - f.current / 5000.0).abs() < 1e-12);
    assert!(f.delta.abs() < 1e-4);
}

#[test]
fn scroll_target_accumulates_unbounded() {
    let mut s = running_scene();
    for _ in 0..1000 {
        s.handle_wheel(1.0e4);
    }
    s.handle_wheel(f64::NAN);
    assert_eq!(s.scroll().target, 1.0e7);
}

#[test]
fn pixelation_rests_at_full_resolution() {
    let mut s = running_scene();
    for i in 0..50 {
        let u = s.tick_at(i as f64 * 16.0, 0.0).unwrap();
        assert_eq!(u.foreground.pixel_factor, 1080.0);
    }
}

#[test]
fn sustained_scrolling_coarsens_pixelation() {
    let mut s = running_scene();
    let mut last = 1080.0;
    for i in 0..300 {
        s.handle_wheel(5000.0);
        let u = s.tick_at(i as f64 * 16.0, 0.0).unwrap();
        let pf = u.foreground.pixel_factor;
        assert!((20.0..=1080.0).contains(&pf));
        assert!(pf <= last);
        last = pf;
    }
    assert!((last - 20.0).abs() < 1e-2, "pixel factor = {last}");
}

#[test]
fn frame_writes_time_and_scroll_signals() {
    let mut s = running_scene();
    s.handle_wheel(100.0);
    let u = s.tick_at(2500.0, 1234.0).unwrap();
    assert_eq!(u.background.clock.elapsed, 2500.0);
    assert_eq!(u.background.clock.timestamp, 1234.0);
    assert!((u.background.scroll.current - 2.0).abs() < 1e-5);
    assert!((u.background.scroll.delta - 2.0).abs() < 1e-5);
    assert!((u.ascii.time - 2.5).abs() < 1e-6);
    assert_eq!(u.foreground.time, 2500.0);
}

#[test]
fn resize_is_idempotent() {
    let mut s = running_scene();
    s.resize(1280, 720, 2.0).unwrap();
    let first = s.frame_uniforms();
    let size = s.render_size();
    s.resize(1280, 720, 2.0).unwrap();
    assert_eq!(s.frame_uniforms(), first);
    assert_eq!(s.render_size(), size);
    assert_eq!(size, [2560, 1440]);
}

#[test]
fn resize_updates_every_consumer() {
    let mut s = running_scene();
    s.resize(1000, 500, 1.5).unwrap();
    let u = s.frame_uniforms();
    assert_eq!(u.ascii.resolution, [1000.0, 500.0]);
    assert_eq!(u.target_size, [1500, 750]);
    assert_eq!(u.background.aspect_ratio, 2.0);
    assert_eq!(u.background.viewport.dpr, 1.5);
    assert_eq!(s.camera().aspect, 2.0);

    // Plane spans the frustum slice at the camera distance.
    let half_h = (22.5f32).to_radians().tan();
    let scale = s.background().scale();
    assert!((scale.y - half_h).abs() < 1e-5);
    assert!((scale.x - half_h * 2.0).abs() < 1e-5);
}

#[test]
fn device_pixel_ratio_is_capped() {
    let s = scene(800, 600, 3.0);
    assert_eq!(s.viewport().device_pixel_ratio, 2.0);
    assert_eq!(s.render_size(), [1600, 1200]);
    let s = scene(800, 600, f32::NAN);
    assert_eq!(s.render_size(), [800, 600]);
}

#[test]
fn zero_sized_resize_keeps_previous_viewport() {
    let mut s = running_scene();
    let before = s.viewport();
    assert!(s.resize(0, 0, 1.0).is_err());
    assert_eq!(s.viewport(), before);
}

#[test]
fn camera_stays_fixed_while_controls_are_locked() {
    let mut s = running_scene();
    let eye = s.camera().eye;
    for i in 0..10 {
        s.tick_at(i as f64 * 16.0, 0.0);
    }
    assert!(s.camera().eye.distance(eye) < 1e-5);
    assert!((s.camera().distance() - 1.0).abs() < 1e-5);
}
