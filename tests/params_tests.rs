// Host-side integration tests for parameter edits flowing into uniforms.

use poster_core::bindings::PARAM_BINDINGS;
use poster_core::params::PARAM_SPECS;
use poster_core::{
    CharacterAtlas, ParamKey, ParamValue, Params, Rgb8, SceneError, SceneOrchestrator,
};

fn running_scene() -> SceneOrchestrator {
    let mut s = SceneOrchestrator::new(
        800,
        600,
        1.0,
        Params::default(),
        &CharacterAtlas::default(),
        None,
    )
    .unwrap();
    s.start().unwrap();
    s
}

#[test]
fn every_key_has_one_binding_and_one_listener() {
    let s = running_scene();
    assert_eq!(PARAM_BINDINGS.len(), PARAM_SPECS.len());
    for spec in PARAM_SPECS.iter() {
        assert_eq!(
            PARAM_BINDINGS.iter().filter(|b| b.key == spec.key).count(),
            1,
            "{}",
            spec.key.name()
        );
        assert_eq!(s.params().listener_count(spec.key), 1);
    }
}

#[test]
fn color1_edit_touches_only_its_uniform() {
    let mut s = running_scene();
    let before = s.frame_uniforms();
    let stored = s
        .set_param(ParamKey::Color1, ParamValue::Rgb(Rgb8::new(255, 0, 0)))
        .unwrap();
    assert_eq!(stored, ParamValue::Rgb(Rgb8::new(255, 0, 0)));

    let after = s.frame_uniforms();
    assert_eq!(after.background.color1, [1.0, 0.0, 0.0]);
    let mut expected = before.background;
    expected.color1 = [1.0, 0.0, 0.0];
    assert_eq!(after.background, expected);
    assert_eq!(after.ascii, before.ascii);
    assert_eq!(after.foreground, before.foreground);
}

#[test]
fn ascii_colors_route_to_the_post_stage() {
    let mut s = running_scene();
    let before = s.frame_uniforms();
    s.set_param(ParamKey::AsciiBgColor, ParamValue::Rgb(Rgb8::new(0, 0, 0)))
        .unwrap();
    let after = s.frame_uniforms();
    assert_eq!(after.ascii.background_color, [0.0, 0.0, 0.0]);
    assert_eq!(after.ascii.color, before.ascii.color);
    assert_eq!(after.background, before.background);
}

#[test]
fn numeric_edits_are_clamped() {
    let mut s = running_scene();
    let stored = s
        .set_param(ParamKey::Blur, ParamValue::Scalar(4.0))
        .unwrap();
    assert_eq!(stored, ParamValue::Scalar(1.0));
    assert_eq!(s.frame_uniforms().background.blur, 1.0);

    // Range inputs report floats for integer entries.
    let stored = s
        .set_param(ParamKey::FbmOctaves, ParamValue::Scalar(6.6))
        .unwrap();
    assert_eq!(stored, ParamValue::Int(7));
    assert_eq!(s.frame_uniforms().background.fbm_octaves, 7);
}

#[test]
fn mismatched_kinds_are_rejected() {
    let mut s = running_scene();
    let before = s.frame_uniforms();
    let err = s
        .set_param(ParamKey::Color2, ParamValue::Scalar(0.5))
        .unwrap_err();
    assert!(matches!(err, SceneError::ParamKindMismatch { .. }));
    assert_eq!(s.frame_uniforms(), before);
}

#[test]
fn edits_after_dispose_fail() {
    let mut s = running_scene();
    s.dispose();
    assert_eq!(
        s.set_param(ParamKey::Speed, ParamValue::Scalar(1.0)),
        Err(SceneError::Disposed)
    );
}

#[test]
fn hex_colors_parse_and_print() {
    assert_eq!(Rgb8::from_hex("#0011ff").unwrap(), Rgb8::new(0, 17, 255));
    assert_eq!(Rgb8::from_hex("FFFFFF").unwrap(), Rgb8::new(255, 255, 255));
    assert_eq!(Rgb8::new(144, 163, 170).to_hex(), "#90a3aa");
    assert!(Rgb8::from_hex("#12345").is_err());
    assert!(Rgb8::from_hex("#zzzzzz").is_err());
}

#[test]
fn keys_resolve_by_name() {
    for spec in PARAM_SPECS.iter() {
        assert_eq!(ParamKey::from_name(spec.key.name()), Ok(spec.key));
    }
    assert!(matches!(
        ParamKey::from_name("nope"),
        Err(SceneError::UnknownParam(_))
    ));
}
