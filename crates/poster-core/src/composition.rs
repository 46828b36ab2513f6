//! Declared frame composition.
//!
//! One frame is three passes in fixed order. The background scene is drawn
//! offscreen, the ASCII composite turns it into the canvas image, then the
//! foreground scene is drawn on top with a fresh depth buffer while keeping
//! the composited color.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageKind {
    BackgroundScene,
    AsciiComposite,
    ForegroundScene,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTarget {
    /// Post-process scene target, sampled by the next stage.
    Offscreen,
    Canvas,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorOp {
    Clear([f64; 4]),
    Load,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DepthOp {
    None,
    Clear(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStage {
    pub kind: StageKind,
    pub target: StageTarget,
    pub color: ColorOp,
    pub depth: DepthOp,
    pub depth_test: bool,
}

pub static FRAME_PLAN: [RenderStage; 3] = [
    RenderStage {
        kind: StageKind::BackgroundScene,
        target: StageTarget::Offscreen,
        color: ColorOp::Clear(crate::constants::BACKGROUND_CLEAR),
        depth: DepthOp::None,
        depth_test: false,
    },
    RenderStage {
        kind: StageKind::AsciiComposite,
        target: StageTarget::Canvas,
        color: ColorOp::Clear([0.0, 0.0, 0.0, 0.0]),
        depth: DepthOp::None,
        depth_test: false,
    },
    RenderStage {
        kind: StageKind::ForegroundScene,
        target: StageTarget::Canvas,
        color: ColorOp::Load,
        depth: DepthOp::Clear(1.0),
        depth_test: true,
    },
];

pub fn stage(kind: StageKind) -> Option<&'static RenderStage> {
    FRAME_PLAN.iter().find(|s| s.kind == kind)
}
