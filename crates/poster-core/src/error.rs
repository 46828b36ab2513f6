use thiserror::Error;

use crate::params::{ParamKey, ParamKind};

/// Errors surfaced by the core scene state.
///
/// Per-frame paths never produce these; they only guard construction,
/// lifecycle transitions and parameter edits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("drawable surface has no area ({width}x{height})")]
    InvalidSurface { width: u32, height: u32 },

    #[error("parameter `{}` expects a {expected:?} value, got {found:?}", .key.name())]
    ParamKindMismatch {
        key: ParamKey,
        expected: ParamKind,
        found: ParamKind,
    },

    #[error("unknown parameter `{0}`")]
    UnknownParam(String),

    #[error("invalid color literal `{0}`")]
    InvalidColor(String),

    #[error("scene has been disposed")]
    Disposed,
}
