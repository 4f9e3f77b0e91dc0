//! Engine error type.
//!
//! Every variant is a programming or configuration defect on the caller's
//! side. Nothing here is transient, so nothing is retried.

use glam::Vec2;
use thiserror::Error;

use crate::render::{TargetId, TextureId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightmapError {
    // ── construction ──────────────────────────────────────────────────────
    #[error("shadow hull needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("circular shadow hull needs at least 3 sides, got {0}")]
    TooFewSides(usize),
    #[error("shadow hull point {index} is not finite: {point}")]
    NonFinitePoint { index: usize, point: Vec2 },
    #[error("light texture of size {size} needs {expected} texels, got {actual}")]
    TextureSizeMismatch {
        size: u32,
        expected: usize,
        actual: usize,
    },

    // ── configuration ─────────────────────────────────────────────────────
    #[error("unknown shadow mode: {0:?}")]
    UnknownShadowMode(String),
    #[error("unknown blend technique: {0:?}")]
    UnknownBlendTechnique(String),
    #[error("unknown cull mode: {0:?}")]
    UnknownCullMode(String),
    #[error("unsupported lightmap resolution scale: {0} (expected 1, 4 or 8)")]
    UnsupportedResolutionScale(String),

    // ── rasterizer resources ──────────────────────────────────────────────
    #[error("render target size must be non-zero, got {width}x{height}")]
    EmptyTarget { width: u32, height: u32 },
    #[error("render target {0:?} does not exist or was disposed")]
    UnknownTarget(TargetId),
    #[error("texture {0:?} does not exist")]
    UnknownTexture(TextureId),
    #[error("lightmap targets are not allocated")]
    TargetsUnavailable,
}

pub type Result<T> = std::result::Result<T, LightmapError>;
