use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use super::rasterizer::{TargetId, TextureId};
use super::vertex::{ConeVertex, HullVertex};
use crate::coords::Color;
use crate::error::LightmapError;
use crate::light::ShadowMode;

/// Named shader programs the rasterizer is expected to provide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Technique {
    ShadowSolid,
    ShadowIlluminated,
    ShadowOccluded,
    Light,
    AlphaClear,
    BlurHorizontal,
    BlurVertical,
    CompositeAdd,
    CompositeMultiply,
    DebugWireframe,
}

impl Technique {
    pub const fn name(self) -> &'static str {
        match self {
            Technique::ShadowSolid => "shadow-solid",
            Technique::ShadowIlluminated => "shadow-illuminated",
            Technique::ShadowOccluded => "shadow-occluded",
            Technique::Light => "light",
            Technique::AlphaClear => "alpha-clear",
            Technique::BlurHorizontal => "blur-horizontal",
            Technique::BlurVertical => "blur-vertical",
            Technique::CompositeAdd => "composite-add",
            Technique::CompositeMultiply => "composite-multiply",
            Technique::DebugWireframe => "debug-wireframe",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the finished lightmap is combined with the destination.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BlendTechnique {
    Add,
    #[default]
    Multiply,
}

impl BlendTechnique {
    pub const fn technique(self) -> Technique {
        match self {
            BlendTechnique::Add => Technique::CompositeAdd,
            BlendTechnique::Multiply => Technique::CompositeMultiply,
        }
    }
}

impl FromStr for BlendTechnique {
    type Err = LightmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "additive" => Ok(BlendTechnique::Add),
            "multiply" | "mul" => Ok(BlendTechnique::Multiply),
            _ => Err(LightmapError::UnknownBlendTechnique(s.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlurAxis {
    Horizontal,
    Vertical,
}

impl BlurAxis {
    pub const fn technique(self) -> Technique {
        match self {
            BlurAxis::Horizontal => Technique::BlurHorizontal,
            BlurAxis::Vertical => Technique::BlurVertical,
        }
    }

    #[inline]
    pub fn direction(self) -> Vec2 {
        match self {
            BlurAxis::Horizontal => Vec2::X,
            BlurAxis::Vertical => Vec2::Y,
        }
    }
}

/// Per-light parameters the shadow and light techniques read.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightUniforms {
    pub position: Vec2,
    pub range: f32,
    pub intensity_factor: f32,
    pub color: Color,
    pub texture: TextureId,
}

/// One technique submission: the technique's parameters plus its geometry.
#[derive(Debug, Copy, Clone)]
pub enum TechniqueDraw<'a> {
    Shadow {
        mode: ShadowMode,
        light: LightUniforms,
        vertices: &'a [HullVertex],
        indices: &'a [u32],
    },
    Light {
        light: LightUniforms,
        vertices: &'a [ConeVertex],
        indices: &'a [u16],
    },
    /// Full-viewport pass that writes alpha = 1 and leaves RGB untouched.
    AlphaClear,
    Blur {
        source: TargetId,
        axis: BlurAxis,
        texel_bias: Vec2,
        intensity: f32,
    },
    Composite {
        source: TargetId,
        blend: BlendTechnique,
        texel_bias: Vec2,
    },
    DebugWireframe {
        vertices: &'a [HullVertex],
        indices: &'a [u32],
    },
}

impl TechniqueDraw<'_> {
    pub fn technique(&self) -> Technique {
        match self {
            TechniqueDraw::Shadow { mode, .. } => mode.technique(),
            TechniqueDraw::Light { .. } => Technique::Light,
            TechniqueDraw::AlphaClear => Technique::AlphaClear,
            TechniqueDraw::Blur { axis, .. } => axis.technique(),
            TechniqueDraw::Composite { blend, .. } => blend.technique(),
            TechniqueDraw::DebugWireframe { .. } => Technique::DebugWireframe,
        }
    }
}
