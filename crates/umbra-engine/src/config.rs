//! In-memory configuration consumed from the host application.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::coords::Color;
use crate::error::LightmapError;

/// Divisor applied to the back-buffer size when allocating lightmap targets.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ResolutionScale {
    #[default]
    Full,
    Fourth,
    Eighth,
}

impl ResolutionScale {
    #[inline]
    pub const fn divisor(self) -> u32 {
        match self {
            ResolutionScale::Full => 1,
            ResolutionScale::Fourth => 4,
            ResolutionScale::Eighth => 8,
        }
    }

    /// Texel bias multiplier. Grows as the lightmap texel footprint grows.
    #[inline]
    pub const fn bias_factor(self) -> f32 {
        match self {
            ResolutionScale::Full => 0.5,
            ResolutionScale::Fourth => 0.6,
            ResolutionScale::Eighth => 0.7,
        }
    }

    /// Per-axis texel bias (in UV units) for a target of `size` pixels.
    #[inline]
    pub fn texel_bias(self, size: Vec2) -> Vec2 {
        Vec2::splat(self.bias_factor()) / size.max(Vec2::ONE)
    }
}

impl TryFrom<u32> for ResolutionScale {
    type Error = LightmapError;

    fn try_from(divisor: u32) -> Result<Self, Self::Error> {
        match divisor {
            1 => Ok(ResolutionScale::Full),
            4 => Ok(ResolutionScale::Fourth),
            8 => Ok(ResolutionScale::Eighth),
            other => Err(LightmapError::UnsupportedResolutionScale(other.to_string())),
        }
    }
}

impl FromStr for ResolutionScale {
    type Err = LightmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ResolutionScale::Full),
            "fourth" => Ok(ResolutionScale::Fourth),
            "eighth" => Ok(ResolutionScale::Eighth),
            other => other
                .parse::<u32>()
                .map_err(|_| LightmapError::UnsupportedResolutionScale(s.to_string()))
                .and_then(ResolutionScale::try_from),
        }
    }
}

impl fmt::Display for ResolutionScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.divisor())
    }
}

/// Which triangle winding (in target pixel space) the rasterizer discards.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CullMode {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

impl FromStr for CullMode {
    type Err = LightmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CullMode::None),
            "cw" | "clockwise" => Ok(CullMode::Clockwise),
            "ccw" | "counterclockwise" | "counter-clockwise" => Ok(CullMode::CounterClockwise),
            _ => Err(LightmapError::UnknownCullMode(s.to_string())),
        }
    }
}

/// Lightmap compositor settings.
///
/// `blur` is a sampling step in lightmap texels; `0.0` disables the blur
/// passes. Negative values are treated as zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightmapConfig {
    pub resolution_scale: ResolutionScale,
    pub blur: f32,
    pub ambient: Color,
    pub cull_mode: CullMode,
    pub debug_wireframe: bool,
}

impl Default for LightmapConfig {
    fn default() -> Self {
        Self {
            resolution_scale: ResolutionScale::Full,
            blur: 0.0,
            ambient: Color::BLACK,
            cull_mode: CullMode::None,
            debug_wireframe: false,
        }
    }
}

impl LightmapConfig {
    /// Effective blur intensity (never negative, never NaN).
    #[inline]
    pub fn blur_intensity(&self) -> f32 {
        if self.blur > 0.0 { self.blur } else { 0.0 }
    }
}
