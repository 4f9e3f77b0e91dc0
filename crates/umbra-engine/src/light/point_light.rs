use std::str::FromStr;

use glam::Vec2;

use crate::coords::{BoundingRect, Color};
use crate::error::LightmapError;
use crate::render::{LightUniforms, Technique, TextureId};

pub const MIN_INTENSITY: f32 = 0.01;
pub const MAX_INTENSITY: f32 = 3.0;

/// How a light interacts with the hulls it shadows.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ShadowMode {
    /// Hull bodies are as dark as their shadows.
    #[default]
    Solid,
    /// Hull bodies are lit; only the cast shadow is dark.
    Illuminated,
    /// Hull bodies are fully dark regardless of opacity.
    Occluded,
}

impl ShadowMode {
    pub const fn technique(self) -> Technique {
        match self {
            ShadowMode::Solid => Technique::ShadowSolid,
            ShadowMode::Illuminated => Technique::ShadowIlluminated,
            ShadowMode::Occluded => Technique::ShadowOccluded,
        }
    }
}

impl FromStr for ShadowMode {
    type Err = LightmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(ShadowMode::Solid),
            "illuminated" => Ok(ShadowMode::Illuminated),
            "occluded" => Ok(ShadowMode::Occluded),
            _ => Err(LightmapError::UnknownShadowMode(s.to_string())),
        }
    }
}

impl TryFrom<u32> for ShadowMode {
    type Error = LightmapError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ShadowMode::Solid),
            1 => Ok(ShadowMode::Illuminated),
            2 => Ok(ShadowMode::Occluded),
            other => Err(LightmapError::UnknownShadowMode(other.to_string())),
        }
    }
}

/// A point light with an optional field-of-view cone.
///
/// Range, intensity and field of view are clamped on every write, so the
/// intensity factor is always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    texture: TextureId,
    position: Vec2,
    rotation: f32,
    range: f32,
    intensity: f32,
    color: Color,
    fov: f32,
    shadow_mode: ShadowMode,
    on: bool,
}

impl Light {
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            position: Vec2::ZERO,
            rotation: 0.0,
            range: 1.0,
            intensity: 1.0,
            color: Color::WHITE,
            fov: std::f32::consts::TAU,
            shadow_mode: ShadowMode::Solid,
            on: true,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.set_range(range);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.set_intensity(intensity);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.set_fov(fov);
        self
    }

    pub fn with_shadow_mode(mut self, mode: ShadowMode) -> Self {
        self.set_shadow_mode(mode);
        self
    }

    pub fn with_on(mut self, on: bool) -> Self {
        self.on = on;
        self
    }

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    #[inline]
    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Negative and NaN ranges become 0.
    pub fn set_range(&mut self, range: f32) {
        self.range = if range > 0.0 { range } else { 0.0 };
    }

    #[inline]
    pub fn radius_squared(&self) -> f32 {
        self.range * self.range
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = if intensity.is_nan() {
            MIN_INTENSITY
        } else {
            intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
        };
    }

    /// `1 / intensity²`, the exponent applied to the falloff texture.
    #[inline]
    pub fn intensity_factor(&self) -> f32 {
        1.0 / (self.intensity * self.intensity)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Clamped to `[0, 2π]`; NaN becomes 0.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = if fov.is_nan() { 0.0 } else { fov.clamp(0.0, std::f32::consts::TAU) };
    }

    #[inline]
    pub fn shadow_mode(&self) -> ShadowMode {
        self.shadow_mode
    }

    #[inline]
    pub fn set_shadow_mode(&mut self, mode: ShadowMode) {
        self.shadow_mode = mode;
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    #[inline]
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// World-space square `position ± range`.
    #[inline]
    pub fn bounds(&self) -> BoundingRect {
        BoundingRect::from_center(self.position, Vec2::splat(self.range))
    }

    pub fn uniforms(&self) -> LightUniforms {
        LightUniforms {
            position: self.position,
            range: self.range,
            intensity_factor: self.intensity_factor(),
            color: self.color,
            texture: self.texture,
        }
    }
}
