use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::coords::Color;

/// Shadow hull vertex: position, outward edge normal and a modulation color.
///
/// The normal drives extrusion in the shadow technique; the color's alpha
/// carries the hull's shadow strength (`1 − opacity`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct HullVertex {
    pub position: [f32; 2],
    pub normal: [f32; 2],
    pub color: [u8; 4],
}

impl HullVertex {
    pub const STRIDE: usize = std::mem::size_of::<HullVertex>();

    #[inline]
    pub fn new(position: Vec2, normal: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_rgba8(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec2 {
        Vec2::from_array(self.normal)
    }

    #[inline]
    pub fn color(&self) -> Color {
        Color::from_rgba8(self.color)
    }
}

/// Light cone vertex, consumed by the light technique with a falloff texture.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ConeVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub texcoord: [f32; 2],
}

impl ConeVertex {
    pub const STRIDE: usize = std::mem::size_of::<ConeVertex>();

    #[inline]
    pub fn new(position: Vec2, color: Color, texcoord: Vec2) -> Self {
        Self {
            position: position.extend(0.0).to_array(),
            color: color.to_rgba8(),
            texcoord: texcoord.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec3::from_array(self.position).truncate()
    }

    #[inline]
    pub fn color(&self) -> Color {
        Color::from_rgba8(self.color)
    }

    #[inline]
    pub fn texcoord(&self) -> Vec2 {
        Vec2::from_array(self.texcoord)
    }
}
