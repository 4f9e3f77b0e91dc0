use glam::Vec2;

use super::vertex::{ConeVertex, HullVertex};
use crate::coords::{BoundingRect, Color};
use crate::hull::ShadowHull;
use crate::light::{ConeLayout, Light, LightConeBuilder};

/// Hull vertices and fan indices gathered for one submission.
#[derive(Debug, Default)]
pub struct HullBatch {
    vertices: Vec<HullVertex>,
    indices: Vec<u32>,
}

impl HullBatch {
    /// Empties the batch, keeping its allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[HullVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends `hull` in world space, colored by its opacity.
    pub fn push_hull(&mut self, hull: &ShadowHull) {
        let base = self.vertices.len() as u32;
        hull.placement()
            .apply(hull.vertices(), hull.shadow_color(), &mut self.vertices);
        self.indices.extend(hull.indices().iter().map(|&i| base + i));
    }

    /// Appends `bounds` as a two-triangle quad.
    pub fn push_rect(&mut self, bounds: &BoundingRect, color: Color) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(
            bounds
                .corners()
                .iter()
                .map(|&c| HullVertex::new(c, Vec2::ZERO, color)),
        );
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Light cone vertices and indices for one light.
#[derive(Debug, Default)]
pub struct ConeBatch {
    vertices: Vec<ConeVertex>,
    indices: Vec<u16>,
}

impl ConeBatch {
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[ConeVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Appends the light's cone: `size = 2 × range`, light color and fov.
    pub fn push_light(&mut self, light: &Light) -> ConeLayout {
        LightConeBuilder::build_into(
            light.position(),
            light.rotation(),
            light.range() * 2.0,
            light.color(),
            light.fov(),
            &mut self.vertices,
            &mut self.indices,
        )
    }
}

/// Scratch geometry reused across lights and frames.
///
/// `hulls` and `cone` are reset at the start of every light; `wireframe`
/// collects debug geometry for a whole pass.
#[derive(Debug, Default)]
pub struct GeometryArena {
    pub hulls: HullBatch,
    pub cone: ConeBatch,
    pub wireframe: HullBatch,
}

impl GeometryArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset_light(&mut self) {
        self.hulls.clear();
        self.cone.clear();
    }

    #[inline]
    pub fn reset_pass(&mut self) {
        self.reset_light();
        self.wireframe.clear();
    }
}
