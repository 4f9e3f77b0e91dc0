use glam::{Affine2, Mat2, Vec2};

use crate::coords::Color;
use crate::render::HullVertex;

/// Per-instance transform for cached hull vertices.
///
/// Positions go through scale, rotation, translation. Normals go through
/// inverse scale and rotation so they stay perpendicular to their scaled
/// edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HullPlacement {
    vertex: Affine2,
    normal: Mat2,
}

impl HullPlacement {
    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            vertex: Affine2::from_scale_angle_translation(scale, rotation, position),
            normal: Mat2::from_angle(rotation) * Mat2::from_diagonal(scale.recip()),
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        self.vertex.transform_point2(p)
    }

    /// Zero for degenerate (zero-scale) axes.
    #[inline]
    pub fn transform_normal(&self, n: Vec2) -> Vec2 {
        (self.normal * n).normalize_or_zero()
    }

    /// Appends transformed copies of `local` to `out`, each recolored.
    pub fn apply(&self, local: &[HullVertex], color: Color, out: &mut Vec<HullVertex>) {
        out.reserve(local.len());
        out.extend(local.iter().map(|v| {
            HullVertex::new(
                self.transform_point(v.position()),
                self.transform_normal(v.normal()),
                color,
            )
        }));
    }
}

impl Default for HullPlacement {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::ONE)
    }
}
