use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::{Affine2, Vec2};

use crate::coords::{clamp_to_unit_square, unit_square_to_texcoord, Color};
use crate::render::ConeVertex;

/// Square corners of the fan, in fan vertex order: top-left, top-right,
/// bottom-right, bottom-left.
const CORNERS: [Vec2; 4] = [
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, -1.0),
];

const NARROW_INDICES: [u16; 3] = [0, 1, 6];
const MEDIUM_INDICES: [u16; 9] = [0, 1, 3, 0, 3, 4, 0, 4, 6];
const WIDE_INDICES: [u16; 15] = [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5, 0, 5, 6];
const SQUARE_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

/// Geometry layout chosen for a field of view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConeLayout {
    /// Nothing to draw.
    None,
    /// Full circle: a rotated quad covering the falloff square.
    Square,
    /// `fov ≤ π/2`: one triangle.
    Narrow,
    /// `fov ≤ 3π/2`: three triangles.
    Medium,
    /// Anything wider: five triangles.
    Wide,
}

impl ConeLayout {
    pub fn indices(self) -> &'static [u16] {
        match self {
            ConeLayout::None => &[],
            ConeLayout::Square => &SQUARE_INDICES,
            ConeLayout::Narrow => &NARROW_INDICES,
            ConeLayout::Medium => &MEDIUM_INDICES,
            ConeLayout::Wide => &WIDE_INDICES,
        }
    }

    pub fn vertex_count(self) -> usize {
        match self {
            ConeLayout::None => 0,
            ConeLayout::Square => 4,
            _ => 7,
        }
    }
}

pub fn layout_for_fov(fov: f32) -> ConeLayout {
    if fov.is_nan() || fov <= 0.0 {
        ConeLayout::None
    } else if fov >= TAU {
        ConeLayout::Square
    } else if fov <= FRAC_PI_2 {
        ConeLayout::Narrow
    } else if fov <= 3.0 * FRAC_PI_2 {
        ConeLayout::Medium
    } else {
        ConeLayout::Wide
    }
}

/// Builds light-cone geometry sampled over a square falloff texture.
pub struct LightConeBuilder;

impl LightConeBuilder {
    pub fn build(
        position: Vec2,
        rotation: f32,
        size: f32,
        color: Color,
        fov: f32,
    ) -> (Vec<ConeVertex>, Vec<u16>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let layout = Self::build_into(position, rotation, size, color, fov, &mut vertices, &mut indices);
        debug_assert_eq!(vertices.len(), layout.vertex_count());
        (vertices, indices)
    }

    /// Appends the cone to `vertices`/`indices`, offsetting indices by the
    /// current vertex count. Returns the layout used.
    pub fn build_into(
        position: Vec2,
        rotation: f32,
        size: f32,
        color: Color,
        fov: f32,
        vertices: &mut Vec<ConeVertex>,
        indices: &mut Vec<u16>,
    ) -> ConeLayout {
        let layout = layout_for_fov(fov);
        let base = vertices.len() as u16;

        match layout {
            ConeLayout::None => return layout,
            ConeLayout::Square => push_square(position, rotation, size, color, vertices),
            _ => push_fan(position, rotation, size, color, fov, vertices),
        }

        indices.extend(layout.indices().iter().map(|&i| base + i));
        layout
    }
}

fn push_fan(
    position: Vec2,
    rotation: f32,
    size: f32,
    color: Color,
    fov: f32,
    out: &mut Vec<ConeVertex>,
) {
    let ccw = clamp_to_unit_square(fov * 0.5);
    let cw = clamp_to_unit_square(-fov * 0.5);

    let local = [Vec2::ZERO, ccw, CORNERS[0], CORNERS[1], CORNERS[2], CORNERS[3], cw];
    let transform = Affine2::from_scale_angle_translation(Vec2::splat(size * 0.5), rotation, position);

    out.extend(local.iter().map(|&p| {
        ConeVertex::new(transform.transform_point2(p), color, unit_square_to_texcoord(p))
    }));
}

fn push_square(position: Vec2, rotation: f32, size: f32, color: Color, out: &mut Vec<ConeVertex>) {
    let half_diagonal = size * 0.5 * std::f32::consts::SQRT_2;
    let (sin, cos) = (rotation + FRAC_PI_4).sin_cos();
    let (sin, cos) = (sin * half_diagonal, cos * half_diagonal);

    let corners = [
        (Vec2::new(-sin, cos), Vec2::new(0.0, 0.0)),
        (Vec2::new(cos, sin), Vec2::new(1.0, 0.0)),
        (Vec2::new(-cos, -sin), Vec2::new(0.0, 1.0)),
        (Vec2::new(sin, -cos), Vec2::new(1.0, 1.0)),
    ];

    out.extend(
        corners
            .iter()
            .map(|&(offset, uv)| ConeVertex::new(position + offset, color, uv)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    // ── layout selection ──────────────────────────────────────────────────

    #[test]
    fn layout_boundaries() {
        assert_eq!(layout_for_fov(0.0), ConeLayout::None);
        assert_eq!(layout_for_fov(-1.0), ConeLayout::None);
        assert_eq!(layout_for_fov(f32::NAN), ConeLayout::None);
        assert_eq!(layout_for_fov(FRAC_PI_2), ConeLayout::Narrow);
        assert_eq!(layout_for_fov(FRAC_PI_2 + 1e-3), ConeLayout::Medium);
        assert_eq!(layout_for_fov(3.0 * FRAC_PI_2), ConeLayout::Medium);
        assert_eq!(layout_for_fov(3.0 * FRAC_PI_2 + 1e-3), ConeLayout::Wide);
        assert_eq!(layout_for_fov(TAU), ConeLayout::Square);
        assert_eq!(layout_for_fov(10.0), ConeLayout::Square);
    }

    #[test]
    fn zero_fov_emits_nothing() {
        let (v, i) = LightConeBuilder::build(Vec2::ZERO, 0.0, 2.0, Color::WHITE, 0.0);
        assert!(v.is_empty());
        assert!(i.is_empty());
    }

    // ── full square ───────────────────────────────────────────────────────

    #[test]
    fn full_circle_is_square_quad() {
        let (v, i) = LightConeBuilder::build(Vec2::new(5.0, 5.0), 0.0, 4.0, Color::WHITE, TAU);
        assert_eq!(v.len(), 4);
        assert_eq!(i, SQUARE_INDICES);

        assert!(approx(v[0].position(), Vec2::new(3.0, 7.0)));
        assert!(approx(v[1].position(), Vec2::new(7.0, 7.0)));
        assert!(approx(v[2].position(), Vec2::new(3.0, 3.0)));
        assert!(approx(v[3].position(), Vec2::new(7.0, 3.0)));
        assert_eq!(v[0].texcoord(), Vec2::new(0.0, 0.0));
        assert_eq!(v[3].texcoord(), Vec2::new(1.0, 1.0));
    }

    // ── partial cones ─────────────────────────────────────────────────────

    #[test]
    fn quarter_cone_single_triangle() {
        let (v, i) = LightConeBuilder::build(Vec2::ZERO, 0.0, 2.0, Color::WHITE, FRAC_PI_2);
        assert_eq!(v.len(), 7);
        assert_eq!(i, NARROW_INDICES);

        assert!(approx(v[1].position(), Vec2::new(1.0, 1.0)));
        assert!(approx(v[6].position(), Vec2::new(1.0, -1.0)));
        assert!(approx(v[1].texcoord(), Vec2::new(1.0, 0.0)));
        assert!(approx(v[6].texcoord(), Vec2::new(1.0, 1.0)));
        assert_eq!(v[0].texcoord(), Vec2::splat(0.5));
    }

    #[test]
    fn half_cone_uses_three_triangles() {
        let (v, i) = LightConeBuilder::build(Vec2::ZERO, 0.0, 2.0, Color::WHITE, PI);
        assert_eq!(i.len(), 9);
        // edges at ±90° land on the top and bottom midpoints
        assert!(approx(v[1].position(), Vec2::new(0.0, 1.0)));
        assert!(approx(v[6].position(), Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn rotation_scale_translation() {
        let (v, _) = LightConeBuilder::build(Vec2::new(10.0, 0.0), FRAC_PI_2, 6.0, Color::WHITE, PI);
        // local (0,1) rotated a quarter turn -> (-1,0), scaled by 3
        assert!(approx(v[1].position(), Vec2::new(7.0, 0.0)));
        assert!(approx(v[0].position(), Vec2::new(10.0, 0.0)));
        // texcoords stay in local space
        assert!(approx(v[1].texcoord(), Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn build_into_offsets_indices() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        LightConeBuilder::build_into(Vec2::ZERO, 0.0, 2.0, Color::WHITE, TAU, &mut vertices, &mut indices);
        let layout =
            LightConeBuilder::build_into(Vec2::ZERO, 0.0, 2.0, Color::WHITE, 1.0, &mut vertices, &mut indices);

        assert_eq!(layout, ConeLayout::Narrow);
        assert_eq!(vertices.len(), 11);
        assert_eq!(&indices[6..], &[4, 5, 10]);
    }
}
