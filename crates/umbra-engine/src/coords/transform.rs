use glam::{Mat4, Vec2};

use super::Viewport;

/// Rotates a vector a quarter turn clockwise (in a +Y up frame).
#[inline]
pub fn clockwise(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Rotates a vector a quarter turn counter-clockwise (in a +Y up frame).
#[inline]
pub fn counter_clockwise(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Maps a direction to the point where it leaves the unit square `[-1, 1]²`.
///
/// `(cos θ, sin θ) / max(|cos θ|, |sin θ|)`: the square analogue of a point on
/// the unit circle. Light falloff textures are square, so cone geometry must
/// reach the square's edge rather than the inscribed circle.
#[inline]
pub fn clamp_to_unit_square(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let abs_max = cos.abs().max(sin.abs());
    Vec2::new(cos / abs_max, sin / abs_max)
}

/// Remaps a point of `[-1, 1]²` to texture space `[0, 1]²` with Y flipped.
#[inline]
pub fn unit_square_to_texcoord(v: Vec2) -> Vec2 {
    Vec2::new(v.x + 1.0, -v.y + 1.0) * 0.5
}

/// NDC to pixel coordinates inside `viewport`.
///
/// `x' = vx + (1 + x) / 2 · W`, `y' = vy + (1 − y) / 2 · H`.
#[inline]
pub fn ndc_to_pixel(ndc: Vec2, viewport: &Viewport) -> Vec2 {
    let size = viewport.size();
    viewport.origin()
        + Vec2::new((1.0 + ndc.x) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
}

/// World point to pixel coordinates through `view_projection`.
#[inline]
pub fn project_to_pixel(point: Vec2, view_projection: &Mat4, viewport: &Viewport) -> Vec2 {
    let ndc = view_projection.project_point3(point.extend(0.0));
    ndc_to_pixel(ndc.truncate(), viewport)
}
