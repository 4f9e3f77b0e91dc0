//! Broad-phase culling and scissor computation.

use glam::{Mat4, Vec2, Vec3};

use crate::coords::{project_to_pixel, BoundingRect, PixelRect, Viewport};
use crate::hull::ShadowHull;
use crate::light::Light;

/// Circle/circle test: the hull is gathered iff it is visible and
/// `d² ≤ light_r² + hull_r²`.
#[inline]
pub fn hull_in_range(light: &Light, hull: &ShadowHull) -> bool {
    hull.is_visible()
        && light.position().distance_squared(hull.position())
            <= light.radius_squared() + hull.radius_squared()
}

/// Pixel rectangle covering `bounds` once projected into `viewport`.
///
/// All four corners are projected so a rotating matrix still yields a
/// covering rectangle. The result is clamped to the viewport and truncated
/// to whole pixels.
pub fn scissor_for_bounds(bounds: &BoundingRect, view_projection: &Mat4, viewport: &Viewport) -> PixelRect {
    let corners = bounds
        .corners()
        .map(|c| project_to_pixel(c, view_projection, viewport));

    let min = corners.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
    let max = corners.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);

    let lo = viewport.origin();
    let hi = lo + viewport.size();
    PixelRect::from_min_max(min.clamp(lo, hi), max.clamp(lo, hi))
}

#[inline]
pub fn scissor_for_light(light: &Light, view_projection: &Mat4, viewport: &Viewport) -> PixelRect {
    scissor_for_bounds(&light.bounds(), view_projection, viewport)
}

/// World-space rectangle visible through `view_projection` (the NDC square
/// at z = 0 mapped back through the inverse). `None` when the matrix cannot
/// be inverted.
pub fn view_bounds(view_projection: &Mat4) -> Option<BoundingRect> {
    let det = view_projection.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    let inverse = view_projection.inverse();
    let corners = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];

    BoundingRect::from_points(corners.iter().map(|&c| inverse.project_point3(c).truncate()))
        .filter(|b| b.min.is_finite() && b.max.is_finite())
}
