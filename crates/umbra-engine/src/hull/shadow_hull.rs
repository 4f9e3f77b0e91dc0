use glam::Vec2;

use super::builder::{HullBuilder, HullGeometry};
use super::placement::HullPlacement;
use super::shape::{circle_points, rectangle_points, HullShape};
use crate::coords::Color;
use crate::error::{LightmapError, Result};
use crate::render::HullVertex;

/// A polygonal light obstacle.
///
/// Geometry is built once in local space; position, rotation, scale and
/// opacity change freely afterwards and are applied per draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowHull {
    geometry: HullGeometry,
    max_radius: f32,

    position: Vec2,
    rotation: f32,
    scale: Vec2,
    opacity: f32,
    visible: bool,
}

impl ShadowHull {
    /// Hull from a single counter-clockwise convex polygon.
    pub fn convex(points: &[Vec2]) -> Result<Self> {
        let geometry = HullBuilder::build(points)?;
        Ok(Self::from_geometry(geometry, max_length(points.iter().copied())))
    }

    /// Centered `width × height` rectangle.
    pub fn rectangle(width: f32, height: f32) -> Result<Self> {
        Self::convex(&rectangle_points(width, height))
    }

    pub fn circle(radius: f32, sides: usize) -> Result<Self> {
        Self::convex(&circle_points(radius, sides)?)
    }

    /// Compound hull. Each shape keeps its own fan; the culling radius spans
    /// every shape's offset points.
    pub fn from_shapes<'a>(shapes: impl IntoIterator<Item = &'a HullShape>) -> Result<Self> {
        let mut geometry = HullGeometry::default();
        let mut max_radius = 0.0f32;

        for shape in shapes {
            let points: Vec<Vec2> = shape.points().collect();
            HullBuilder::append(&mut geometry, &points)?;
            max_radius = max_radius.max(max_length(points.into_iter()));
        }

        if geometry.is_empty() {
            return Err(LightmapError::TooFewPoints(0));
        }
        Ok(Self::from_geometry(geometry, max_radius))
    }

    fn from_geometry(geometry: HullGeometry, max_radius: f32) -> Self {
        Self {
            geometry,
            max_radius,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            opacity: 1.0,
            visible: true,
        }
    }

    // ── fluent builders ───────────────────────────────────────────────────

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.set_visible(visible);
        self
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn vertices(&self) -> &[HullVertex] {
        &self.geometry.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.geometry.indices
    }

    /// Largest local vertex distance from the hull origin.
    #[inline]
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Culling radius under the current scale.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.max_radius * self.scale.abs().max_element()
    }

    #[inline]
    pub fn radius_squared(&self) -> f32 {
        let r = self.radius();
        r * r
    }

    pub fn placement(&self) -> HullPlacement {
        HullPlacement::new(self.position, self.rotation, self.scale)
    }

    /// Vertex color emitted for this hull: black with alpha `1 − opacity`,
    /// so an opaque hull writes full occlusion.
    #[inline]
    pub fn shadow_color(&self) -> Color {
        Color::new(0.0, 0.0, 0.0, 1.0 - self.opacity)
    }

    // ── state ─────────────────────────────────────────────────────────────

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
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    #[inline]
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Clamped to `[0, 1]`; NaN becomes fully opaque.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn max_length(points: impl Iterator<Item = Vec2>) -> f32 {
    points.map(Vec2::length).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── factories ─────────────────────────────────────────────────────────

    #[test]
    fn rectangle_geometry_and_radius() {
        let hull = ShadowHull::rectangle(6.0, 8.0).unwrap();
        assert_eq!(hull.vertices().len(), 8);
        assert_eq!(hull.indices().len(), 18);
        assert!((hull.max_radius() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn circle_radius_matches() {
        let hull = ShadowHull::circle(2.0, 12).unwrap();
        assert_eq!(hull.vertices().len(), 24);
        assert!((hull.max_radius() - 2.0).abs() < 1e-5);
        assert!(ShadowHull::circle(2.0, 2).is_err());
    }

    #[test]
    fn convex_rejects_degenerate_input() {
        assert_eq!(
            ShadowHull::convex(&[Vec2::ZERO, Vec2::ONE]),
            Err(LightmapError::TooFewPoints(2))
        );
    }

    #[test]
    fn compound_hull_indexes_each_shape_from_its_own_base() {
        let shapes = [
            HullShape::rectangle(2.0, 2.0),
            HullShape::rectangle(2.0, 2.0).with_offset(Vec2::new(5.0, 0.0)),
            HullShape::rectangle(2.0, 2.0).with_offset(Vec2::new(-5.0, 0.0)),
        ];
        let hull = ShadowHull::from_shapes(&shapes).unwrap();

        assert_eq!(hull.vertices().len(), 24);
        assert_eq!(hull.indices().len(), 3 * 18);
        let anchors: Vec<u32> = hull.indices().chunks(3).map(|t| t[0]).collect();
        assert!(anchors[..6].iter().all(|&a| a == 0));
        assert!(anchors[6..12].iter().all(|&a| a == 8));
        assert!(anchors[12..].iter().all(|&a| a == 16));
        assert!((hull.max_radius() - Vec2::new(6.0, 1.0).length()).abs() < 1e-5);
    }

    #[test]
    fn empty_shape_list_is_rejected() {
        let none: [HullShape; 0] = [];
        assert_eq!(ShadowHull::from_shapes(&none), Err(LightmapError::TooFewPoints(0)));
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[test]
    fn radius_follows_largest_scale_axis() {
        let hull = ShadowHull::circle(1.0, 8)
            .unwrap()
            .with_scale(Vec2::new(0.5, -3.0));
        assert!((hull.radius() - 3.0).abs() < 1e-5);
        assert!((hull.radius_squared() - 9.0).abs() < 1e-4);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut hull = ShadowHull::rectangle(1.0, 1.0).unwrap().with_opacity(2.0);
        assert_eq!(hull.opacity(), 1.0);
        hull.set_opacity(-1.0);
        assert_eq!(hull.opacity(), 0.0);
        hull.set_opacity(f32::NAN);
        assert_eq!(hull.opacity(), 1.0);
    }

    #[test]
    fn shadow_color_encodes_opacity() {
        let hull = ShadowHull::rectangle(1.0, 1.0).unwrap().with_opacity(0.25);
        assert_eq!(hull.shadow_color(), Color::new(0.0, 0.0, 0.0, 0.75));
    }

    #[test]
    fn defaults() {
        let hull = ShadowHull::rectangle(1.0, 1.0).unwrap();
        assert!(hull.is_visible());
        assert_eq!(hull.scale(), Vec2::ONE);
        assert_eq!(hull.position(), Vec2::ZERO);
        assert_eq!(hull.opacity(), 1.0);
        assert_eq!(hull.shadow_color().a, 0.0);
    }
}
