use glam::Vec2;

use crate::error::{LightmapError, Result};

/// One convex polygon of a compound hull, in hull-local space.
///
/// Points must wind counter-clockwise (+Y up) so edge normals face outward.
#[derive(Debug, Clone, PartialEq)]
pub struct HullShape {
    points: Vec<Vec2>,
    offset: Vec2,
}

impl HullShape {
    pub fn convex(points: impl Into<Vec<Vec2>>) -> Self {
        Self::convex_with_offset(points, Vec2::ZERO)
    }

    pub fn convex_with_offset(points: impl Into<Vec<Vec2>>, offset: Vec2) -> Self {
        Self { points: points.into(), offset }
    }

    /// Axis-aligned `width × height` rectangle centered on the shape origin.
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::convex(rectangle_points(width, height))
    }

    pub fn circle(radius: f32, sides: usize) -> Result<Self> {
        Ok(Self::convex(circle_points(radius, sides)?))
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Points with the shape offset applied.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.points.iter().map(move |&p| p + self.offset)
    }
}

/// Counter-clockwise corners of a centered `width × height` rectangle,
/// starting top-right.
pub fn rectangle_points(width: f32, height: f32) -> [Vec2; 4] {
    let h = Vec2::new(width, height) * 0.5;
    [
        Vec2::new(h.x, h.y),
        Vec2::new(-h.x, h.y),
        Vec2::new(-h.x, -h.y),
        Vec2::new(h.x, -h.y),
    ]
}

/// Regular polygon approximating a circle, first point on +X.
pub fn circle_points(radius: f32, sides: usize) -> Result<Vec<Vec2>> {
    if sides < 3 {
        return Err(LightmapError::TooFewSides(sides));
    }

    let step = std::f32::consts::TAU / sides as f32;
    Ok((0..sides)
        .map(|i| Vec2::from_angle(i as f32 * step) * radius)
        .collect())
}
