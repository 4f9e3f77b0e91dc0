use glam::Vec2;

/// Axis-aligned rectangle stored as a min/max corner pair, in world units.
///
/// World space is +Y up, so `top` is `max.y` and `bottom` is `min.y`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BoundingRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingRect {
    /// The all-zero rectangle.
    pub const ZERO: Self = Self::new(Vec2::ZERO, Vec2::ZERO);

    /// A rectangle containing every finite point.
    pub const EVERYTHING: Self = Self::new(Vec2::splat(f32::MIN), Vec2::splat(f32::MAX));

    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    #[inline]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Smallest rectangle containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.min == Vec2::ZERO && self.max == Vec2::ZERO
    }

    /// Corners in order: bottom-left, bottom-right, top-right, top-left.
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Closed containment: points on the edge are inside.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.min.x <= p.x && self.min.y <= p.y && self.max.x >= p.x && self.max.y >= p.y
    }

    #[inline]
    pub fn contains_rect(&self, other: &BoundingRect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Open overlap test: rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &BoundingRect) -> bool {
        self.min.x < other.max.x
            && self.min.y < other.max.y
            && self.max.x > other.min.x
            && self.max.y > other.min.y
    }

    /// Overlapping region, or `None` when the overlap has no area.
    pub fn intersection(&self, other: &BoundingRect) -> Option<BoundingRect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);

        if max.x > min.x && max.y > min.y {
            Some(Self::new(min, max))
        } else {
            None
        }
    }

    #[inline]
    pub fn union(&self, other: &BoundingRect) -> BoundingRect {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }
}
