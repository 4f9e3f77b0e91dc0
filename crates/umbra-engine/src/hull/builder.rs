use glam::Vec2;

use crate::coords::{clockwise, Color};
use crate::error::{LightmapError, Result};
use crate::render::HullVertex;

/// Color baked into cached silhouette vertices. Placement replaces it with
/// the hull's opacity-derived color.
pub const SILHOUETTE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.1);

/// Local-space silhouette geometry: two vertices per edge, fan indexed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullGeometry {
    pub vertices: Vec<HullVertex>,
    pub indices: Vec<u32>,
}

impl HullGeometry {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Converts ordered polygons into silhouette vertex/index buffers.
pub struct HullBuilder;

impl HullBuilder {
    /// Builds one polygon into fresh geometry.
    pub fn build(points: &[Vec2]) -> Result<HullGeometry> {
        let mut geometry = HullGeometry::default();
        Self::append(&mut geometry, points)?;
        Ok(geometry)
    }

    /// Appends one polygon to `geometry` with its own fan, anchored at the
    /// polygon's first emitted vertex.
    ///
    /// Each edge `(p[i], p[i+1 mod n])` contributes a start and an end vertex,
    /// both carrying the edge's clockwise normal. On error `geometry` is left
    /// untouched.
    pub fn append(geometry: &mut HullGeometry, points: &[Vec2]) -> Result<()> {
        validate(points)?;

        let base = geometry.vertices.len() as u32;
        let n = points.len();
        geometry.vertices.reserve(n * 2);

        for i in 0..n {
            let start = points[i];
            let end = points[(i + 1) % n];
            let normal = clockwise(end - start).normalize_or_zero();

            geometry.vertices.push(HullVertex::new(start, normal, SILHOUETTE_COLOR));
            geometry.vertices.push(HullVertex::new(end, normal, SILHOUETTE_COLOR));
        }

        fan_indices(base, (n * 2) as u32, &mut geometry.indices);
        Ok(())
    }
}

/// Fan over `count` vertices starting at `base`: `(b, b+k+1, b+k+2)` for
/// `k in 0..count-2`.
pub fn fan_indices(base: u32, count: u32, out: &mut Vec<u32>) {
    if count < 3 {
        return;
    }

    out.reserve(((count - 2) * 3) as usize);
    for k in 0..count - 2 {
        out.extend_from_slice(&[base, base + k + 1, base + k + 2]);
    }
}

fn validate(points: &[Vec2]) -> Result<()> {
    if points.len() < 3 {
        return Err(LightmapError::TooFewPoints(points.len()));
    }
    if let Some((index, &point)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(LightmapError::NonFinitePoint { index, point });
    }
    Ok(())
}
