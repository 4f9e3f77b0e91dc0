//! Edge-function triangle fill and line drawing in pixel space.

use glam::Vec2;

use crate::config::CullMode;
use crate::coords::PixelRect;

/// Pixel-space signed area (×2). Positive for triangles that wind
/// clockwise on screen (+Y down).
#[inline]
pub fn signed_area(p: [Vec2; 3]) -> f32 {
    (p[1] - p[0]).perp_dot(p[2] - p[0])
}

#[inline]
pub fn is_culled(p: [Vec2; 3], mode: CullMode) -> bool {
    let area = signed_area(p);
    match mode {
        CullMode::None => false,
        CullMode::Clockwise => area > 0.0,
        CullMode::CounterClockwise => area < 0.0,
    }
}

/// Top-left rule for clockwise (on-screen) triangles: a pixel center
/// exactly on an edge belongs to the triangle when that edge is a top or a
/// left edge, so triangles sharing an edge never both cover it.
#[inline]
fn owns_edge(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    d.y < 0.0 || (d.y == 0.0 && d.x > 0.0)
}

/// Calls `shade(x, y, weights)` for every pixel center of `clip` inside the
/// triangle. `weights` are barycentric, in the order of `p`.
pub fn fill_triangle(
    p: [Vec2; 3],
    clip: PixelRect,
    cull: CullMode,
    mut shade: impl FnMut(u32, u32, [f32; 3]),
) {
    if clip.is_empty() || is_culled(p, cull) {
        return;
    }

    let area = signed_area(p);
    if area == 0.0 || !area.is_finite() {
        return;
    }

    // Work in clockwise order; remember where each vertex went.
    let (order, area) = if area > 0.0 { ([0, 1, 2], area) } else { ([0, 2, 1], -area) };
    let v = [p[order[0]], p[order[1]], p[order[2]]];
    let owns = [owns_edge(v[1], v[2]), owns_edge(v[2], v[0]), owns_edge(v[0], v[1])];

    let lo = v[0].min(v[1]).min(v[2]);
    let hi = v[0].max(v[1]).max(v[2]);

    let x0 = (lo.x.floor().max(clip.x as f32)) as u32;
    let y0 = (lo.y.floor().max(clip.y as f32)) as u32;
    let x1 = (hi.x.ceil().min(clip.right() as f32)) as u32;
    let y1 = (hi.y.ceil().min(clip.bottom() as f32)) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            let s = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let e = [
                (v[2] - v[1]).perp_dot(s - v[1]),
                (v[0] - v[2]).perp_dot(s - v[2]),
                (v[1] - v[0]).perp_dot(s - v[0]),
            ];

            let inside = e
                .iter()
                .zip(owns)
                .all(|(&e, owned)| e > 0.0 || (e == 0.0 && owned));
            if !inside {
                continue;
            }

            let mut weights = [0.0; 3];
            for (k, &slot) in order.iter().enumerate() {
                weights[slot] = e[k] / area;
            }
            shade(x, y, weights);
        }
    }
}

/// Calls `plot(x, y)` along the segment `a → b`, one pixel per step on the
/// major axis, clipped to `clip`.
pub fn draw_line(a: Vec2, b: Vec2, clip: PixelRect, mut plot: impl FnMut(u32, u32)) {
    if !a.is_finite() || !b.is_finite() {
        return;
    }

    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as u32;
    let step = d / steps as f32;

    for i in 0..=steps {
        let p = a + step * i as f32;
        if p.x < 0.0 || p.y < 0.0 {
            continue;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if clip.contains(x, y) {
            plot(x, y);
        }
    }
}
