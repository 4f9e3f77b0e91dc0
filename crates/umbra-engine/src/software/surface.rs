use glam::{Vec2, Vec4};

use crate::coords::{Color, PixelRect};

/// RGBA `f32` color plane plus an 8-bit stencil plane, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    color: Vec<Color>,
    stencil: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![Color::TRANSPARENT; n],
            stencil: vec![0; n],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x as usize + y as usize * self.width as usize)
    }

    /// Transparent black outside the surface.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.index(x, y).map_or(Color::TRANSPARENT, |i| self.color[i])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.color[i] = color;
        }
    }

    /// Applies `f` to one pixel in place. No-op outside the surface.
    #[inline]
    pub fn update_pixel(&mut self, x: u32, y: u32, f: impl FnOnce(&mut Color)) {
        if let Some(i) = self.index(x, y) {
            f(&mut self.color[i]);
        }
    }

    #[inline]
    pub fn stencil(&self, x: u32, y: u32) -> u8 {
        self.index(x, y).map_or(0, |i| self.stencil[i])
    }

    #[inline]
    pub fn set_stencil(&mut self, x: u32, y: u32, value: u8) {
        if let Some(i) = self.index(x, y) {
            self.stencil[i] = value;
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.color.fill(color);
    }

    /// Writes `color` and/or `stencil` over `rect` (clipped to the surface).
    pub fn clear_rect(&mut self, rect: PixelRect, color: Option<Color>, stencil: Option<u8>) {
        let rect = rect.intersect(&self.bounds());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(c) = color {
                    self.set_pixel(x, y, c);
                }
                if let Some(s) = stencil {
                    self.set_stencil(x, y, s);
                }
            }
        }
    }

    /// Bilinear sample at `uv ∈ [0, 1]²` with clamp-to-edge addressing.
    pub fn sample(&self, uv: Vec2) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::TRANSPARENT;
        }

        let max = Vec2::new((self.width - 1) as f32, (self.height - 1) as f32);
        let p = (uv * self.size() - 0.5).clamp(Vec2::ZERO, max);
        let base = p.floor();
        let f = p - base;

        let x0 = base.x as u32;
        let y0 = base.y as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let texel = |x, y| Vec4::from_array(self.pixel(x, y).to_array());
        let top = texel(x0, y0).lerp(texel(x1, y0), f.x);
        let bottom = texel(x0, y1).lerp(texel(x1, y1), f.x);
        Color::from_array(top.lerp(bottom, f.y).to_array())
    }

    /// 8-bit RGBA bytes, row-major, for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let s = Surface::new(2, 2);
        assert_eq!(s.pixel(5, 0), Color::TRANSPARENT);
        assert_eq!(s.stencil(0, 9), 0);
    }

    #[test]
    fn clear_rect_is_clipped() {
        let mut s = Surface::new(4, 4);
        s.clear_rect(PixelRect::new(2, 2, 10, 10), Some(Color::WHITE), Some(1));
        assert_eq!(s.pixel(1, 1), Color::TRANSPARENT);
        assert_eq!(s.pixel(3, 3), Color::WHITE);
        assert_eq!(s.stencil(2, 3), 1);
        assert_eq!(s.stencil(1, 3), 0);
    }

    #[test]
    fn sample_hits_texel_centers() {
        let mut s = Surface::new(2, 1);
        s.set_pixel(0, 0, Color::BLACK);
        s.set_pixel(1, 0, Color::WHITE);

        assert_eq!(s.sample(Vec2::new(0.25, 0.5)), Color::BLACK);
        assert_eq!(s.sample(Vec2::new(0.75, 0.5)), Color::WHITE);
        let mid = s.sample(Vec2::new(0.5, 0.5));
        assert!((mid.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rgba8_export() {
        let mut s = Surface::new(1, 1);
        s.fill(Color::new(1.0, 0.0, 0.5, 1.0));
        assert_eq!(s.to_rgba8(), vec![255, 0, 128, 255]);
    }
}
