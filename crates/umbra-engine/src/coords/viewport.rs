use glam::Vec2;

use super::PixelRect;

/// Pixel viewport: the sub-rectangle of a target that NDC maps onto.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `width × height` target.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub const fn bounds(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.width, self.height)
    }

    /// Divides every component by `divisor` (integer division), for mapping a
    /// back-buffer viewport onto a reduced-resolution lightmap.
    #[inline]
    pub fn scaled_down(&self, divisor: u32) -> Self {
        let d = divisor.max(1);
        Self::new(self.x / d, self.y / d, self.width / d, self.height / d)
    }

    /// Restricts the viewport to a `width × height` target.
    pub fn clamped_to(&self, width: u32, height: u32) -> Self {
        let r = self.bounds().intersect(&PixelRect::new(0, 0, width, height));
        Self::new(r.x, r.y, r.width, r.height)
    }
}
