/// Linear straight-alpha RGBA color.
///
/// Components are nominally in `[0, 1]`. Vertex records carry colors packed
/// as four bytes, see [`to_rgba8`](Self::to_rgba8).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    #[inline]
    pub fn from_rgba8(bytes: [u8; 4]) -> Self {
        Self::new(
            bytes[0] as f32 / 255.0,
            bytes[1] as f32 / 255.0,
            bytes[2] as f32 / 255.0,
            bytes[3] as f32 / 255.0,
        )
    }

    /// Packs to bytes, clamping each channel to `[0, 1]` and rounding.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        fn pack(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [pack(self.r), pack(self.g), pack(self.b), pack(self.a)]
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_packing_rounds_and_clamps() {
        assert_eq!(Color::new(0.0, 0.5, 1.0, 2.0).to_rgba8(), [0, 128, 255, 255]);
        assert_eq!(Color::new(-1.0, 0.1, 0.0, 0.1).to_rgba8(), [0, 26, 0, 26]);
    }

    #[test]
    fn rgba8_unpacking() {
        let c = Color::from_rgba8([255, 0, 51, 255]);
        assert_eq!(c, Color::new(1.0, 0.0, 0.2, 1.0));
    }
}
