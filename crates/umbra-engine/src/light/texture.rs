use glam::Vec2;

use crate::error::{LightmapError, Result};

/// Square single-channel falloff texture, row-major (`x + y · size`).
#[derive(Debug, Clone, PartialEq)]
pub struct LightTexture {
    size: u32,
    texels: Vec<f32>,
}

impl LightTexture {
    /// Omnidirectional linear falloff.
    pub fn point(size: u32) -> Self {
        Self::conic(size, std::f32::consts::TAU, 0.0)
    }

    /// Linear falloff restricted to a cone along +X of half-angle `fov / 2`,
    /// starting `near` texels from the center.
    pub fn conic(size: u32, fov: f32, near: f32) -> Self {
        let half = size as f32 / 2.0;
        let half_fov = fov / 2.0;
        let n = size as usize;

        let mut texels = vec![0.0; n * n];
        for y in 0..n {
            for x in 0..n {
                let v = Vec2::new(x as f32 - half, y as f32 - half);
                let distance = v.length();
                let angle = v.y.atan2(v.x).abs();

                if distance <= half && distance >= near && angle <= half_fov {
                    texels[x + y * n] = (half - distance) / half;
                }
            }
        }

        Self { size, texels }
    }

    pub fn from_texels(size: u32, texels: Vec<f32>) -> Result<Self> {
        let expected = size as usize * size as usize;
        if texels.len() != expected {
            return Err(LightmapError::TextureSizeMismatch {
                size,
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self { size, texels })
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> f32 {
        let n = self.size as usize;
        self.texels
            .get(x as usize + y as usize * n)
            .copied()
            .unwrap_or(0.0)
    }

    /// Bilinear sample at `uv ∈ [0, 1]²`, clamped to the edge texels.
    pub fn sample(&self, uv: Vec2) -> f32 {
        if self.size == 0 {
            return 0.0;
        }

        let max = (self.size - 1) as f32;
        let p = (uv * self.size as f32 - 0.5).clamp(Vec2::ZERO, Vec2::splat(max));
        let x0 = p.x.floor();
        let y0 = p.y.floor();
        let fx = p.x - x0;
        let fy = p.y - y0;

        let (x0, y0) = (x0 as u32, y0 as u32);
        let x1 = (x0 + 1).min(self.size - 1);
        let y1 = (y0 + 1).min(self.size - 1);

        let top = self.texel(x0, y0) * (1.0 - fx) + self.texel(x1, y0) * fx;
        let bottom = self.texel(x0, y1) * (1.0 - fx) + self.texel(x1, y1) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn point_texture_peaks_at_center() {
        let tex = LightTexture::point(64);
        assert_eq!(tex.texels().len(), 64 * 64);
        assert_eq!(tex.texel(32, 32), 1.0);
        assert_eq!(tex.texel(0, 0), 0.0);
        assert!(tex.texel(40, 32) < tex.texel(36, 32));
    }

    #[test]
    fn conic_texture_is_dark_behind() {
        let tex = LightTexture::conic(64, FRAC_PI_2, 0.0);
        assert!(tex.texel(48, 32) > 0.0);
        assert_eq!(tex.texel(16, 32), 0.0);
        assert_eq!(tex.texel(32, 48), 0.0);
    }

    #[test]
    fn near_plane_cuts_center() {
        let tex = LightTexture::conic(64, std::f32::consts::TAU, 4.0);
        assert_eq!(tex.texel(32, 32), 0.0);
        assert!(tex.texel(38, 32) > 0.0);
    }

    #[test]
    fn sample_interpolates_and_clamps() {
        let tex = LightTexture::from_texels(2, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        assert!((tex.sample(Vec2::new(0.5, 0.5)) - 0.5).abs() < 1e-6);
        assert_eq!(tex.sample(Vec2::new(-1.0, 0.0)), 0.0);
        assert_eq!(tex.sample(Vec2::new(2.0, 1.0)), 1.0);
    }

    #[test]
    fn from_texels_checks_length() {
        assert_eq!(
            LightTexture::from_texels(4, vec![0.0; 15]),
            Err(LightmapError::TextureSizeMismatch { size: 4, expected: 16, actual: 15 })
        );
    }
}
