use glam::{Mat4, Vec2};
use log::debug;

use super::raster::{draw_line, fill_triangle};
use super::surface::Surface;
use crate::config::CullMode;
use crate::coords::{project_to_pixel, Color, PixelRect, Viewport};
use crate::error::{LightmapError, Result};
use crate::light::{LightTexture, ShadowMode};
use crate::render::{
    BlendTechnique, BlurAxis, ClearOps, ConeVertex, HullVertex, LightUniforms, Rasterizer,
    TargetId, TechniqueDraw, TextureId,
};

/// Separable 5-tap Gaussian.
const BLUR_WEIGHTS: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Stencil value marking lit hull bodies under the illuminated mode.
const BODY_STENCIL: u8 = 1;

#[derive(Debug, Copy, Clone, PartialEq)]
struct RasterState {
    viewport: Viewport,
    scissor: PixelRect,
    view_projection: Mat4,
    cull_mode: CullMode,
}

impl RasterState {
    fn full(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::from_size(width, height),
            scissor: PixelRect::new(0, 0, width, height),
            view_projection: Mat4::IDENTITY,
            cull_mode: CullMode::None,
        }
    }

    /// Pixels a draw or clear may touch.
    #[inline]
    fn clip(&self, surface: &Surface) -> PixelRect {
        self.viewport
            .bounds()
            .intersect(&self.scissor)
            .intersect(&surface.bounds())
    }

    #[inline]
    fn to_pixel(&self, p: Vec2) -> Vec2 {
        project_to_pixel(p, &self.view_projection, &self.viewport)
    }
}

/// CPU implementation of every lightmap technique.
///
/// Slow and exact. Serves headless hosts and as an executable reference for
/// what a GPU backend must produce.
#[derive(Debug)]
pub struct SoftwareRasterizer {
    back_buffer: Surface,
    targets: Vec<Option<Surface>>,
    textures: Vec<LightTexture>,
    bound: Option<TargetId>,
    state: RasterState,
}

impl SoftwareRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back_buffer: Surface::new(width, height),
            targets: Vec::new(),
            textures: Vec::new(),
            bound: None,
            state: RasterState::full(width, height),
        }
    }

    #[inline]
    pub fn back_buffer(&self) -> &Surface {
        &self.back_buffer
    }

    #[inline]
    pub fn back_buffer_mut(&mut self) -> &mut Surface {
        &mut self.back_buffer
    }

    /// A render target or, for `None`, the back buffer.
    pub fn surface(&self, target: Option<TargetId>) -> Result<&Surface> {
        match target {
            None => Ok(&self.back_buffer),
            Some(id) => self
                .targets
                .get(id.0 as usize)
                .and_then(Option::as_ref)
                .ok_or(LightmapError::UnknownTarget(id)),
        }
    }

    fn surface_mut(&mut self, target: Option<TargetId>) -> Result<&mut Surface> {
        match target {
            None => Ok(&mut self.back_buffer),
            Some(id) => self
                .targets
                .get_mut(id.0 as usize)
                .and_then(Option::as_mut)
                .ok_or(LightmapError::UnknownTarget(id)),
        }
    }

    /// The bound surface together with the uploaded textures.
    fn bound_parts(&mut self) -> Result<(&mut Surface, &[LightTexture])> {
        let surface = match self.bound {
            None => &mut self.back_buffer,
            Some(id) => self
                .targets
                .get_mut(id.0 as usize)
                .and_then(Option::as_mut)
                .ok_or(LightmapError::UnknownTarget(id))?,
        };
        Ok((surface, &self.textures))
    }

    /// Copy of the surface behind `source`, so it can be read while the
    /// bound target is written.
    fn snapshot(&self, source: TargetId) -> Result<Surface> {
        self.surface(Some(source)).cloned()
    }

    // ── techniques ────────────────────────────────────────────────────────

    fn draw_shadow(
        &mut self,
        mode: ShadowMode,
        light: &LightUniforms,
        vertices: &[HullVertex],
        indices: &[u32],
    ) -> Result<()> {
        let state = self.state;
        let surface = self.surface_mut(self.bound)?;
        let clip = state.clip(surface);
        let reach = light.range * 2.0;

        let body: Vec<Vec2> = vertices.iter().map(|v| state.to_pixel(v.position())).collect();
        let extruded: Vec<Vec2> = vertices
            .iter()
            .map(|v| {
                let p = v.position();
                let away = p - light.position;
                if v.normal().dot(away) > 0.0 {
                    state.to_pixel(p + away.normalize_or_zero() * reach)
                } else {
                    state.to_pixel(p)
                }
            })
            .collect();

        let alpha = |tri: [u32; 3], w: [f32; 3]| {
            tri.iter()
                .zip(w)
                .map(|(&i, w)| vertices[i as usize].color().a * w)
                .sum::<f32>()
        };

        if mode == ShadowMode::Illuminated {
            for_each_triangle(indices, vertices.len(), |tri| {
                fill_triangle(pick(&body, tri), clip, state.cull_mode, |x, y, _| {
                    surface.set_stencil(x, y, BODY_STENCIL);
                    surface.update_pixel(x, y, |c| c.a = 1.0);
                });
            });
        }

        for_each_triangle(indices, vertices.len(), |tri| {
            fill_triangle(pick(&extruded, tri), clip, state.cull_mode, |x, y, w| {
                if surface.stencil(x, y) != 0 {
                    return;
                }
                let occlusion = alpha(tri, w);
                surface.update_pixel(x, y, |c| c.a = c.a.min(occlusion));
            });
        });

        if mode == ShadowMode::Occluded {
            for_each_triangle(indices, vertices.len(), |tri| {
                fill_triangle(pick(&body, tri), clip, state.cull_mode, |x, y, _| {
                    surface.update_pixel(x, y, |c| c.a = 0.0);
                });
            });
        }
        Ok(())
    }

    fn draw_light(&mut self, light: &LightUniforms, vertices: &[ConeVertex], indices: &[u16]) -> Result<()> {
        let state = self.state;
        let (surface, textures) = self.bound_parts()?;
        let texture = textures
            .get(light.texture.0 as usize)
            .ok_or(LightmapError::UnknownTexture(light.texture))?;
        let clip = state.clip(surface);

        let pixels: Vec<Vec2> = vertices.iter().map(|v| state.to_pixel(v.position())).collect();
        let indices: Vec<u32> = indices.iter().map(|&i| u32::from(i)).collect();

        for_each_triangle(&indices, vertices.len(), |tri| {
            let [a, b, c] = tri.map(|i| vertices[i as usize]);
            fill_triangle(pick(&pixels, tri), clip, state.cull_mode, |x, y, w| {
                let uv = a.texcoord() * w[0] + b.texcoord() * w[1] + c.texcoord() * w[2];
                let tint = lerp3(a.color(), b.color(), c.color(), w);
                let falloff = texture.sample(uv).max(0.0).powf(light.intensity_factor);

                surface.update_pixel(x, y, |dst| {
                    let k = falloff * dst.a;
                    dst.r = (dst.r + tint.r * k).min(1.0);
                    dst.g = (dst.g + tint.g * k).min(1.0);
                    dst.b = (dst.b + tint.b * k).min(1.0);
                });
            });
        });
        Ok(())
    }

    fn draw_alpha_clear(&mut self) -> Result<()> {
        let state = self.state;
        let surface = self.surface_mut(self.bound)?;
        let clip = state.clip(surface);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                surface.update_pixel(x, y, |c| c.a = 1.0);
            }
        }
        Ok(())
    }

    fn draw_blur(&mut self, source: TargetId, axis: BlurAxis, texel_bias: Vec2, intensity: f32) -> Result<()> {
        let src = self.snapshot(source)?;
        let state = self.state;
        let surface = self.surface_mut(self.bound)?;
        let clip = state.clip(surface);

        let step = axis.direction() * intensity / src.size();
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let uv = Vec2::new(x as f32, y as f32) / src.size() + texel_bias;
                let mut sum = [0.0f32; 4];
                for (k, weight) in BLUR_WEIGHTS.iter().enumerate() {
                    let offset = k as f32 - 2.0;
                    let s = src.sample(uv + step * offset).to_array();
                    for (acc, v) in sum.iter_mut().zip(s) {
                        *acc += v * weight;
                    }
                }
                surface.set_pixel(x, y, Color::from_array(sum));
            }
        }
        Ok(())
    }

    fn draw_composite(&mut self, source: TargetId, blend: BlendTechnique, texel_bias: Vec2) -> Result<()> {
        let src = self.snapshot(source)?;
        let state = self.state;
        let surface = self.surface_mut(self.bound)?;
        let clip = state.clip(surface);

        let origin = state.viewport.origin();
        let size = state.viewport.size().max(Vec2::ONE);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let uv = (Vec2::new(x as f32, y as f32) - origin) / size + texel_bias;
                let s = src.sample(uv);
                surface.update_pixel(x, y, |d| match blend {
                    BlendTechnique::Add => {
                        d.r = (d.r + s.r).min(1.0);
                        d.g = (d.g + s.g).min(1.0);
                        d.b = (d.b + s.b).min(1.0);
                    }
                    BlendTechnique::Multiply => {
                        d.r *= s.r;
                        d.g *= s.g;
                        d.b *= s.b;
                    }
                });
            }
        }
        Ok(())
    }

    fn draw_wireframe(&mut self, vertices: &[HullVertex], indices: &[u32]) -> Result<()> {
        let state = self.state;
        let surface = self.surface_mut(self.bound)?;
        let clip = state.clip(surface);
        let pixels: Vec<Vec2> = vertices.iter().map(|v| state.to_pixel(v.position())).collect();

        for_each_triangle(indices, vertices.len(), |tri| {
            let [a, b, c] = pick(&pixels, tri);
            for (from, to) in [(a, b), (b, c), (c, a)] {
                draw_line(from, to, clip, |x, y| surface.set_pixel(x, y, Color::WHITE));
            }
        });
        Ok(())
    }
}

/// Visits complete triangles whose indices are all in range.
fn for_each_triangle(indices: &[u32], vertex_count: usize, mut f: impl FnMut([u32; 3])) {
    for tri in indices.chunks_exact(3) {
        let tri = [tri[0], tri[1], tri[2]];
        if tri.iter().all(|&i| (i as usize) < vertex_count) {
            f(tri);
        }
    }
}

#[inline]
fn pick(points: &[Vec2], tri: [u32; 3]) -> [Vec2; 3] {
    tri.map(|i| points[i as usize])
}

#[inline]
fn lerp3(a: Color, b: Color, c: Color, w: [f32; 3]) -> Color {
    Color::new(
        a.r * w[0] + b.r * w[1] + c.r * w[2],
        a.g * w[0] + b.g * w[1] + c.g * w[2],
        a.b * w[0] + b.b * w[1] + c.b * w[2],
        a.a * w[0] + b.a * w[1] + c.a * w[2],
    )
}

impl Rasterizer for SoftwareRasterizer {
    fn create_target(&mut self, width: u32, height: u32) -> Result<TargetId> {
        if width == 0 || height == 0 {
            return Err(LightmapError::EmptyTarget { width, height });
        }
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(Some(Surface::new(width, height)));
        debug!("software target {:?} created at {}x{}", id, width, height);
        Ok(id)
    }

    fn dispose_target(&mut self, target: TargetId) {
        if let Some(slot) = self.targets.get_mut(target.0 as usize) {
            *slot = None;
        }
        if self.bound == Some(target) {
            self.bound = None;
        }
    }

    fn target_size(&self, target: Option<TargetId>) -> Result<(u32, u32)> {
        let s = self.surface(target)?;
        Ok((s.width(), s.height()))
    }

    fn bind_target(&mut self, target: Option<TargetId>) -> Result<()> {
        let (width, height) = self.target_size(target)?;
        self.bound = target;
        self.state = RasterState {
            view_projection: self.state.view_projection,
            cull_mode: self.state.cull_mode,
            ..RasterState::full(width, height)
        };
        Ok(())
    }

    fn bound_target(&self) -> Option<TargetId> {
        self.bound
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.state.viewport = viewport;
    }

    fn set_view_projection(&mut self, matrix: Mat4) {
        self.state.view_projection = matrix;
    }

    fn set_scissor(&mut self, rect: PixelRect) {
        self.state.scissor = rect;
    }

    fn set_cull_mode(&mut self, mode: CullMode) {
        self.state.cull_mode = mode;
    }

    fn clear(&mut self, ops: ClearOps) {
        let state = self.state;
        if let Ok(surface) = self.surface_mut(self.bound) {
            let clip = state.clip(surface);
            surface.clear_rect(clip, ops.color, ops.stencil);
        }
    }

    fn upload_texture(&mut self, texture: &LightTexture) -> Result<TextureId> {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(texture.clone());
        Ok(id)
    }

    fn submit(&mut self, draw: TechniqueDraw<'_>) -> Result<()> {
        match draw {
            TechniqueDraw::Shadow { mode, light, vertices, indices } => {
                self.draw_shadow(mode, &light, vertices, indices)
            }
            TechniqueDraw::Light { light, vertices, indices } => self.draw_light(&light, vertices, indices),
            TechniqueDraw::AlphaClear => self.draw_alpha_clear(),
            TechniqueDraw::Blur { source, axis, texel_bias, intensity } => {
                self.draw_blur(source, axis, texel_bias, intensity)
            }
            TechniqueDraw::Composite { source, blend, texel_bias } => {
                self.draw_composite(source, blend, texel_bias)
            }
            TechniqueDraw::DebugWireframe { vertices, indices } => self.draw_wireframe(vertices, indices),
        }
    }
}
