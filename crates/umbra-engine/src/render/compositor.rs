use std::ops::AddAssign;

use glam::{Mat4, Vec2};
use log::{debug, warn};

use super::arena::GeometryArena;
use super::cull::{hull_in_range, view_bounds};
use super::light_pass::{LightPass, LightPassStats};
use super::rasterizer::{ClearOps, Rasterizer, TargetId};
use super::technique::{BlendTechnique, BlurAxis, TechniqueDraw};
use crate::config::{CullMode, LightmapConfig, ResolutionScale};
use crate::coords::{BoundingRect, Color, PixelRect, Viewport};
use crate::error::{LightmapError, Result};
use crate::hull::ShadowHull;
use crate::light::Light;

/// The lightmap render target and its blur scratch target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LightmapTargets {
    pub primary: TargetId,
    pub scratch: TargetId,
    pub width: u32,
    pub height: u32,
}

impl LightmapTargets {
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Region and camera of the next `prepare`. The viewport is in back-buffer
/// pixels; the compositor scales it into lightmap pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassView {
    pub viewport: Viewport,
    pub view_projection: Mat4,
}

impl PassView {
    pub const fn new(viewport: Viewport, view_projection: Mat4) -> Self {
        Self { viewport, view_projection }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub lights_drawn: usize,
    pub lights_culled: usize,
    pub hulls_gathered: usize,
    pub hull_vertices: usize,
    pub cone_vertices: usize,
}

impl AddAssign for PrepareStats {
    fn add_assign(&mut self, rhs: Self) {
        self.lights_drawn += rhs.lights_drawn;
        self.lights_culled += rhs.lights_culled;
        self.hulls_gathered += rhs.hulls_gathered;
        self.hull_vertices += rhs.hull_vertices;
        self.cone_vertices += rhs.cone_vertices;
    }
}

impl AddAssign<LightPassStats> for PrepareStats {
    fn add_assign(&mut self, rhs: LightPassStats) {
        self.lights_drawn += 1;
        self.hulls_gathered += rhs.hulls_gathered;
        self.hull_vertices += rhs.hull_vertices;
        self.cone_vertices += rhs.cone_vertices;
    }
}

/// Owns the lightmap targets and drives lights into them.
///
/// Lifecycle:
/// - [`LightmapCompositor::new`] allocates targets sized to the back buffer
///   divided by the resolution scale.
/// - [`LightmapCompositor::on_resize`] and scale changes dispose both targets
///   before allocating replacements.
/// - Per pass: [`set_view`](Self::set_view), then [`prepare`](Self::prepare).
/// - Per frame: [`composite`](Self::composite) onto the bound destination.
#[derive(Debug)]
pub struct LightmapCompositor {
    config: LightmapConfig,
    device_size: (u32, u32),
    targets: Option<LightmapTargets>,
    view: PassView,
    arena: GeometryArena,
}

impl LightmapCompositor {
    pub fn new<R: Rasterizer + ?Sized>(
        r: &mut R,
        config: LightmapConfig,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let mut compositor = Self {
            config: LightmapConfig {
                blur: config.blur_intensity(),
                ..config
            },
            device_size: (width, height),
            targets: None,
            view: PassView::new(Viewport::from_size(width, height), Mat4::IDENTITY),
            arena: GeometryArena::new(),
        };
        compositor.recreate_targets(r)?;
        Ok(compositor)
    }

    #[inline]
    pub fn config(&self) -> &LightmapConfig {
        &self.config
    }

    #[inline]
    pub fn targets(&self) -> Option<LightmapTargets> {
        self.targets
    }

    /// The texture a host samples to read the finished lightmap.
    #[inline]
    pub fn lightmap_target(&self) -> Option<TargetId> {
        self.targets.map(|t| t.primary)
    }

    #[inline]
    pub fn view(&self) -> PassView {
        self.view
    }

    #[inline]
    pub fn set_view(&mut self, view: PassView) {
        self.view = view;
    }

    /// Lightmap size for the current device size and scale, at least 1×1.
    pub fn lightmap_size(&self) -> (u32, u32) {
        let d = self.config.resolution_scale.divisor();
        let (w, h) = self.device_size;
        ((w / d).max(1), (h / d).max(1))
    }

    // ── configuration ─────────────────────────────────────────────────────

    /// Recreates the targets when the scale actually changes.
    pub fn set_resolution_scale<R: Rasterizer + ?Sized>(
        &mut self,
        r: &mut R,
        scale: ResolutionScale,
    ) -> Result<()> {
        if scale == self.config.resolution_scale && self.targets.is_some() {
            return Ok(());
        }
        debug!("lightmap scale {} -> {}", self.config.resolution_scale, scale);
        self.config.resolution_scale = scale;
        self.recreate_targets(r)
    }

    /// Negative values disable the blur.
    pub fn set_blur(&mut self, blur: f32) {
        self.config.blur = blur;
        self.config.blur = self.config.blur_intensity();
        debug!("lightmap blur = {}", self.config.blur);
    }

    #[inline]
    pub fn set_ambient(&mut self, ambient: Color) {
        self.config.ambient = ambient;
    }

    #[inline]
    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.config.cull_mode = mode;
    }

    #[inline]
    pub fn set_debug_wireframe(&mut self, enabled: bool) {
        self.config.debug_wireframe = enabled;
    }

    // ── target lifecycle ──────────────────────────────────────────────────

    /// Device size changed: disposes both targets, then allocates new ones.
    pub fn on_resize<R: Rasterizer + ?Sized>(&mut self, r: &mut R, width: u32, height: u32) -> Result<()> {
        debug!("lightmap resize {}x{}", width, height);
        self.device_size = (width, height);
        self.recreate_targets(r)
    }

    pub fn dispose<R: Rasterizer + ?Sized>(&mut self, r: &mut R) {
        if let Some(targets) = self.targets.take() {
            r.dispose_target(targets.primary);
            r.dispose_target(targets.scratch);
        }
    }

    fn recreate_targets<R: Rasterizer + ?Sized>(&mut self, r: &mut R) -> Result<()> {
        self.dispose(r);

        let (width, height) = self.lightmap_size();
        let primary = r.create_target(width, height)?;
        let scratch = match r.create_target(width, height) {
            Ok(scratch) => scratch,
            Err(e) => {
                r.dispose_target(primary);
                return Err(e);
            }
        };

        self.targets = Some(LightmapTargets { primary, scratch, width, height });
        debug!(
            "lightmap targets {:?}/{:?} at {}x{} ({})",
            primary, scratch, width, height, self.config.resolution_scale
        );
        Ok(())
    }

    // ── per pass ──────────────────────────────────────────────────────────

    /// Renders every light into the lightmap region of the current view.
    ///
    /// The previously bound target is restored afterwards, also on error.
    pub fn prepare<R: Rasterizer + ?Sized>(
        &mut self,
        r: &mut R,
        lights: &[Light],
        hulls: &[ShadowHull],
    ) -> Result<PrepareStats> {
        let targets = self.targets.ok_or(LightmapError::TargetsUnavailable)?;

        let previous = r.bound_target();
        r.bind_target(Some(targets.primary))?;
        let drawn = self.draw_lights(r, &targets, lights, hulls);
        let restored = r.bind_target(previous);

        let stats = drawn?;
        restored?;
        Ok(stats)
    }

    fn pass_viewport(&self, targets: &LightmapTargets) -> Viewport {
        self.view
            .viewport
            .scaled_down(self.config.resolution_scale.divisor())
            .clamped_to(targets.width, targets.height)
    }

    fn draw_lights<R: Rasterizer + ?Sized>(
        &mut self,
        r: &mut R,
        targets: &LightmapTargets,
        lights: &[Light],
        hulls: &[ShadowHull],
    ) -> Result<PrepareStats> {
        let viewport = self.pass_viewport(targets);
        let matrix = self.view.view_projection;

        r.set_viewport(viewport);
        r.set_view_projection(matrix);
        r.set_cull_mode(self.config.cull_mode);
        r.set_scissor(viewport.bounds());

        // Alpha is the per-light occlusion mask and must start fully lit.
        r.clear(ClearOps::color(self.config.ambient.with_alpha(1.0)).with_stencil(0));

        let view = view_bounds(&matrix);
        if view.is_none() {
            warn!("view-projection matrix is not invertible, view culling disabled");
        }

        self.arena.reset_pass();
        let mut stats = PrepareStats::default();
        for light in lights {
            if !light_visible(light, view.as_ref()) {
                stats.lights_culled += 1;
                continue;
            }
            stats += LightPass::new(light, viewport, matrix).run(r, &mut self.arena, hulls)?;
        }

        r.set_scissor(viewport.bounds());

        if self.config.debug_wireframe {
            self.draw_wireframe(r, lights, hulls, view.as_ref())?;
        }

        let blur = self.config.blur_intensity();
        if blur > 0.0 {
            self.blur(r, targets, viewport, blur)?;
        }

        Ok(stats)
    }

    fn draw_wireframe<R: Rasterizer + ?Sized>(
        &mut self,
        r: &mut R,
        lights: &[Light],
        hulls: &[ShadowHull],
        view: Option<&BoundingRect>,
    ) -> Result<()> {
        let wireframe = &mut self.arena.wireframe;
        wireframe.clear();

        let visible = move || lights.iter().filter(move |l| light_visible(l, view));
        for light in visible() {
            wireframe.push_rect(&light.bounds(), Color::WHITE);
        }
        for hull in hulls {
            if visible().any(|l| hull_in_range(l, hull)) {
                wireframe.push_hull(hull);
            }
        }

        r.submit(TechniqueDraw::DebugWireframe {
            vertices: wireframe.vertices(),
            indices: wireframe.indices(),
        })
    }

    /// Horizontal pass primary → scratch, vertical pass scratch → primary.
    fn blur<R: Rasterizer + ?Sized>(
        &self,
        r: &mut R,
        targets: &LightmapTargets,
        viewport: Viewport,
        intensity: f32,
    ) -> Result<()> {
        let texel_bias = self.config.resolution_scale.texel_bias(targets.size());

        for (destination, source, axis) in [
            (targets.scratch, targets.primary, BlurAxis::Horizontal),
            (targets.primary, targets.scratch, BlurAxis::Vertical),
        ] {
            r.bind_target(Some(destination))?;
            r.set_viewport(viewport);
            r.set_scissor(viewport.bounds());
            r.submit(TechniqueDraw::Blur {
                source,
                axis,
                texel_bias,
                intensity,
            })?;
        }
        Ok(())
    }

    // ── per frame ─────────────────────────────────────────────────────────

    /// Blends the lightmap over the whole bound destination.
    pub fn composite<R: Rasterizer + ?Sized>(&self, r: &mut R, blend: BlendTechnique) -> Result<()> {
        let targets = self.targets.ok_or(LightmapError::TargetsUnavailable)?;

        let (width, height) = r.target_size(r.bound_target())?;
        r.set_viewport(Viewport::from_size(width, height));
        r.set_scissor(PixelRect::new(0, 0, width, height));

        let texel_bias = self
            .config
            .resolution_scale
            .texel_bias(Vec2::new(width as f32, height as f32));

        r.submit(TechniqueDraw::Composite {
            source: targets.primary,
            blend,
            texel_bias,
        })
    }
}

/// Lights that are on and whose bounds meet the view (when known).
fn light_visible(light: &Light, view: Option<&BoundingRect>) -> bool {
    light.is_on() && view.is_none_or(|v| v.intersects(&light.bounds()))
}
