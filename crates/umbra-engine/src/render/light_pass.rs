use glam::Mat4;
use log::trace;

use super::arena::GeometryArena;
use super::cull::{hull_in_range, scissor_for_light};
use super::rasterizer::{ClearOps, Rasterizer};
use super::technique::TechniqueDraw;
use crate::coords::{PixelRect, Viewport};
use crate::error::Result;
use crate::hull::ShadowHull;
use crate::light::Light;

/// Progress of one light through its pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum LightPassState {
    #[default]
    Idle,
    HullsGathered,
    ShadowDrawn,
    LightDrawn,
    AlphaCleared,
}

/// What one light pass emitted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LightPassStats {
    pub hulls_gathered: usize,
    pub hull_vertices: usize,
    pub hull_indices: usize,
    pub cone_vertices: usize,
    pub cone_indices: usize,
    pub scissor: PixelRect,
}

/// Draws a single light into the bound lightmap target.
///
/// Every transition is one call to [`LightPass::step`]:
///
/// ```text
/// Idle ─scissor, clear stencil, gather─▶ HullsGathered ─shadow─▶ ShadowDrawn
///      ─light─▶ LightDrawn ─alpha clear─▶ AlphaCleared ─▶ Idle (finished)
/// ```
///
/// The arena's light batches are reset on entry, so nothing carries over
/// from the previous light.
#[derive(Debug)]
pub struct LightPass<'a> {
    light: &'a Light,
    viewport: Viewport,
    view_projection: Mat4,
    state: LightPassState,
    finished: bool,
    stats: LightPassStats,
}

impl<'a> LightPass<'a> {
    pub fn new(light: &'a Light, viewport: Viewport, view_projection: Mat4) -> Self {
        Self {
            light,
            viewport,
            view_projection,
            state: LightPassState::Idle,
            finished: false,
            stats: LightPassStats::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> LightPassState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn stats(&self) -> LightPassStats {
        self.stats
    }

    /// Performs the next transition and returns the new state. A finished
    /// pass stays `Idle` and issues nothing.
    pub fn step<R: Rasterizer + ?Sized>(
        &mut self,
        r: &mut R,
        arena: &mut GeometryArena,
        hulls: &[ShadowHull],
    ) -> Result<LightPassState> {
        let next = match self.state {
            LightPassState::Idle if self.finished => return Ok(LightPassState::Idle),
            LightPassState::Idle => {
                self.gather(r, arena, hulls);
                LightPassState::HullsGathered
            }
            LightPassState::HullsGathered => {
                r.submit(TechniqueDraw::Shadow {
                    mode: self.light.shadow_mode(),
                    light: self.light.uniforms(),
                    vertices: arena.hulls.vertices(),
                    indices: arena.hulls.indices(),
                })?;
                LightPassState::ShadowDrawn
            }
            LightPassState::ShadowDrawn => {
                arena.cone.push_light(self.light);
                self.stats.cone_vertices = arena.cone.vertices().len();
                self.stats.cone_indices = arena.cone.indices().len();

                r.submit(TechniqueDraw::Light {
                    light: self.light.uniforms(),
                    vertices: arena.cone.vertices(),
                    indices: arena.cone.indices(),
                })?;
                LightPassState::LightDrawn
            }
            LightPassState::LightDrawn => {
                r.submit(TechniqueDraw::AlphaClear)?;
                LightPassState::AlphaCleared
            }
            LightPassState::AlphaCleared => {
                self.finished = true;
                LightPassState::Idle
            }
        };

        trace!("light pass: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(next)
    }

    /// Steps until finished.
    pub fn run<R: Rasterizer + ?Sized>(
        mut self,
        r: &mut R,
        arena: &mut GeometryArena,
        hulls: &[ShadowHull],
    ) -> Result<LightPassStats> {
        while !self.finished {
            self.step(r, arena, hulls)?;
        }
        Ok(self.stats)
    }

    fn gather<R: Rasterizer + ?Sized>(&mut self, r: &mut R, arena: &mut GeometryArena, hulls: &[ShadowHull]) {
        let scissor = scissor_for_light(self.light, &self.view_projection, &self.viewport);
        r.set_scissor(scissor);
        r.clear(ClearOps::stencil(0));

        arena.reset_light();
        let mut gathered = 0;
        for hull in hulls.iter().filter(|h| hull_in_range(self.light, h)) {
            arena.hulls.push_hull(hull);
            gathered += 1;
        }

        self.stats = LightPassStats {
            hulls_gathered: gathered,
            hull_vertices: arena.hulls.vertices().len(),
            hull_indices: arena.hulls.indices().len(),
            scissor,
            ..LightPassStats::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{Call, RecordingRasterizer};
    use crate::render::{Technique, TextureId};
    use crate::light::ShadowMode;
    use glam::Vec2;

    fn light(mode: ShadowMode) -> Light {
        Light::new(TextureId(0))
            .with_range(10.0)
            .with_shadow_mode(mode)
    }

    fn ortho() -> Mat4 {
        Mat4::orthographic_rh(-50.0, 50.0, -50.0, 50.0, -1.0, 1.0)
    }

    // ── transitions ───────────────────────────────────────────────────────

    #[test]
    fn steps_through_every_state_in_order() {
        let mut r = RecordingRasterizer::new(100, 100);
        let mut arena = GeometryArena::new();
        let light = light(ShadowMode::Solid);
        let mut pass = LightPass::new(&light, Viewport::from_size(100, 100), ortho());

        let mut states = Vec::new();
        while !pass.is_finished() {
            states.push(pass.step(&mut r, &mut arena, &[]).unwrap());
        }

        assert_eq!(
            states,
            [
                LightPassState::HullsGathered,
                LightPassState::ShadowDrawn,
                LightPassState::LightDrawn,
                LightPassState::AlphaCleared,
                LightPassState::Idle,
            ]
        );

        let calls_before = r.calls.len();
        assert_eq!(pass.step(&mut r, &mut arena, &[]).unwrap(), LightPassState::Idle);
        assert_eq!(r.calls.len(), calls_before);
    }

    #[test]
    fn scissor_and_stencil_clear_precede_drawing() {
        let mut r = RecordingRasterizer::new(100, 100);
        let mut arena = GeometryArena::new();
        let light = light(ShadowMode::Solid);
        let vp = Viewport::from_size(100, 100);
        let stats = LightPass::new(&light, vp, ortho())
            .run(&mut r, &mut arena, &[])
            .unwrap();

        let expected = scissor_for_light(&light, &ortho(), &vp);
        assert_eq!(stats.scissor, expected);
        assert!(expected.width >= 19 && expected.width <= 21);
        assert_eq!(r.calls[0], Call::Scissor(expected));
        assert_eq!(r.calls[1], Call::Clear(ClearOps::stencil(0)));
        assert_eq!(
            r.submissions(),
            [Technique::ShadowSolid, Technique::Light, Technique::AlphaClear]
        );
    }

    #[test]
    fn shadow_technique_follows_mode() {
        for (mode, technique) in [
            (ShadowMode::Solid, Technique::ShadowSolid),
            (ShadowMode::Illuminated, Technique::ShadowIlluminated),
            (ShadowMode::Occluded, Technique::ShadowOccluded),
        ] {
            let mut r = RecordingRasterizer::new(10, 10);
            let light = light(mode);
            LightPass::new(&light, Viewport::from_size(10, 10), ortho())
                .run(&mut r, &mut GeometryArena::new(), &[])
                .unwrap();
            assert_eq!(r.submissions()[0], technique);
        }
    }

    // ── gathering ─────────────────────────────────────────────────────────

    #[test]
    fn gathers_only_hulls_in_range() {
        let hulls = [
            ShadowHull::circle(2.0, 8).unwrap().with_position(Vec2::new(5.0, 0.0)),
            ShadowHull::circle(2.0, 8).unwrap().with_position(Vec2::new(20.0, 0.0)),
        ];
        let mut r = RecordingRasterizer::new(100, 100);
        let light = light(ShadowMode::Solid);
        let stats = LightPass::new(&light, Viewport::from_size(100, 100), ortho())
            .run(&mut r, &mut GeometryArena::new(), &hulls)
            .unwrap();

        assert_eq!(stats.hulls_gathered, 1);
        assert_eq!(stats.hull_vertices, 16);
        assert_eq!(stats.hull_indices, 42);
        assert_eq!(stats.cone_vertices, 4);
        assert!(r.calls.contains(&Call::Submit {
            technique: Technique::ShadowSolid,
            vertices: 16,
            indices: 42,
        }));
    }

    #[test]
    fn zero_hulls_still_runs_every_technique() {
        let mut r = RecordingRasterizer::new(10, 10);
        let light = light(ShadowMode::Illuminated);
        let stats = LightPass::new(&light, Viewport::from_size(10, 10), ortho())
            .run(&mut r, &mut GeometryArena::new(), &[])
            .unwrap();

        assert_eq!(stats.hulls_gathered, 0);
        assert_eq!(r.submissions().len(), 3);
        assert!(r.calls.contains(&Call::Submit {
            technique: Technique::ShadowIlluminated,
            vertices: 0,
            indices: 0,
        }));
    }

    #[test]
    fn batches_do_not_leak_between_lights() {
        let hulls = [ShadowHull::circle(1.0, 8).unwrap()];
        let near = light(ShadowMode::Solid);
        let far = light(ShadowMode::Solid).with_position(Vec2::new(40.0, 0.0));

        let mut r = RecordingRasterizer::new(100, 100);
        let mut arena = GeometryArena::new();
        let vp = Viewport::from_size(100, 100);
        let first = LightPass::new(&near, vp, ortho()).run(&mut r, &mut arena, &hulls).unwrap();
        let second = LightPass::new(&far, vp, ortho()).run(&mut r, &mut arena, &hulls).unwrap();

        assert_eq!(first.hulls_gathered, 1);
        assert_eq!(second.hulls_gathered, 0);
        assert_eq!(second.hull_vertices, 0);
    }
}
