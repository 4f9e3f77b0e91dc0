use std::fmt;

use glam::Mat4;
use log::trace;

use super::compositor::{LightmapCompositor, PassView, PrepareStats};
use super::rasterizer::Rasterizer;
use crate::coords::Viewport;
use crate::error::Result;
use crate::hull::ShadowHull;
use crate::light::Light;

/// Read-only view of the pass a hook is called for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassContext {
    pub index: usize,
    pub viewport: Viewport,
    pub view_projection: Mat4,
}

pub type PassHook<'h> = Box<dyn FnMut(&PassContext) + 'h>;

/// One region of the frame rendered with its own camera.
pub struct LightmapPass<'h> {
    viewport: Viewport,
    view_projection: Mat4,
    on_start: Option<PassHook<'h>>,
    on_running: Option<PassHook<'h>>,
    on_complete: Option<PassHook<'h>>,
}

impl<'h> LightmapPass<'h> {
    pub fn new(viewport: Viewport, view_projection: Mat4) -> Self {
        Self {
            viewport,
            view_projection,
            on_start: None,
            on_running: None,
            on_complete: None,
        }
    }

    pub fn on_start(mut self, hook: impl FnMut(&PassContext) + 'h) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    pub fn on_running(mut self, hook: impl FnMut(&PassContext) + 'h) -> Self {
        self.on_running = Some(Box::new(hook));
        self
    }

    pub fn on_complete(mut self, hook: impl FnMut(&PassContext) + 'h) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }
}

impl fmt::Debug for LightmapPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightmapPass")
            .field("viewport", &self.viewport)
            .field("view_projection", &self.view_projection)
            .field("on_start", &self.on_start.is_some())
            .field("on_running", &self.on_running.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub passes: usize,
    pub lights: PrepareStats,
}

/// Runs a frame's passes strictly in order.
#[derive(Debug, Default)]
pub struct PassScheduler {
    frame_index: u64,
}

impl PassScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames run so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// For each pass: start hook, bind view, running hook, prepare,
    /// complete hook. An empty sequence draws nothing.
    pub fn run_frame<'h, R: Rasterizer + ?Sized>(
        &mut self,
        r: &mut R,
        compositor: &mut LightmapCompositor,
        passes: impl IntoIterator<Item = LightmapPass<'h>>,
        lights: &[Light],
        hulls: &[ShadowHull],
    ) -> Result<FrameStats> {
        let mut stats = FrameStats {
            frame: self.frame_index,
            ..FrameStats::default()
        };

        for (index, mut pass) in passes.into_iter().enumerate() {
            let ctx = PassContext {
                index,
                viewport: pass.viewport,
                view_projection: pass.view_projection,
            };
            trace!("pass {} start {:?}", index, ctx.viewport);

            if let Some(hook) = pass.on_start.as_mut() {
                hook(&ctx);
            }

            compositor.set_view(PassView::new(ctx.viewport, ctx.view_projection));

            if let Some(hook) = pass.on_running.as_mut() {
                hook(&ctx);
            }

            stats.lights += compositor.prepare(r, lights, hulls)?;
            stats.passes += 1;

            if let Some(hook) = pass.on_complete.as_mut() {
                hook(&ctx);
            }
        }

        self.frame_index += 1;
        Ok(stats)
    }
}

/// Splits `width × height` into a 2×2 grid of viewports, row-major from the
/// top-left.
pub fn split_quadrants(width: u32, height: u32) -> [Viewport; 4] {
    let (hw, hh) = (width / 2, height / 2);
    [
        Viewport::new(0, 0, hw, hh),
        Viewport::new(hw, 0, width - hw, hh),
        Viewport::new(0, hh, hw, height - hh),
        Viewport::new(hw, hh, width - hw, height - hh),
    ]
}
