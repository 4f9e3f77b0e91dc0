use glam::Mat4;

use super::technique::TechniqueDraw;
use crate::config::CullMode;
use crate::coords::{Color, PixelRect, Viewport};
use crate::error::Result;
use crate::light::LightTexture;

/// Handle to an off-screen render target owned by a [`Rasterizer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// Handle to a texture uploaded to a [`Rasterizer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Which planes a [`Rasterizer::clear`] touches. `None` leaves a plane alone.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClearOps {
    pub color: Option<Color>,
    pub stencil: Option<u8>,
}

impl ClearOps {
    pub const fn color(color: Color) -> Self {
        Self { color: Some(color), stencil: None }
    }

    pub const fn stencil(value: u8) -> Self {
        Self { color: None, stencil: Some(value) }
    }

    pub const fn with_stencil(mut self, value: u8) -> Self {
        self.stencil = Some(value);
        self
    }
}

/// The graphics device the lightmap pipeline drives.
///
/// Target `None` is the host's back buffer. Binding a target resets the
/// viewport and scissor to cover it. Clears honor the current viewport and
/// scissor.
pub trait Rasterizer {
    fn create_target(&mut self, width: u32, height: u32) -> Result<TargetId>;
    fn dispose_target(&mut self, target: TargetId);
    fn target_size(&self, target: Option<TargetId>) -> Result<(u32, u32)>;

    fn bind_target(&mut self, target: Option<TargetId>) -> Result<()>;
    fn bound_target(&self) -> Option<TargetId>;

    fn set_viewport(&mut self, viewport: Viewport);
    fn set_view_projection(&mut self, matrix: Mat4);
    fn set_scissor(&mut self, rect: PixelRect);
    fn set_cull_mode(&mut self, mode: CullMode);

    fn clear(&mut self, ops: ClearOps);
    fn upload_texture(&mut self, texture: &LightTexture) -> Result<TextureId>;
    fn submit(&mut self, draw: TechniqueDraw<'_>) -> Result<()>;
}
