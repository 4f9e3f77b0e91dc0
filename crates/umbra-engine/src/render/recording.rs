//! Rasterizer double that records every call, for pipeline ordering tests.

use glam::Mat4;

use super::rasterizer::{ClearOps, Rasterizer, TargetId, TextureId};
use super::technique::{Technique, TechniqueDraw};
use crate::config::CullMode;
use crate::coords::{PixelRect, Viewport};
use crate::error::{LightmapError, Result};
use crate::light::LightTexture;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateTarget { id: TargetId, width: u32, height: u32 },
    DisposeTarget(TargetId),
    Bind(Option<TargetId>),
    Viewport(Viewport),
    ViewProjection(Mat4),
    Scissor(PixelRect),
    CullMode(CullMode),
    Clear(ClearOps),
    Upload(TextureId),
    Submit { technique: Technique, vertices: usize, indices: usize },
}

#[derive(Debug)]
pub(crate) struct RecordingRasterizer {
    pub calls: Vec<Call>,
    pub back_buffer: (u32, u32),
    targets: Vec<Option<(u32, u32)>>,
    bound: Option<TargetId>,
    textures: u32,
}

impl RecordingRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            back_buffer: (width, height),
            targets: Vec::new(),
            bound: None,
            textures: 0,
        }
    }

    pub fn live_targets(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    pub fn submissions(&self) -> Vec<Technique> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Submit { technique, .. } => Some(*technique),
                _ => None,
            })
            .collect()
    }
}

impl Rasterizer for RecordingRasterizer {
    fn create_target(&mut self, width: u32, height: u32) -> Result<TargetId> {
        if width == 0 || height == 0 {
            return Err(LightmapError::EmptyTarget { width, height });
        }
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(Some((width, height)));
        self.calls.push(Call::CreateTarget { id, width, height });
        Ok(id)
    }

    fn dispose_target(&mut self, target: TargetId) {
        if let Some(slot) = self.targets.get_mut(target.0 as usize) {
            *slot = None;
        }
        self.calls.push(Call::DisposeTarget(target));
    }

    fn target_size(&self, target: Option<TargetId>) -> Result<(u32, u32)> {
        match target {
            None => Ok(self.back_buffer),
            Some(id) => self
                .targets
                .get(id.0 as usize)
                .copied()
                .flatten()
                .ok_or(LightmapError::UnknownTarget(id)),
        }
    }

    fn bind_target(&mut self, target: Option<TargetId>) -> Result<()> {
        self.target_size(target)?;
        self.bound = target;
        self.calls.push(Call::Bind(target));
        Ok(())
    }

    fn bound_target(&self) -> Option<TargetId> {
        self.bound
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(Call::Viewport(viewport));
    }

    fn set_view_projection(&mut self, matrix: Mat4) {
        self.calls.push(Call::ViewProjection(matrix));
    }

    fn set_scissor(&mut self, rect: PixelRect) {
        self.calls.push(Call::Scissor(rect));
    }

    fn set_cull_mode(&mut self, mode: CullMode) {
        self.calls.push(Call::CullMode(mode));
    }

    fn clear(&mut self, ops: ClearOps) {
        self.calls.push(Call::Clear(ops));
    }

    fn upload_texture(&mut self, _texture: &LightTexture) -> Result<TextureId> {
        let id = TextureId(self.textures);
        self.textures += 1;
        self.calls.push(Call::Upload(id));
        Ok(id)
    }

    fn submit(&mut self, draw: TechniqueDraw<'_>) -> Result<()> {
        let (vertices, indices) = match draw {
            TechniqueDraw::Shadow { vertices, indices, .. } => (vertices.len(), indices.len()),
            TechniqueDraw::Light { vertices, indices, .. } => (vertices.len(), indices.len()),
            TechniqueDraw::DebugWireframe { vertices, indices } => (vertices.len(), indices.len()),
            TechniqueDraw::Blur { source, .. } | TechniqueDraw::Composite { source, .. } => {
                self.target_size(Some(source))?;
                (0, 0)
            }
            TechniqueDraw::AlphaClear => (0, 0),
        };
        self.calls.push(Call::Submit {
            technique: draw.technique(),
            vertices,
            indices,
        });
        Ok(())
    }
}
