//! Lightmap rendering pipeline.
//!
//! The pipeline never shades pixels itself. It builds vertex batches and
//! hands them to a [`Rasterizer`] as [`TechniqueDraw`]s:
//!
//! - [`LightPass`]: one light, shadow → light → alpha clear.
//! - [`LightmapCompositor`]: lightmap targets, every light, blur, composite.
//! - [`PassScheduler`]: the compositor once per viewport in a frame.
//!
//! Convention:
//! - Geometry is in world space; the rasterizer applies the view-projection.
//! - Scissor and viewport rectangles are in target pixels (top-left origin).

mod arena;
mod compositor;
pub mod cull;
mod light_pass;
mod rasterizer;
mod scheduler;
mod technique;
mod vertex;

#[cfg(test)]
pub(crate) mod recording;

pub use arena::{ConeBatch, GeometryArena, HullBatch};
pub use compositor::{LightmapCompositor, LightmapTargets, PassView, PrepareStats};
pub use light_pass::{LightPass, LightPassState, LightPassStats};
pub use rasterizer::{ClearOps, Rasterizer, TargetId, TextureId};
pub use scheduler::{split_quadrants, FrameStats, LightmapPass, PassContext, PassHook, PassScheduler};
pub use technique::{BlendTechnique, BlurAxis, LightUniforms, Technique, TechniqueDraw};
pub use vertex::{ConeVertex, HullVertex};
