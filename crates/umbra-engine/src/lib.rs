//! Umbra engine crate.
//!
//! 2D point-light lightmaps: shadow hulls, light cones, per-light scissoring
//! and the pass machinery that drives a [`render::Rasterizer`]. The
//! [`software`] module provides a CPU rasterizer for headless use and tests.

pub mod config;
pub mod coords;
pub mod error;
pub mod hull;
pub mod light;
pub mod logging;
pub mod render;
pub mod software;

pub use config::{CullMode, LightmapConfig, ResolutionScale};
pub use error::{LightmapError, Result};
