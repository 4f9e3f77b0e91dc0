//! CPU reference backend.

mod raster;
mod rasterizer;
mod surface;

pub use raster::{draw_line, fill_triangle, is_culled, signed_area};
pub use rasterizer::SoftwareRasterizer;
pub use surface::Surface;
