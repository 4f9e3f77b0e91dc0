//! Coordinate and geometry types shared by the hull, light and render layers.
//!
//! Two spaces are in play:
//! - World space: whatever the host's view-projection matrix expects,
//!   conventionally +X right, +Y up.
//! - Pixel space: integer target pixels, origin top-left, +Y down.
//!
//! NDC sits in between; [`ndc_to_pixel`] performs the Y flip.

mod bounds;
mod color;
mod pixel_rect;
mod transform;
mod viewport;

pub use bounds::BoundingRect;
pub use color::Color;
pub use pixel_rect::PixelRect;
pub use transform::{
    clamp_to_unit_square, clockwise, counter_clockwise, ndc_to_pixel, project_to_pixel,
    unit_square_to_texcoord,
};
pub use viewport::Viewport;
