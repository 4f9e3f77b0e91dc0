//! Lights: emitters, their cone geometry and falloff textures.

mod cone;
mod point_light;
mod texture;

pub use cone::{layout_for_fov, ConeLayout, LightConeBuilder};
pub use point_light::{Light, ShadowMode, MAX_INTENSITY, MIN_INTENSITY};
pub use texture::LightTexture;
