//! Shadow hulls: polygon obstacles and their silhouette geometry.
//!
//! Geometry is cached in hull-local space at construction. The per-frame
//! draw step ([`HullPlacement`]) transforms it into world space.

mod builder;
mod placement;
mod shadow_hull;
mod shape;

pub use builder::{fan_indices, HullBuilder, HullGeometry, SILHOUETTE_COLOR};
pub use placement::HullPlacement;
pub use shadow_hull::ShadowHull;
pub use shape::{circle_points, rectangle_points, HullShape};
