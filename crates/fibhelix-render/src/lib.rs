//! Render-side data for the Fibonacci helix manifold.
//!
//! The manifold itself knows nothing about drawing. This crate turns its
//! loops into data a graphics backend can upload as-is:
//!
//! - one [`LineStrip`] per non-empty loop, built from packed [`LineVertex`]
//!   values colored by local curvature and Fibonacci index
//! - a [`FollowCamera`] that trails the highest active tip
//!
//! Window creation, projection and the draw call stay with the backend.

pub mod camera;
pub mod color;
pub mod strip;

pub use camera::FollowCamera;
pub use color::{curvature_color, hsv_to_rgb, pack_rgba};
pub use strip::{build_strips, LineStrip};

use glam::DVec3;

/// GPU vertex for one point of a loop.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World position (x, y, z)
    pub position: [f32; 3],
    /// Packed RGBA color
    pub color: u32,
}

impl LineVertex {
    pub fn new(position: [f32; 3], color: u32) -> Self {
        Self { position, color }
    }

    /// Narrow an engine point to a vertex.
    #[inline]
    pub fn from_point(point: DVec3, color: u32) -> Self {
        Self {
            position: point.as_vec3().to_array(),
            color,
        }
    }
}
