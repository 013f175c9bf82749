//! The collaborators around the pipeline: camera, mesh, lighting, and the render recipes that tie
//! them to the rasterizer.
//!
//! Everything here is configuration built once and shared read-only across draw calls.

pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod render;

pub use self::{
    camera::{Camera, Projection},
    lighting::{Light, Material, Scene},
    mesh::Mesh,
};

use vek::*;

/// Normalise a vector, mapping zero-length (or non-finite) vectors to zero instead of NaN.
#[inline]
pub fn normalized_or_zero(v: Vec3<f32>) -> Vec3<f32> {
    let len = v.magnitude();
    if len > 0.0 && len.is_finite() {
        v / len
    } else {
        Vec3::zero()
    }
}
