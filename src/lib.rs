//! A small programmable software rasterization pipeline.
//!
//! A draw call runs a user-supplied vertex shader over a flat vertex sequence, scan-converts the
//! resulting triangles or line segments, interpolates the vertex attributes at every covered pixel
//! and merges the fragment shader's output into a frame buffer through a blending shader.
//!
//! ```
//! use raster::{FrameBuffer, Program, Pipeline, UniformAttributes, VertexAttributes, shaders};
//!
//! let program = Program::new(shaders::transform, shaders::uniform_color, shaders::depth_test);
//! let mut frame = FrameBuffer::new([64, 64]);
//! program.rasterize_triangles(
//!     &UniformAttributes::default(),
//!     &[
//!         VertexAttributes::new(-1.0, -1.0, 0.0),
//!         VertexAttributes::new(1.0, -1.0, 0.0),
//!         VertexAttributes::new(0.0, 1.0, 0.0),
//!     ],
//!     &mut frame,
//! );
//! ```

#[cfg(feature = "image")]
extern crate image_ as image;

pub mod attributes;
pub mod buffer;
pub mod error;
#[cfg(feature = "image")]
pub mod export;
pub mod interpolate;
pub mod program;
pub mod rasterizer;
pub mod scene;
pub mod shaders;

// Reexports
pub use self::{
    attributes::{
        FragmentAttributes, FrameBufferAttributes, Homogeneous, UniformAttributes,
        VertexAttributes, DEPTH_SENTINEL,
    },
    buffer::{Buffer2d, FrameBuffer, Target},
    error::Error,
    interpolate::Interpolate,
    program::Program,
    rasterizer::{lines::LineConfig, Lines, Rasterizer, Triangles},
};

/// Represents the high-level structure of a rendering pipeline.
///
/// This governs the following things:
///
/// - Vertex transformation (computed by the vertex shader)
/// - Rasterization and attribute interpolation (performed internally by the [`Rasterizer`])
/// - Fragment output calculation (computed by the fragment shader)
/// - Merging the fragment into the target (computed by the blending shader)
///
/// There is no fixed-function depth test: a blending shader that compares depths is the only
/// place one happens. See [`shaders::depth_test`].
pub trait Pipeline {
    /// The type of the uniform data that is made available to all shader programs.
    ///
    /// This does not change throughout a draw call and usually consists of such things as
    /// transformation matrices and default colours.
    type Uniform;

    /// The per-vertex data. The vertex shader maps it to another value of the same type, whose
    /// clip-space position is used for rasterization and which is interpolated across primitives.
    type Vertex: Clone + Interpolate + Homogeneous;

    /// The type emitted by the fragment shader.
    type Fragment;

    /// The type stored in the target.
    type Pixel: Clone;

    /// The vertex shader
    fn vertex(&self, vertex: &Self::Vertex, uniform: &Self::Uniform) -> Self::Vertex;

    /// The fragment shader, invoked with the interpolated vertex of one covered pixel
    fn fragment(&self, vertex: &Self::Vertex, uniform: &Self::Uniform) -> Self::Fragment;

    /// The blending shader, merging a fragment with the pixel currently in the target
    fn blend(&self, fragment: &Self::Fragment, previous: &Self::Pixel) -> Self::Pixel;

    /// Perform a draw call with the given rasterizer.
    fn draw<R, T>(
        &self,
        rasterizer: R,
        uniform: &Self::Uniform,
        vertices: &[Self::Vertex],
        config: R::Config,
        target: &mut T,
    ) where
        Self: Sized,
        R: Rasterizer,
        T: Target<Texel = Self::Pixel>,
    {
        rasterizer.rasterize(self, uniform, vertices, config, target)
    }

    /// Draw filled triangles from each group of 3 consecutive vertices.
    fn rasterize_triangles<T>(&self, uniform: &Self::Uniform, vertices: &[Self::Vertex], target: &mut T)
    where
        Self: Sized,
        T: Target<Texel = Self::Pixel>,
    {
        self.draw(Triangles, uniform, vertices, (), target)
    }

    /// Draw line segments of the given thickness from each pair of consecutive vertices.
    fn rasterize_lines<T>(
        &self,
        uniform: &Self::Uniform,
        vertices: &[Self::Vertex],
        thickness: f32,
        target: &mut T,
    ) where
        Self: Sized,
        T: Target<Texel = Self::Pixel>,
    {
        self.draw(Lines, uniform, vertices, LineConfig::from(thickness), target)
    }
}
