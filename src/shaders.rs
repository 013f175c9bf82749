//! Stock shaders for the built-in attribute types.
//!
//! These are plain functions, so they can be handed straight to [`crate::Program::new`] or called
//! from within larger closures.

use vek::Rgba;

use crate::{FragmentAttributes, FrameBufferAttributes, UniformAttributes, VertexAttributes};

/// The outcome of comparing a fragment's depth against the depth already stored in a pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DepthComparison {
    /// The fragment is strictly nearer and replaces the pixel.
    Nearer,
    /// The fragment is at the same depth or further away and is dropped.
    NotNearer,
}

impl DepthComparison {
    #[inline(always)]
    pub fn compare(fragment_depth: f32, stored_depth: f32) -> Self {
        if fragment_depth < stored_depth {
            DepthComparison::Nearer
        } else {
            DepthComparison::NotNearer
        }
    }
}

/// Vertex shader applying the uniform transform to the position and passing everything else on.
#[inline]
pub fn transform(va: &VertexAttributes, uniform: &UniformAttributes) -> VertexAttributes {
    VertexAttributes {
        position: uniform.view * va.position,
        ..*va
    }
}

/// Fragment shader emitting the uniform colour at the interpolated position.
#[inline]
pub fn uniform_color(va: &VertexAttributes, uniform: &UniformAttributes) -> FragmentAttributes {
    FragmentAttributes {
        color: uniform.color,
        position: va.position,
    }
}

/// Fragment shader emitting the interpolated vertex colour, with the uniform's alpha.
#[inline]
pub fn vertex_color(va: &VertexAttributes, uniform: &UniformAttributes) -> FragmentAttributes {
    FragmentAttributes {
        color: Rgba {
            a: uniform.color.a,
            ..va.color
        },
        position: va.position,
    }
}

/// Blending shader that writes every fragment, ignoring depth.
#[inline]
pub fn overwrite(fa: &FragmentAttributes, _previous: &FrameBufferAttributes) -> FrameBufferAttributes {
    FrameBufferAttributes::from_color(fa.color)
}

/// Blending shader implementing a strict less-than depth test.
///
/// Nearer fragments replace both colour and depth; anything else leaves the pixel untouched.
#[inline]
pub fn depth_test(fa: &FragmentAttributes, previous: &FrameBufferAttributes) -> FrameBufferAttributes {
    match DepthComparison::compare(fa.depth(), previous.depth) {
        DepthComparison::Nearer => FrameBufferAttributes::from_color(fa.color).with_depth(fa.depth()),
        DepthComparison::NotNearer => *previous,
    }
}

/// A depth test that lets fragments through when they are up to `bias` behind the stored depth.
///
/// Drawing a wireframe over already-filled triangles with this keeps visible edges while hidden
/// ones stay occluded. The stored depth is left as it was.
pub fn biased_depth_test(
    bias: f32,
) -> impl Fn(&FragmentAttributes, &FrameBufferAttributes) -> FrameBufferAttributes + Copy {
    move |fa, previous| match DepthComparison::compare(fa.depth() - bias, previous.depth) {
        DepthComparison::Nearer => FrameBufferAttributes {
            color: FrameBufferAttributes::from_color(fa.color).color,
            depth: previous.depth.min(fa.depth()),
        },
        DepthComparison::NotNearer => *previous,
    }
}
