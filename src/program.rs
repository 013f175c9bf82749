use core::{fmt, marker::PhantomData};

use crate::{Homogeneous, Interpolate, Pipeline};

/// A shader program assembled from three functions: vertex, fragment and blending shaders.
///
/// The functions are owned by the program for the lifetime of the draw calls it is used for. They
/// may capture read-only state, such as lights or a model transform, but must not rely on shared
/// mutable state.
///
/// ```
/// use raster::{FragmentAttributes, FrameBufferAttributes, Program, UniformAttributes, VertexAttributes};
///
/// let program = Program::new(
///     |va: &VertexAttributes, uniform: &UniformAttributes| VertexAttributes {
///         position: uniform.view * va.position,
///         ..*va
///     },
///     |_: &VertexAttributes, _: &UniformAttributes| FragmentAttributes::new(1.0, 0.0, 0.0, 1.0),
///     |fa: &FragmentAttributes, _: &FrameBufferAttributes| FrameBufferAttributes::from_color(fa.color),
/// );
/// # let _ = program;
/// ```
pub struct Program<U, V, F, P, Vs, Fs, Bs> {
    vertex_shader: Vs,
    fragment_shader: Fs,
    blending_shader: Bs,
    phantom: PhantomData<fn(&U, &V, &F, &P)>,
}

impl<U, V, F, P, Vs, Fs, Bs> Program<U, V, F, P, Vs, Fs, Bs>
where
    Vs: Fn(&V, &U) -> V,
    Fs: Fn(&V, &U) -> F,
    Bs: Fn(&F, &P) -> P,
{
    pub fn new(vertex_shader: Vs, fragment_shader: Fs, blending_shader: Bs) -> Self {
        Self {
            vertex_shader,
            fragment_shader,
            blending_shader,
            phantom: PhantomData,
        }
    }
}

impl<U, V, F, P, Vs, Fs, Bs> Pipeline for Program<U, V, F, P, Vs, Fs, Bs>
where
    V: Clone + Interpolate + Homogeneous,
    P: Clone,
    Vs: Fn(&V, &U) -> V,
    Fs: Fn(&V, &U) -> F,
    Bs: Fn(&F, &P) -> P,
{
    type Uniform = U;
    type Vertex = V;
    type Fragment = F;
    type Pixel = P;

    #[inline(always)]
    fn vertex(&self, vertex: &V, uniform: &U) -> V {
        (self.vertex_shader)(vertex, uniform)
    }

    #[inline(always)]
    fn fragment(&self, vertex: &V, uniform: &U) -> F {
        (self.fragment_shader)(vertex, uniform)
    }

    #[inline(always)]
    fn blend(&self, fragment: &F, previous: &P) -> P {
        (self.blending_shader)(fragment, previous)
    }
}

impl<U, V, F, P, Vs, Fs, Bs> fmt::Debug for Program<U, V, F, P, Vs, Fs, Bs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Program")
    }
}
