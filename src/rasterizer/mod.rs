pub mod lines;
pub mod triangles;

pub use self::{lines::Lines, triangles::Triangles};

use vek::*;

use crate::{Homogeneous, Pipeline, Target};

/// A primitive assembler and scan converter.
///
/// A rasterizer consumes a flat, ordered vertex sequence, runs the vertex shader on every vertex,
/// determines which pixels each primitive covers and hands every covered pixel to the fragment and
/// blending shaders through a [`Blitter`]. Pixel `(x, y)` is sampled at the raster point `(x, y)`.
///
/// # View volume
///
/// A fragment whose interpolated `z / w` lies outside `[-1, 1]` (or is NaN) is dropped before the
/// fragment shader runs. This is a view-volume test against the normalised device cube, not a
/// depth comparison: the rasterizer never compares a fragment with what the target already holds.
/// Ordering fragments by depth is left entirely to the blending shader.
pub trait Rasterizer {
    /// Per-draw-call configuration, such as the thickness of lines.
    type Config;

    /// Rasterize the vertices into the target.
    ///
    /// Trailing vertices that do not form a complete primitive are ignored.
    fn rasterize<P, T>(
        &self,
        pipeline: &P,
        uniform: &P::Uniform,
        vertices: &[P::Vertex],
        config: Self::Config,
        target: &mut T,
    ) where
        P: Pipeline,
        T: Target<Texel = P::Pixel>;
}

/// Project a homogeneous clip-space position to raster coordinates.
///
/// The x and y components are mapped from `[-1, 1]` onto `[0, width]` and `[0, height]`, so row 0
/// corresponds to NDC y = -1. The z component is the NDC depth. Returns `None` when the position
/// cannot be divided through.
#[inline]
pub fn project(position: Vec4<f32>, size: [usize; 2]) -> Option<Vec3<f32>> {
    if position.w == 0.0 {
        return None;
    }
    let ndc = position.xyz() / position.w;
    let screen = Vec3::new(
        (ndc.x + 1.0) * 0.5 * size[0] as f32,
        (ndc.y + 1.0) * 0.5 * size[1] as f32,
        ndc.z,
    );
    if screen.x.is_finite() && screen.y.is_finite() && screen.z.is_finite() {
        Some(screen)
    } else {
        None
    }
}

/// The raster point a pixel is sampled at: its integer position, `(column, row)`.
#[inline(always)]
pub(crate) fn sample_point([x, y]: [usize; 2]) -> Vec2<f32> {
    Vec2::new(x as f32, y as f32)
}

/// An inclusive pixel bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PixelBounds {
    pub min: Vec2<usize>,
    pub max: Vec2<usize>,
}

impl PixelBounds {
    /// Compute the pixels touched by the given raster-space extents, grown by `margin`, clipped
    /// to the target. Returns `None` if the extents lie entirely outside it.
    pub fn clipped(min: Vec2<f32>, max: Vec2<f32>, margin: f32, size: [usize; 2]) -> Option<Self> {
        if size[0] == 0 || size[1] == 0 {
            return None;
        }
        let (min, max) = (min - margin, max + margin);
        let limit = Vec2::new(size[0] as f32, size[1] as f32);
        if max.x < 0.0 || max.y < 0.0 || min.x > limit.x || min.y > limit.y {
            return None;
        }

        let last = Vec2::new(size[0] - 1, size[1] - 1).map(|e| e as f32);
        let clip = |v: Vec2<f32>| {
            Vec2::new(v.x.max(0.0).min(last.x), v.y.max(0.0).min(last.y)).map(|e| e as usize)
        };
        Some(Self {
            min: clip(min.map(f32::floor)),
            max: clip(max.map(f32::ceil)),
        })
    }

    /// Iterate over every pixel in the box, row by row.
    pub fn pixels(self) -> impl Iterator<Item = [usize; 2]> {
        let Self { min, max } = self;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| [x, y]))
    }
}

/// Runs the per-fragment half of the pipeline: the z range test, the fragment shader and the
/// blending shader, writing the blended pixel back into the target.
pub(crate) struct Blitter<'a, P: Pipeline, T> {
    pipeline: &'a P,
    uniform: &'a P::Uniform,
    target: &'a mut T,
    size: [usize; 2],
    fragments: usize,
    discarded: usize,
}

impl<'a, P, T> Blitter<'a, P, T>
where
    P: Pipeline,
    T: Target<Texel = P::Pixel>,
{
    pub fn new(pipeline: &'a P, uniform: &'a P::Uniform, target: &'a mut T) -> Self {
        let size = target.size();
        Self {
            pipeline,
            uniform,
            target,
            size,
            fragments: 0,
            discarded: 0,
        }
    }

    #[inline(always)]
    pub fn target_size(&self) -> [usize; 2] {
        self.size
    }

    /// Shade and blend one covered pixel.
    ///
    /// Fragments whose interpolated `z / w` leaves the normalised device volume are dropped. No
    /// depth comparison happens here.
    #[inline]
    pub fn emit_fragment(&mut self, pos: [usize; 2], vertex: &P::Vertex) {
        let hom = vertex.position();
        let z = hom.z / hom.w;
        // Written as a negated range test so that NaN depths are rejected too
        if !(-1.0 <= z && z <= 1.0) {
            self.discarded += 1;
            return;
        }

        assert!(pos[0] < self.size[0] && pos[1] < self.size[1]);
        let fragment = self.pipeline.fragment(vertex, self.uniform);
        // Safety: the position was checked against the target size above
        unsafe {
            let previous = self.target.read_unchecked(pos);
            let blended = self.pipeline.blend(&fragment, &previous);
            self.target.write_unchecked(pos, blended);
        }
        self.fragments += 1;
    }

    /// The number of fragments shaded and the number dropped by the depth range test.
    pub fn counts(&self) -> (usize, usize) {
        (self.fragments, self.discarded)
    }
}
