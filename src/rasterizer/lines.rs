use vek::*;

use super::*;
use crate::Interpolate;

/// A rasterizer that produces thick line segments from pairs of consecutive vertices.
///
/// A pixel is covered when the distance from its sample point to the nearest point of the finite
/// segment is at most the configured thickness. Attributes are interpolated along the segment
/// with the parameter of that nearest point.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lines;

/// Configuration for [`Lines`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineConfig {
    /// Maximum distance, in pixels, between a covered pixel's sample point and the segment.
    pub thickness: f32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self { thickness: 0.5 }
    }
}

impl From<f32> for LineConfig {
    fn from(thickness: f32) -> Self {
        Self { thickness }
    }
}

/// The parameter in `[0, 1]` of the point on segment `(a, b)` closest to `p`.
///
/// Zero-length segments always yield 0.
#[inline]
pub fn closest_param(a: Vec2<f32>, b: Vec2<f32>, p: Vec2<f32>) -> f32 {
    let ab = b - a;
    let len_sqr = ab.magnitude_squared();
    if len_sqr == 0.0 {
        0.0
    } else {
        ((p - a).dot(ab) / len_sqr).max(0.0).min(1.0)
    }
}

/// The segment parameter of `p` if it lies within `thickness` of segment `(a, b)`.
#[inline]
pub fn coverage(a: Vec2<f32>, b: Vec2<f32>, p: Vec2<f32>, thickness: f32) -> Option<f32> {
    let t = closest_param(a, b, p);
    let nearest = a + (b - a) * t;
    if (p - nearest).magnitude_squared() <= thickness * thickness {
        Some(t)
    } else {
        None
    }
}

impl Rasterizer for Lines {
    type Config = LineConfig;

    fn rasterize<P, T>(
        &self,
        pipeline: &P,
        uniform: &P::Uniform,
        vertices: &[P::Vertex],
        config: LineConfig,
        target: &mut T,
    ) where
        P: Pipeline,
        T: Target<Texel = P::Pixel>,
    {
        if vertices.len() % 2 != 0 {
            log::warn!("Ignoring a trailing vertex that does not form a line");
        }

        let thickness = config.thickness.max(0.0);
        let mut blitter = Blitter::new(pipeline, uniform, target);
        let size = blitter.target_size();
        let mut skipped = 0;

        vertices.chunks_exact(2).for_each(|verts| {
            let a = pipeline.vertex(&verts[0], uniform);
            let b = pipeline.vertex(&verts[1], uniform);

            let (a_scr, b_scr) = match (project(a.position(), size), project(b.position(), size)) {
                (Some(a), Some(b)) => (a.xy(), b.xy()),
                _ => {
                    skipped += 1;
                    return;
                }
            };

            let bounds = match PixelBounds::clipped(
                Vec2::partial_min(a_scr, b_scr),
                Vec2::partial_max(a_scr, b_scr),
                thickness,
                size,
            ) {
                Some(bounds) => bounds,
                None => return,
            };

            for [x, y] in bounds.pixels() {
                if let Some(t) = coverage(a_scr, b_scr, sample_point([x, y]), thickness) {
                    let lerped = P::Vertex::lerp2(a.clone(), b.clone(), 1.0 - t, t);
                    blitter.emit_fragment([x, y], &lerped);
                }
            }
        });

        let (fragments, discarded) = blitter.counts();
        log::debug!(
            "Rasterized {} lines ({} unprojectable): {} fragments shaded, {} outside the depth range",
            vertices.len() / 2,
            skipped,
            fragments,
            discarded,
        );
    }
}
