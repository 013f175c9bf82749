use vek::*;

use super::*;
use crate::Interpolate;

/// A rasterizer that produces filled triangles from groups of 3 consecutive vertices.
///
/// A pixel is covered when all three barycentric coordinates of its sample
/// point are non-negative, so
/// pixels lying exactly on an edge shared by two triangles are drawn by both. There is no backface
/// culling and no built-in depth test: the blending shader decides what reaches the target.
#[derive(Copy, Clone, Debug, Default)]
pub struct Triangles;

/// Twice the signed area of the triangle `(a, b, p)`, positive when counter-clockwise.
#[inline(always)]
fn edge(a: Vec2<f32>, b: Vec2<f32>, p: Vec2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Barycentric weights of `p` with respect to the triangle `(a, b, c)`.
///
/// Returns `None` for degenerate triangles with zero area.
#[inline]
pub fn barycentric(a: Vec2<f32>, b: Vec2<f32>, c: Vec2<f32>, p: Vec2<f32>) -> Option<Vec3<f32>> {
    let area = edge(a, b, c);
    if area == 0.0 || !area.is_finite() {
        return None;
    }
    Some(Vec3::new(edge(b, c, p), edge(c, a, p), edge(a, b, p)) / area)
}

impl Rasterizer for Triangles {
    type Config = ();

    fn rasterize<P, T>(
        &self,
        pipeline: &P,
        uniform: &P::Uniform,
        vertices: &[P::Vertex],
        _config: (),
        target: &mut T,
    ) where
        P: Pipeline,
        T: Target<Texel = P::Pixel>,
    {
        let trailing = vertices.len() % 3;
        if trailing != 0 {
            log::warn!("Ignoring {} trailing vertices that do not form a triangle", trailing);
        }

        let mut blitter = Blitter::new(pipeline, uniform, target);
        let size = blitter.target_size();
        let mut degenerate = 0;

        vertices.chunks_exact(3).for_each(|verts| {
            // Compute vertex shader outputs
            let a = pipeline.vertex(&verts[0], uniform);
            let b = pipeline.vertex(&verts[1], uniform);
            let c = pipeline.vertex(&verts[2], uniform);

            // Convert to framebuffer coordinates
            let (a_scr, b_scr, c_scr) = match (
                project(a.position(), size),
                project(b.position(), size),
                project(c.position(), size),
            ) {
                (Some(a), Some(b), Some(c)) => (a.xy(), b.xy(), c.xy()),
                _ => {
                    degenerate += 1;
                    return;
                }
            };

            if edge(a_scr, b_scr, c_scr) == 0.0 {
                degenerate += 1;
                return;
            }

            let bounds = match PixelBounds::clipped(
                Vec2::partial_min(Vec2::partial_min(a_scr, b_scr), c_scr),
                Vec2::partial_max(Vec2::partial_max(a_scr, b_scr), c_scr),
                0.0,
                size,
            ) {
                Some(bounds) => bounds,
                None => return,
            };

            for [x, y] in bounds.pixels() {
                let p = sample_point([x, y]);

                let w = match barycentric(a_scr, b_scr, c_scr, p) {
                    Some(w) => w,
                    None => return,
                };

                // If the point falls outside the triangle, skip this fragment
                if w.x < 0.0 || w.y < 0.0 || w.z < 0.0 {
                    continue;
                }

                let lerped = P::Vertex::lerp3(a.clone(), b.clone(), c.clone(), w.x, w.y, w.z);
                blitter.emit_fragment([x, y], &lerped);
            }
        });

        let (fragments, discarded) = blitter.counts();
        log::debug!(
            "Rasterized {} triangles ({} degenerate): {} fragments shaded, {} outside the depth range",
            vertices.len() / 3,
            degenerate,
            fragments,
            discarded,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_corners() {
        let (a, b, c) = (Vec2::new(1.0, 1.0), Vec2::new(9.0, 2.0), Vec2::new(3.0, 7.0));
        assert_eq!(barycentric(a, b, c, a), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(barycentric(a, b, c, b), Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(barycentric(a, b, c, c), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn barycentric_is_winding_independent() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        let p = Vec2::new(1.0, 1.0);
        let ccw = barycentric(a, b, c, p).unwrap();
        let cw = barycentric(a, c, b, p).unwrap();
        assert_eq!(ccw, Vec3::new(0.5, 0.25, 0.25));
        assert_eq!(cw, Vec3::new(0.5, 0.25, 0.25));
    }

    #[test]
    fn degenerate_triangles_have_no_weights() {
        let a = Vec2::new(2.0, 3.0);
        assert_eq!(barycentric(a, a, a, a), None);
        // Collinear
        assert_eq!(
            barycentric(Vec2::zero(), Vec2::one(), Vec2::broadcast(2.0), Vec2::zero()),
            None
        );
    }
}
