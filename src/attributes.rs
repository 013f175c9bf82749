use vek::*;

use crate::Interpolate;

/// The far-plane sentinel stored in a fresh pixel.
///
/// It lies outside the normalised device volume, so the first fragment written to a pixel always
/// passes a less-than depth test.
pub const DEPTH_SENTINEL: f32 = 2.0;

/// Types that carry a homogeneous clip-space position the rasterizer can project.
pub trait Homogeneous {
    /// The position of this vertex before the perspective divide.
    fn position(&self) -> Vec4<f32>;
}

/// Per-vertex data, consumed and produced by the vertex shader.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexAttributes {
    /// Homogeneous position. The last component is 1 for points and 0 for directions.
    pub position: Vec4<f32>,
    pub normal: Vec3<f32>,
    pub color: Rgba<f32>,
}

impl VertexAttributes {
    /// Create a vertex at the given point with a zero normal and opaque black colour.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec4::new(x, y, z, 1.0),
            normal: Vec3::zero(),
            color: Rgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn from_point(point: Vec3<f32>) -> Self {
        Self::new(point.x, point.y, point.z)
    }

    pub fn with_normal(self, normal: Vec3<f32>) -> Self {
        Self { normal, ..self }
    }

    pub fn with_color(self, color: Rgba<f32>) -> Self {
        Self { color, ..self }
    }
}

impl Default for VertexAttributes {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Homogeneous for VertexAttributes {
    #[inline(always)]
    fn position(&self) -> Vec4<f32> {
        self.position
    }
}

impl Interpolate for VertexAttributes {
    /// Position and colour are weighted sums. Normals are not blended: the result keeps the normal
    /// of whichever vertex carries the largest weight.
    #[inline]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        let normal = if x >= y && x >= z {
            a.normal
        } else if y >= z {
            b.normal
        } else {
            c.normal
        };

        Self {
            position: a.position * x + b.position * y + c.position * z,
            normal,
            color: a.color * x + b.color * y + c.color * z,
        }
    }
}

/// The output of the fragment shader for a single covered pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FragmentAttributes {
    pub color: Rgba<f32>,
    /// Post-shader position. Its `z` component is the depth used by the blending shader, where
    /// smaller means nearer.
    pub position: Vec4<f32>,
}

impl FragmentAttributes {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            color: Rgba::new(r, g, b, a),
            position: Vec4::zero(),
        }
    }

    pub fn with_position(self, position: Vec4<f32>) -> Self {
        Self { position, ..self }
    }

    #[inline(always)]
    pub fn depth(&self) -> f32 {
        self.position.z
    }
}

impl Default for FragmentAttributes {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// The persistent state of a single pixel in the frame buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameBufferAttributes {
    pub color: Rgba<u8>,
    pub depth: f32,
}

impl FrameBufferAttributes {
    /// Create a pixel from floating point channels in `[0, 1]`, with the sentinel depth.
    ///
    /// Channels outside that range are clamped.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_color(Rgba::new(r, g, b, a))
    }

    pub fn from_color(color: Rgba<f32>) -> Self {
        Self {
            color: color.map(quantize),
            depth: DEPTH_SENTINEL,
        }
    }

    pub fn with_depth(self, depth: f32) -> Self {
        Self { depth, ..self }
    }
}

impl Default for FrameBufferAttributes {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

#[inline]
fn quantize(channel: f32) -> u8 {
    // NaN channels become 0
    (channel.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Read-only data shared by every shader invocation of one draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformAttributes {
    /// The full vertex transform (projection, camera and model).
    pub view: Mat4<f32>,
    pub color: Rgba<f32>,
}

impl UniformAttributes {
    pub fn new(view: Mat4<f32>) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }
}

impl Default for UniformAttributes {
    fn default() -> Self {
        Self {
            view: Mat4::identity(),
            color: Rgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(i: usize) -> VertexAttributes {
        let f = i as f32;
        VertexAttributes::new(f, 2.0 * f - 1.0, 0.5 - f)
            .with_normal(Vec3::new(0.0, f, 1.0).normalized())
            .with_color(Rgba::new(0.1 * f, 0.2, 0.3 + 0.2 * f, 1.0))
    }

    #[test]
    fn interpolation_reproduces_vertices() {
        let (a, b, c) = (corner(0), corner(1), corner(2));

        assert_eq!(VertexAttributes::lerp3(a, b, c, 1.0, 0.0, 0.0), a);
        assert_eq!(VertexAttributes::lerp3(a, b, c, 0.0, 1.0, 0.0), b);
        assert_eq!(VertexAttributes::lerp3(a, b, c, 0.0, 0.0, 1.0), c);
    }

    #[test]
    fn interpolation_weights_position_and_color() {
        let a = VertexAttributes::new(0.0, 0.0, 0.0).with_color(Rgba::new(1.0, 0.0, 0.0, 1.0));
        let b = VertexAttributes::new(4.0, 0.0, 0.0).with_color(Rgba::new(0.0, 1.0, 0.0, 1.0));
        let c = VertexAttributes::new(0.0, 4.0, 0.0).with_color(Rgba::new(0.0, 0.0, 1.0, 1.0));

        let mid = VertexAttributes::lerp3(a, b, c, 0.5, 0.25, 0.25);
        assert_eq!(mid.position, Vec4::new(1.0, 1.0, 0.0, 1.0));
        assert_eq!(mid.color, Rgba::new(0.5, 0.25, 0.25, 1.0));
    }

    #[test]
    fn lerp2_is_a_degenerate_triangle() {
        let a = corner(0);
        let b = corner(2);
        let mid = VertexAttributes::lerp2(a, b, 0.5, 0.5);
        assert_eq!(mid.position, (a.position + b.position) * 0.5);
        assert_eq!(VertexAttributes::lerp2(a, b, 0.0, 1.0), b);
    }

    #[test]
    fn default_pixel_is_far_and_opaque() {
        let px = FrameBufferAttributes::default();
        assert_eq!(px.color, Rgba::new(0, 0, 0, 255));
        assert_eq!(px.depth, DEPTH_SENTINEL);
    }

    #[test]
    fn pixel_channels_are_clamped() {
        let px = FrameBufferAttributes::new(2.0, -1.0, 0.5, 1.0);
        assert_eq!(px.color, Rgba::new(255, 0, 128, 255));
    }
}
