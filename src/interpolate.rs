/// A trait used to enable types to be interpolated throughout the rasterization process.
///
/// Triangles blend their three vertices with barycentric weights via [`Interpolate::lerp3`]. Lines
/// blend their two endpoints via [`Interpolate::lerp2`]. The weights are assumed to sum to 1.
pub trait Interpolate {
    /// Linearly scale two items of this type and sum them
    #[inline(always)]
    fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self
    where
        Self: Clone,
    {
        Self::lerp3(a.clone(), b, a, x, y, 0.0)
    }

    /// Linearly scale three items of this type and sum them
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self;
}

// Default impls for certain types
macro_rules! impl_interpolate_for {
    ($t:ty) => {
        impl Interpolate for $t {
            #[inline(always)]
            fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self {
                a * x + b * y
            }
            #[inline(always)]
            fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
                a * x + b * y + c * z
            }
        }
    };
}
impl_interpolate_for!(f32);
impl_interpolate_for!(vek::Vec2<f32>);
impl_interpolate_for!(vek::Vec3<f32>);
impl_interpolate_for!(vek::Vec4<f32>);
impl_interpolate_for!(vek::Rgba<f32>);

impl<T: Interpolate, U: Interpolate> Interpolate for (T, U) {
    #[inline(always)]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        (
            T::lerp3(a.0, b.0, c.0, x, y, z),
            U::lerp3(a.1, b.1, c.1, x, y, z),
        )
    }
}

impl Interpolate for () {
    #[inline(always)]
    fn lerp3(_: Self, _: Self, _: Self, _: f32, _: f32, _: f32) -> Self {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use vek::*;

    #[test]
    fn lerp3_at_corners_is_exact() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 8.0);
        let c = Vec3::new(0.25, -7.0, 1.5);

        assert_eq!(Interpolate::lerp3(a, b, c, 1.0, 0.0, 0.0), a);
        assert_eq!(Interpolate::lerp3(a, b, c, 0.0, 1.0, 0.0), b);
        assert_eq!(Interpolate::lerp3(a, b, c, 0.0, 0.0, 1.0), c);
    }

    #[test]
    fn lerp2_midpoint() {
        let mid = <f32 as Interpolate>::lerp2(2.0, 4.0, 0.5, 0.5);
        assert_eq!(mid, 3.0);

        let (x, y) = <(f32, Vec2<f32>)>::lerp2((0.0, Vec2::zero()), (1.0, Vec2::one()), 0.25, 0.75);
        assert_eq!(x, 0.75);
        assert_eq!(y, Vec2::broadcast(0.75));
    }
}
