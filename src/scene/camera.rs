use vek::*;

use super::normalized_or_zero;
use crate::UniformAttributes;

/// The kind of projection applied after the camera transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Parallel projection of the view volume. Near maps to NDC z = +1 and far to -1, so fragment
    /// shaders flip z before depth testing.
    Orthographic,
    /// OpenGL-style perspective projection. Near maps to NDC z = -1 and far to +1.
    Perspective,
}

/// Camera configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Output image height in pixels. The width follows from the aspect ratio.
    pub image_height: usize,
    pub aspect_ratio: f32,
    /// Distance to the near plane (the focal length).
    pub near: f32,
    /// Distance to the far plane.
    pub far: f32,
    /// Vertical field of view, in radians.
    pub field_of_view: f32,
    pub projection: Projection,
    pub position: Vec3<f32>,
    pub gaze: Vec3<f32>,
    pub up: Vec3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            image_height: 480,
            aspect_ratio: 1.5,
            near: 1.5,
            far: 150.0,
            field_of_view: 0.7854,
            projection: Projection::Orthographic,
            position: Vec3::new(0.0, 0.0, 3.0),
            gaze: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl Camera {
    /// The frame buffer size, `[width, height]`, for this camera.
    pub fn image_size(&self) -> [usize; 2] {
        [
            (self.image_height as f32 * self.aspect_ratio) as usize,
            self.image_height,
        ]
    }

    /// World to camera space. The camera looks down its -z axis.
    pub fn view_matrix(&self) -> Mat4<f32> {
        let w = normalized_or_zero(-self.gaze);
        let u = normalized_or_zero(self.up.cross(w));
        let v = w.cross(u);
        let e = self.position;

        // Inverse of the orthonormal camera frame [u v w e]
        Mat4::from_row_arrays([
            [u.x, u.y, u.z, -u.dot(e)],
            [v.x, v.y, v.z, -v.dot(e)],
            [w.x, w.y, w.z, -w.dot(e)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Camera space to the canonical `[-1, 1]` view volume.
    pub fn projection_matrix(&self) -> Mat4<f32> {
        match self.projection {
            Projection::Orthographic => {
                let t = (self.field_of_view / 2.0).tan() * self.near;
                let r = t * self.aspect_ratio;
                let (l, b) = (-r, -t);
                let (n, f) = (-self.near, -self.far);

                Mat4::from_row_arrays([
                    [2.0 / (r - l), 0.0, 0.0, -(r + l) / (r - l)],
                    [0.0, 2.0 / (t - b), 0.0, -(t + b) / (t - b)],
                    [0.0, 0.0, 2.0 / (n - f), -(n + f) / (n - f)],
                    [0.0, 0.0, 0.0, 1.0],
                ])
            }
            Projection::Perspective => {
                let focal = 1.0 / (self.field_of_view / 2.0).tan();
                let (n, f) = (self.near, self.far);

                Mat4::from_row_arrays([
                    [focal / self.aspect_ratio, 0.0, 0.0, 0.0],
                    [0.0, focal, 0.0, 0.0],
                    [0.0, 0.0, (f + n) / (n - f), 2.0 * f * n / (n - f)],
                    [0.0, 0.0, -1.0, 0.0],
                ])
            }
        }
    }

    /// Build the uniform for one draw call of an object placed with the given model transform.
    pub fn build_uniform(&self, model: Mat4<f32>) -> UniformAttributes {
        UniformAttributes::new(self.projection_matrix() * self.view_matrix() * model)
    }
}

/// Rotation by `alpha` radians about the y axis, used to spin the model between animation frames.
pub fn rotation_y(alpha: f32) -> Mat4<f32> {
    let (sin, cos) = alpha.sin_cos();
    Mat4::from_row_arrays([
        [cos, 0.0, sin, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin, 0.0, cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec4<f32>, b: Vec4<f32>) {
        assert!(
            (a - b).map(f32::abs).reduce_partial_max() < 1e-4,
            "{:?} is not close to {:?}",
            a,
            b
        );
    }

    fn ndc(m: Mat4<f32>, p: Vec3<f32>) -> Vec4<f32> {
        let clip = m * Vec4::from_point(p);
        clip / clip.w
    }

    #[test]
    fn default_image_size() {
        assert_eq!(Camera::default().image_size(), [720, 480]);
    }

    #[test]
    fn view_moves_the_camera_to_the_origin() {
        let view = Camera::default().view_matrix();
        assert_close(view * Vec4::new(0.0, 0.0, 3.0, 1.0), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_close(view * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(0.0, 0.0, -3.0, 1.0));
        assert_close(view * Vec4::new(1.0, 2.0, 3.0, 1.0), Vec4::new(1.0, 2.0, 0.0, 1.0));
    }

    #[test]
    fn orthographic_maps_near_to_plus_one() {
        let camera = Camera::default();
        let proj = camera.projection_matrix();
        assert!((ndc(proj, Vec3::new(0.0, 0.0, -camera.near)).z - 1.0).abs() < 1e-4);
        assert!((ndc(proj, Vec3::new(0.0, 0.0, -camera.far)).z + 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_maps_near_to_minus_one() {
        let camera = Camera {
            projection: Projection::Perspective,
            ..Camera::default()
        };
        let proj = camera.projection_matrix();
        assert!((ndc(proj, Vec3::new(0.0, 0.0, -camera.near)).z + 1.0).abs() < 1e-4);
        assert!((ndc(proj, Vec3::new(0.0, 0.0, -camera.far)).z - 1.0).abs() < 1e-3);

        // The top of the frustum at the near plane lands on the top edge
        let top = (camera.field_of_view / 2.0).tan() * camera.near;
        assert!((ndc(proj, Vec3::new(0.0, top, -camera.near)).y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn rotation_turns_x_into_minus_z() {
        let m = rotation_y(core::f32::consts::FRAC_PI_2);
        assert_close(m * Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::new(0.0, 0.0, -1.0, 1.0));
    }
}
