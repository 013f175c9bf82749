use vek::*;

use super::{normalized_or_zero, Camera};

/// Surface reflectance coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub diffuse: Rgb<f32>,
    pub specular: Rgb<f32>,
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Rgb::broadcast(0.5),
            specular: Rgb::broadcast(0.2),
            specular_exponent: 256.0,
        }
    }
}

/// A point light. Its intensity falls off with the squared distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3<f32>,
    pub color: Rgb<f32>,
}

impl Light {
    pub fn new(position: Vec3<f32>, color: Rgb<f32>) -> Self {
        Self { position, color }
    }
}

/// Everything shared read-only by the draw calls of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub material: Material,
    pub ambient: Rgb<f32>,
    pub lights: Vec<Light>,
}

impl Default for Scene {
    /// Seven white lights alternating above and below the object, sweeping from +x to -x.
    fn default() -> Self {
        let lights = (0..7)
            .map(|i| {
                let x = 8.0 - 2.0 * i as f32;
                let y = if i % 2 == 0 { 8.0 } else { -8.0 };
                Light::new(Vec3::new(x, y, 0.0), Rgb::broadcast(16.0))
            })
            .collect();

        Self {
            camera: Camera::default(),
            material: Material::default(),
            ambient: Rgb::broadcast(0.3),
            lights,
        }
    }
}

impl Scene {
    /// Blinn-Phong lighting at a world-space point with the given unit normal.
    ///
    /// Returns an opaque colour. Channels may exceed 1 and are clamped when written to a pixel.
    pub fn shade(&self, position: Vec3<f32>, normal: Vec3<f32>) -> Rgba<f32> {
        let Material {
            diffuse,
            specular,
            specular_exponent,
        } = self.material;
        let view = normalized_or_zero(self.camera.position - position);

        let lit = self
            .lights
            .iter()
            .fold(Rgb::zero(), |acc: Rgb<f32>, light| {
                let to_light = light.position - position;
                let dist_sqr = to_light.magnitude_squared();
                // A light sitting on the surface contributes nothing rather than infinity
                if dist_sqr == 0.0 {
                    return acc;
                }
                let l = normalized_or_zero(to_light);
                let h = normalized_or_zero(view + l);

                let d = diffuse * l.dot(normal).max(0.0);
                let s = specular * normal.dot(h).max(0.0).powf(specular_exponent);
                acc + (d + s) * light.color / dist_sqr
            });

        let color = lit + self.ambient;
        Rgba::new(color.r, color.g, color.b, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lights_match_the_sweep() {
        let scene = Scene::default();
        let positions: Vec<_> = scene.lights.iter().map(|l| l.position).collect();
        assert_eq!(positions.len(), 7);
        assert_eq!(positions[0], Vec3::new(8.0, 8.0, 0.0));
        assert_eq!(positions[1], Vec3::new(6.0, -8.0, 0.0));
        assert_eq!(positions[6], Vec3::new(-4.0, 8.0, 0.0));
    }

    #[test]
    fn unlit_surface_is_ambient() {
        let scene = Scene {
            lights: Vec::new(),
            ..Scene::default()
        };
        let c = scene.shade(Vec3::zero(), Vec3::unit_z());
        assert_eq!(c, Rgba::new(0.3, 0.3, 0.3, 1.0));
    }

    #[test]
    fn facing_lights_are_brighter() {
        let scene = Scene {
            lights: vec![Light::new(Vec3::new(0.0, 0.0, 2.0), Rgb::broadcast(4.0))],
            ..Scene::default()
        };
        let facing = scene.shade(Vec3::zero(), Vec3::unit_z());
        let away = scene.shade(Vec3::zero(), -Vec3::unit_z());

        assert_eq!(away, Rgba::new(0.3, 0.3, 0.3, 1.0));
        // diffuse 0.5 * 4 / 4 = 0.5, plus a full-strength highlight of 0.2 * 4 / 4
        assert!((facing.r - (0.3 + 0.5 + 0.2)).abs() < 1e-5);
    }

    #[test]
    fn coincident_light_does_not_produce_nan() {
        let scene = Scene {
            lights: vec![Light::new(Vec3::zero(), Rgb::broadcast(16.0))],
            ..Scene::default()
        };
        let c = scene.shade(Vec3::zero(), Vec3::zero());
        assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
    }
}
