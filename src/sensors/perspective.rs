// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Pinhole camera with a look-at basis. `sample_ray` maps film
/// coordinates `u` in [0,1]^2 (origin at the top-left pixel) through the
/// vertical field of view to a primary ray from the fixed eye position.
pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect: width as Float / height as Float,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let dir = (self.right * px + self.up * py + self.forward).normalize();
        Ray3f::new(self.origin, dir, None, None)
    }
}

/* Tests for PerspectiveCamera */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_camera_center_ray() {
        let origin = Vector3f::new(0.0, 0.0, 0.0);
        let target = Vector3f::new(0.0, 0.0, -1.0);
        let up = Vector3f::new(0.0, 1.0, 0.0);
        let fov_y = std::f32::consts::FRAC_PI_2;
        let cam = PerspectiveCamera::new(origin, target, up, fov_y, 4, 4);

        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5));
        let dir = ray.dir();

        assert!((dir.x - 0.0).abs() < 1e-6);
        assert!((dir.y - 0.0).abs() < 1e-6);
        assert!((dir.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_camera_film_orientation() {
        let origin = Vector3f::zeros();
        let target = Vector3f::new(0.0, 0.0, 1.0);
        let up = Vector3f::new(0.0, 1.0, 0.0);
        let fov_y = std::f32::consts::FRAC_PI_2;
        let cam = PerspectiveCamera::new(origin, target, up, fov_y, 8, 4);

        // Top of the film looks up.
        let top = cam.sample_ray(&Vector2f::new(0.5, 0.0));
        assert!(top.dir().y > 0.0);

        // Bottom of the film looks down.
        let bottom = cam.sample_ray(&Vector2f::new(0.5, 1.0));
        assert!(bottom.dir().y < 0.0);

        // A 2:1 aspect spreads x twice as wide as y.
        let corner = cam.sample_ray(&Vector2f::new(1.0, 0.0));
        assert!(corner.dir().x.abs() > corner.dir().y.abs());
    }
}
