// Copyright @yucwang 2026

use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f, Vector3f, PI};
use crate::math::ray::Ray3f;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let oc = ray.origin() - self.center;
        let b = oc.dot(&ray.dir());
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let mut t = -b - sqrt_d;
        if !ray.test_segment(t) {
            t = -b + sqrt_d;
            if !ray.test_segment(t) {
                return None;
            }
        }

        let p = ray.at(t);
        let n = (p - self.center) / self.radius;
        Some(SurfaceIntersection::new(p, n, t))
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let z = 1.0 - 2.0 * u.x;
        let r = (1.0 - z * z).max(0.0).sqrt();
        let phi = 2.0 * PI * u.y;
        let n = Vector3f::new(r * phi.cos(), r * phi.sin(), z);

        let p = self.center + n * self.radius;
        let intersection = SurfaceIntersection::new(p, n, 0.0);
        SurfaceSampleRecord::new(intersection, 1.0 / self.surface_area())
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}

/* Tests for Sphere */
