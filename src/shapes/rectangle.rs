// Copyright @yucwang 2026

use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f, Vector3f, EPSILON};
use crate::math::ray::Ray3f;

/// Planar parallelogram spanned by two edge vectors from a corner. The
/// normal follows the right-hand rule of `edge_u x edge_v`.
pub struct Rectangle {
    origin: Vector3f,
    edge_u: Vector3f,
    edge_v: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(origin: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let cross = edge_u.cross(&edge_v);
        let area = cross.norm();
        let normal = if area > 0.0 {
            cross / area
        } else {
            Vector3f::new(0.0, 0.0, 1.0)
        };

        Self { origin, edge_u, edge_v, normal, area }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    /// Parallelogram coordinates of a point already known to lie in the
    /// plane; `None` when it falls outside the edges.
    fn edge_coordinates(&self, p: &Vector3f) -> Option<(Float, Float)> {
        let q = p - self.origin;
        let uu = self.edge_u.dot(&self.edge_u);
        let uv = self.edge_u.dot(&self.edge_v);
        let vv = self.edge_v.dot(&self.edge_v);
        let qu = q.dot(&self.edge_u);
        let qv = q.dot(&self.edge_v);

        let det = uu * vv - uv * uv;
        if det.abs() <= Float::EPSILON {
            return None;
        }

        let alpha = (vv * qu - uv * qv) / det;
        let beta = (uu * qv - uv * qu) / det;
        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return None;
        }

        Some((alpha, beta))
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> AABB {
        let mut bbox = AABB::default();
        bbox.expand_by_point(&self.origin);
        bbox.expand_by_point(&(self.origin + self.edge_u));
        bbox.expand_by_point(&(self.origin + self.edge_v));
        bbox.expand_by_point(&(self.origin + self.edge_u + self.edge_v));
        // Pad the flat dimension so the slab test stays well behaved.
        bbox.min -= Vector3f::new(EPSILON, EPSILON, EPSILON);
        bbox.max += Vector3f::new(EPSILON, EPSILON, EPSILON);
        bbox
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let denom = ray.dir().dot(&self.normal);
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.origin - ray.origin()).dot(&self.normal) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let p = ray.at(t);
        self.edge_coordinates(&p)?;
        Some(SurfaceIntersection::new(p, self.normal, t))
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let p = self.origin + self.edge_u * u.x + self.edge_v * u.y;
        let intersection = SurfaceIntersection::new(p, self.normal, 0.0);
        let pdf = if self.area > 0.0 { 1.0 / self.area } else { 0.0 };
        SurfaceSampleRecord::new(intersection, pdf)
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

/* Tests for Rectangle */

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Rectangle {
        Rectangle::new(Vector3f::new(-1.0, -1.0, 5.0),
                       Vector3f::new(2.0, 0.0, 0.0),
                       Vector3f::new(0.0, 2.0, 0.0))
    }

    #[test]
    fn test_rectangle_hit_and_miss() {
        let quad = unit_quad();

        let hit_ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let hit = quad.ray_intersection(&hit_ray).expect("expected hit");
        assert!((hit.t() - 5.0).abs() < 1e-5);
        assert!((hit.p() - Vector3f::new(0.0, 0.0, 5.0)).norm() < 1e-5);

        let miss_ray = Ray3f::new(Vector3f::new(3.0, 0.0, 0.0),
                                  Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(quad.ray_intersection(&miss_ray).is_none());

        let parallel_ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(quad.ray_intersection(&parallel_ray).is_none());
    }

    #[test]
    fn test_rectangle_respects_min_t() {
        let quad = unit_quad();
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 5.0),
                             Vector3f::new(0.0, 0.0, 1.0),
                             Some(EPSILON), None);
        // Origin sits on the quad; the segment guard must reject t = 0.
        assert!(quad.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_rectangle_area_and_sampling() {
        let quad = unit_quad();
        assert!((quad.surface_area() - 4.0).abs() < 1e-5);

        let sample = quad.sample(&Vector2f::new(0.25, 0.75));
        assert!((sample.pdf() - 0.25).abs() < 1e-5);
        let p = sample.intersection().p();
        assert!((p - Vector3f::new(-0.5, 0.5, 5.0)).norm() < 1e-5);
    }

    #[test]
    fn test_rectangle_normal_orientation() {
        let quad = unit_quad();
        assert!((quad.normal() - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-5);

        let flipped = Rectangle::new(Vector3f::new(-1.0, -1.0, 5.0),
                                     Vector3f::new(0.0, 2.0, 0.0),
                                     Vector3f::new(2.0, 0.0, 0.0));
        assert!((flipped.normal() - Vector3f::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }
}
