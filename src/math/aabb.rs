// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};
use super::ray::Ray3f;

#[derive(Clone, Copy, Debug)]
pub struct AABB {
    pub min: Vector3f,
    pub max: Vector3f,
}

impl Default for AABB {
    fn default() -> Self {
        Self {
            min: Vector3f::new(Float::MAX, Float::MAX, Float::MAX),
            max: Vector3f::new(Float::MIN, Float::MIN, Float::MIN),
        }
    }
}

impl AABB {
    pub fn new(min: Vector3f, max: Vector3f) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vector3f {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vector3f {
        self.max - self.min
    }

    pub fn largest_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        self.expand_by_point(&other.min);
        self.expand_by_point(&other.max);
    }

    /// Slab test against the ray segment `[min_t, max_t]`.
    pub fn intersect(&self, ray: &Ray3f) -> bool {
        let mut t0 = ray.min_t;
        let mut t1 = ray.max_t;
        let origin = ray.origin();
        let dir = ray.dir();

        for axis in 0..3 {
            let inv_d = 1.0 / dir[axis];
            let mut near = (self.min[axis] - origin[axis]) * inv_d;
            let mut far = (self.max[axis] - origin[axis]) * inv_d;
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            t0 = t0.max(near);
            t1 = t1.min(far);
            if t0 > t1 {
                return false;
            }
        }

        true
    }
}

/* Tests for AABB */

#[cfg(test)]
mod tests {
    use super::{Ray3f, Vector3f, AABB};

    #[test]
    fn test_aabb_expand() {
        let mut bbox = AABB::default();
        bbox.expand_by_point(&Vector3f::new(-1.0, 0.0, 2.0));
        bbox.expand_by_point(&Vector3f::new(3.0, -2.0, 1.0));

        assert_eq!(bbox.min, Vector3f::new(-1.0, -2.0, 1.0));
        assert_eq!(bbox.max, Vector3f::new(3.0, 0.0, 2.0));
        assert_eq!(bbox.center(), Vector3f::new(1.0, -1.0, 1.5));
        assert_eq!(bbox.largest_axis(), 0);
    }

    #[test]
    fn test_aabb_ray_intersect() {
        let bbox = AABB::new(Vector3f::new(-1.0, -1.0, 4.0),
                             Vector3f::new(1.0, 1.0, 6.0));

        let hit = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(bbox.intersect(&hit));

        let miss = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 1.0, 0.0), None, None);
        assert!(!bbox.intersect(&miss));

        // Segment bounds exclude the box entirely.
        let short = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, Some(2.0));
        assert!(!bbox.intersect(&short));
    }
}
