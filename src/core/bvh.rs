// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

#[derive(Clone)]
struct BVHNode {
    bounds: AABB,
    left: Option<usize>,
    right: Option<usize>,
    start: usize,
    count: usize,
}

impl BVHNode {
    fn leaf(bounds: AABB, start: usize, count: usize) -> Self {
        Self { bounds, left: None, right: None, start, count }
    }

    fn interior(bounds: AABB, left: usize, right: usize) -> Self {
        Self { bounds, left: Some(left), right: Some(right), start: 0, count: 0 }
    }

    fn is_leaf(&self) -> bool {
        self.count > 0
    }
}

/// Median-split BVH over primitive bounds. The structure only stores
/// bounds and indices; primitive intersection is delegated to the caller
/// through a callback, keeping it independent of the shape types.
pub struct BVH {
    nodes: Vec<BVHNode>,
    indices: Vec<usize>,
    max_leaf_size: usize,
}

impl BVH {
    pub fn new(prim_bounds: Vec<AABB>, prim_centroids: Vec<Vector3f>) -> Self {
        Self::with_max_leaf_size(prim_bounds, prim_centroids, 4)
    }

    pub fn with_max_leaf_size(prim_bounds: Vec<AABB>,
                              prim_centroids: Vec<Vector3f>,
                              max_leaf_size: usize) -> Self {
        let mut bvh = Self {
            nodes: Vec::new(),
            indices: (0..prim_bounds.len()).collect(),
            max_leaf_size: max_leaf_size.max(1),
        };

        if !bvh.indices.is_empty() {
            bvh.build_node(0, prim_bounds.len(), &prim_bounds, &prim_centroids);
        }

        bvh
    }

    fn build_node(&mut self,
                  start: usize,
                  end: usize,
                  prim_bounds: &[AABB],
                  prim_centroids: &[Vector3f]) -> usize {
        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();
        for &prim in &self.indices[start..end] {
            bounds.expand_by_aabb(&prim_bounds[prim]);
            centroid_bounds.expand_by_point(&prim_centroids[prim]);
        }

        let count = end - start;
        if count <= self.max_leaf_size {
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return self.nodes.len() - 1;
        }

        let axis = centroid_bounds.largest_axis();
        let mid = start + count / 2;
        self.indices[start..end].sort_unstable_by(|&a, &b| {
            prim_centroids[a][axis]
                .partial_cmp(&prim_centroids[b][axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // All centroids collapsed onto one point; splitting cannot help.
        if centroid_bounds.extent()[axis] <= 0.0 {
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return self.nodes.len() - 1;
        }

        let left = self.build_node(start, mid, prim_bounds, prim_centroids);
        let right = self.build_node(mid, end, prim_bounds, prim_centroids);
        self.nodes.push(BVHNode::interior(bounds, left, right));
        self.nodes.len() - 1
    }

    fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.nodes.len() - 1)
        }
    }

    /// Nearest hit along `ray`. `intersect_prim(prim_index, ray)` returns
    /// the primitive's hit and its ray parameter `t`.
    pub fn ray_intersection<T, F>(&self, ray: &Ray3f, mut intersect_prim: F) -> Option<(usize, T)>
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        let root = self.root()?;

        let mut clipped = *ray;
        let mut nearest: Option<(usize, T)> = None;
        let mut stack = vec![root];

        while let Some(node_index) = stack.pop() {
            let node = &self.nodes[node_index];
            if !node.bounds.intersect(&clipped) {
                continue;
            }

            if node.is_leaf() {
                for &prim in &self.indices[node.start..node.start + node.count] {
                    if let Some((hit, t)) = intersect_prim(prim, &clipped) {
                        if clipped.test_segment(t) {
                            clipped.max_t = t;
                            nearest = Some((prim, hit));
                        }
                    }
                }
            } else {
                if let Some(left) = node.left {
                    stack.push(left);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }

        nearest
    }
}

/* Tests for BVH */

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: Float) -> AABB {
        AABB::new(Vector3f::new(x - 0.5, -0.5, -0.5),
                  Vector3f::new(x + 0.5, 0.5, 0.5))
    }

    #[test]
    fn test_bvh_returns_nearest_primitive() {
        let xs = [9.0, 3.0, 6.0, 12.0];
        let bounds: Vec<AABB> = xs.iter().map(|&x| unit_box_at(x)).collect();
        let centroids: Vec<Vector3f> = bounds.iter().map(|b| b.center()).collect();
        let bvh = BVH::new(bounds, centroids);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        let hit = bvh.ray_intersection(&ray, |prim, _ray| Some((xs[prim], xs[prim])));

        let (prim, t) = hit.expect("expected a hit");
        assert_eq!(prim, 1);
        assert_eq!(t, 3.0);
    }

    #[test]
    fn test_bvh_respects_ray_segment() {
        let bounds = vec![unit_box_at(5.0)];
        let centroids: Vec<Vector3f> = bounds.iter().map(|b| b.center()).collect();
        let bvh = BVH::new(bounds, centroids);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, Some(2.0));
        let hit = bvh.ray_intersection(&ray, |_prim, _ray| Some(((), 5.0)));
        assert!(hit.is_none());
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BVH::new(Vec::new(), Vec::new());
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(bvh.ray_intersection(&ray, |_prim, _ray| Some(((), 1.0))).is_none());
    }
}
