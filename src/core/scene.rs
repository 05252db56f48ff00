// Copyright @yucwang 2026

use crate::core::bvh::BVH;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::material::Material;
use crate::core::rng::LcgRng;
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn Material>,
    pub emission: RGBSpectrum,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn Material>) -> Self {
        Self { shape, material, emission: RGBSpectrum::default(), name: None }
    }

    pub fn with_emission(shape: Arc<dyn Shape>,
                         material: Arc<dyn Material>,
                         emission: RGBSpectrum) -> Self {
        Self { shape, material, emission, name: None }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn is_emissive(&self) -> bool {
        !self.emission.is_black()
    }

    pub fn area(&self) -> Float {
        self.shape.surface_area()
    }
}

/// Static scene: an object table plus a BVH built once before any worker
/// starts. All query methods take `&self` and are safe to call from many
/// render threads concurrently.
pub struct Scene {
    objects: Vec<SceneObject>,
    scene_bounds: AABB,
    bvh: Option<BVH>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            scene_bounds: AABB::default(),
            bvh: None,
        }
    }

    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            scene_bounds: AABB::default(),
            bvh: None,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
        self.bvh = None;
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn scene_bounds(&self) -> &AABB {
        &self.scene_bounds
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn build_bvh(&mut self) {
        let mut prim_bounds = Vec::with_capacity(self.objects.len());
        let mut prim_centroids = Vec::with_capacity(self.objects.len());
        let mut scene_bounds = AABB::default();
        for obj in &self.objects {
            let bounds = obj.shape.bounding_box();
            prim_centroids.push(bounds.center());
            prim_bounds.push(bounds);
            scene_bounds.expand_by_aabb(&bounds);
        }

        self.bvh = Some(BVH::new(prim_bounds, prim_centroids));
        self.scene_bounds = scene_bounds;
    }

    /// Nearest hit against the whole scene, with the hit object's
    /// emission and material attached.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let bvh = self.bvh.as_ref().expect("BVH must be built before ray_intersection");
        let (idx, hit) = bvh.ray_intersection(ray, |prim_idx, ray| {
            self.objects[prim_idx].shape.ray_intersection(ray).map(|h| {
                let t = h.t();
                (h, t)
            })
        })?;

        let object = &self.objects[idx];
        Some(hit
            .with_emission(object.emission)
            .with_material(object.material.clone()))
    }

    /// Total surface area of all emissive objects.
    pub fn emissive_area(&self) -> Float {
        self.objects
            .iter()
            .filter(|obj| obj.is_emissive())
            .map(|obj| obj.area())
            .sum()
    }

    /// Uniform-by-area point on the union of all emitters: an emitter is
    /// picked with probability proportional to its area, then a uniform
    /// point on it, so the returned pdf is 1 / total emissive area.
    ///
    /// Precondition: the scene contains at least one emissive object.
    pub fn sample_light(&self, rng: &mut LcgRng) -> SurfaceSampleRecord {
        let total_area = self.emissive_area();
        assert!(total_area > 0.0,
                "sample_light requires at least one emissive object in the scene");

        let threshold = rng.next_f32() * total_area;
        let u = Vector2f::new(rng.next_f32(), rng.next_f32());

        let mut running_area = 0.0;
        let mut picked = None;
        for obj in self.objects.iter().filter(|obj| obj.is_emissive()) {
            running_area += obj.area();
            picked = Some(obj);
            if threshold <= running_area {
                break;
            }
        }

        // `picked` is always Some here: total_area > 0 guarantees at
        // least one emissive object, and round-off past the last running
        // sum falls back to the final emitter.
        let obj = picked.expect("emissive object lookup cannot fail");
        let sample = obj.shape.sample(&u);
        let intersection = sample.into_intersection().with_emission(obj.emission);
        SurfaceSampleRecord::new(intersection, 1.0 / total_area)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/* Tests for Scene */
