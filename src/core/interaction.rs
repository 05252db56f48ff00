// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

use std::sync::Arc;

/// The nearest hit returned by a ray/scene query. Produced fresh per
/// query and never mutated afterwards; "no hit" is expressed as
/// `Option::None` at the query boundary.
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    t: Float,
    emission: RGBSpectrum,
    material: Option<Arc<dyn Material>>,
}

pub struct SurfaceSampleRecord {
    intersection: SurfaceIntersection,
    pdf: Float,
}

impl SurfaceIntersection {
    pub fn new(p: Vector3f,
               geo_normal: Vector3f,
               t: Float) -> Self {
        Self { p, geo_normal, t, emission: RGBSpectrum::default(), material: None }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn emission(&self) -> RGBSpectrum {
        self.emission
    }

    pub fn is_emissive(&self) -> bool {
        !self.emission.is_black()
    }

    pub fn material(&self) -> Option<&dyn Material> {
        self.material.as_deref()
    }

    pub fn with_emission(mut self, emission: RGBSpectrum) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Arc<dyn Material>) -> Self {
        self.material = Some(material);
        self
    }
}

impl SurfaceSampleRecord {
    pub fn new(intersection: SurfaceIntersection, pdf: Float) -> Self {
        Self { intersection, pdf }
    }

    pub fn intersection(&self) -> &SurfaceIntersection {
        &self.intersection
    }

    pub fn into_intersection(self) -> SurfaceIntersection {
        self.intersection
    }

    pub fn pdf(&self) -> Float {
        self.pdf
    }

    pub fn set_pdf(&mut self, pdf: Float) {
        self.pdf = pdf;
    }
}
