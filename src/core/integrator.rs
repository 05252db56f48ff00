// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Radiance estimator for a single ray. Reads the scene only; all
/// mutable state lives in the caller-provided random stream.
pub trait Integrator: Sync {
    fn cast_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum;
}
