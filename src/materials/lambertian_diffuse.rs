// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::math::constants::{Float, Vector2f, Vector3f, INV_PI};
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{build_tangent_frame, local_to_world,
                        sample_uniform_hemisphere, sample_uniform_hemisphere_pdf};

pub struct LambertianDiffuse {
    albedo: RGBSpectrum,
}

impl LambertianDiffuse {
    pub fn new(albedo: RGBSpectrum) -> Self {
        Self { albedo }
    }
}

impl Material for LambertianDiffuse {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum {
        if wo.dot(n) > 0.0 && wi.dot(n) > 0.0 {
            self.albedo * INV_PI
        } else {
            RGBSpectrum::black()
        }
    }

    fn sample(&self, _wo: &Vector3f, n: &Vector3f, u: &Vector2f) -> Vector3f {
        let local = sample_uniform_hemisphere(u);
        let (tangent, bitangent) = build_tangent_frame(n);
        local_to_world(&local, &tangent, &bitangent, n)
    }

    fn pdf(&self, _wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        if wi.dot(n) > 0.0 {
            sample_uniform_hemisphere_pdf()
        } else {
            0.0
        }
    }
}

/* Tests for LambertianDiffuse */
