// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector2f, Vector3f, EPSILON};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

const DEFAULT_SURVIVAL_PROBABILITY: Float = 0.8;
const DEFAULT_OCCLUSION_TOLERANCE: Float = 1e-3;

// The roulette alone bounds the expected path length; the cap only
// exists so an unlucky streak cannot walk forever. At survival 0.8 the
// probability of ever reaching it is about 0.8^64, far below the noise
// floor of any practical sample count.
const DEFAULT_MAX_DEPTH: u32 = 64;

/// Unidirectional path tracer: next-event estimation for direct lighting
/// at every vertex, BRDF-sampled continuation with Russian-roulette
/// termination for indirect lighting.
pub struct PathIntegrator {
    survival_probability: Float,
    occlusion_tolerance: Float,
    max_depth: u32,
}

impl PathIntegrator {
    pub fn new(survival_probability: Float) -> Self {
        assert!(survival_probability > 0.0 && survival_probability < 1.0,
                "Russian roulette survival probability must lie in (0, 1)");
        Self {
            survival_probability,
            occlusion_tolerance: DEFAULT_OCCLUSION_TOLERANCE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// The shadow-ray distance comparison is scene-scale dependent, so
    /// the tolerance is a tunable rather than a constant.
    pub fn with_occlusion_tolerance(mut self, tolerance: Float) -> Self {
        self.occlusion_tolerance = tolerance;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn survival_probability(&self) -> Float {
        self.survival_probability
    }

    /// Direct illumination at `hit` by sampling one point on the scene's
    /// emitters, area-weighted across emitters.
    fn direct_light(&self,
                    scene: &Scene,
                    hit: &SurfaceIntersection,
                    wo: &Vector3f,
                    rng: &mut LcgRng) -> RGBSpectrum {
        let light = scene.sample_light(rng);
        let pdf_light = light.pdf();
        if pdf_light <= 0.0 {
            return RGBSpectrum::black();
        }

        let to_light = light.intersection().p() - hit.p();
        let dist2 = to_light.dot(&to_light);
        if dist2 <= 0.0 {
            return RGBSpectrum::black();
        }
        let dist = dist2.sqrt();
        let ws = to_light / dist;

        let n = hit.geo_normal();
        let n_light = light.intersection().geo_normal();

        // Back-facing configurations carry no energy. Clamping here keeps
        // a degenerate emitter from injecting negative radiance.
        let cos_surface = ws.dot(&n).max(0.0);
        let cos_light = (-ws).dot(&n_light).max(0.0);
        if cos_surface == 0.0 || cos_light == 0.0 {
            return RGBSpectrum::black();
        }

        // Occluded when something sits strictly between the shading point
        // and the sampled light point. The tolerance absorbs the float
        // error of re-intersecting the light surface itself; a ray that
        // escapes entirely counts as unoccluded.
        let shadow_ray = Ray3f::new(hit.p(), ws, Some(EPSILON), None);
        let visible = match scene.ray_intersection(&shadow_ray) {
            Some(blocker) => {
                dist - (blocker.p() - hit.p()).norm() <= self.occlusion_tolerance
            }
            None => true,
        };
        if !visible {
            return RGBSpectrum::black();
        }

        let material = match hit.material() {
            Some(m) => m,
            None => return RGBSpectrum::black(),
        };

        let f = material.eval(wo, &ws, &n);
        light.intersection().emission() * f
            * (cos_surface * cos_light / dist2 / pdf_light)
    }
}

impl Integrator for PathIntegrator {
    fn cast_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum {
        let mut radiance = RGBSpectrum::black();
        let mut throughput = RGBSpectrum::splat(1.0);

        let mut ray = *ray;
        let mut hit = match scene.ray_intersection(&ray) {
            Some(h) => h,
            None => return radiance,
        };

        let mut depth = 0u32;
        loop {
            let wo = -ray.dir();
            let n = hit.geo_normal();

            // A camera ray landing on an emitter sees its radiance
            // unattenuated; every deeper vertex gets emitter energy
            // exclusively through light sampling, so indirect hits on
            // emitters are never double counted.
            let direct = if depth == 0 && hit.is_emissive() {
                hit.emission()
            } else {
                self.direct_light(scene, &hit, &wo, rng)
            };
            radiance += throughput * direct;

            if rng.next_f32() >= self.survival_probability {
                break;
            }
            if depth >= self.max_depth {
                break;
            }

            let material = match hit.material() {
                Some(m) => m,
                None => break,
            };

            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let wi = material.sample(&wo, &n, &u);
            let pdf = material.pdf(&wo, &wi, &n);
            if pdf <= 0.0 {
                break;
            }
            let cos_theta = wi.dot(&n);
            if cos_theta <= 0.0 {
                break;
            }
            let f = material.eval(&wo, &wi, &n);

            let bounce = Ray3f::new(hit.p(), wi, Some(EPSILON), None);
            let next = match scene.ray_intersection(&bounce) {
                Some(h) => h,
                None => break,
            };
            // The walk only continues into non-emissive surfaces.
            if next.is_emissive() {
                break;
            }

            throughput *= f * (cos_theta / pdf / self.survival_probability);
            if throughput.is_black() {
                break;
            }

            ray = bounce;
            hit = next;
            depth += 1;
        }

        radiance
    }
}

/* Tests for PathIntegrator */
