// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Surface reflectance model. Directions are world-space unit vectors:
/// `wo` points back toward the previous path vertex, `wi` toward the
/// next one, `n` is the geometric surface normal at the shading point.
pub trait Material: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// BRDF value for the (wo, wi) pair.
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum;

    /// Importance-sample an outgoing direction around `n`.
    fn sample(&self, wo: &Vector3f, n: &Vector3f, u: &Vector2f) -> Vector3f;

    /// Density of `sample` producing `wi`, w.r.t. solid angle.
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float;
}
