// Copyright @yucwang 2026

pub mod bvh;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod scene;
pub mod shape;
