// Copyright @yucwang 2026

pub mod lambertian_diffuse;
