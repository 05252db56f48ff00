// Copyright @yucwang 2026

#![allow(dead_code)]

pub mod core;
pub mod math;
pub mod io;
pub mod shapes;
pub mod materials;
pub mod sensors;
pub mod scenes;
pub mod integrators;
pub mod renderers;
