// Copyright @yucwang 2026

pub mod parallel;
pub mod renderer;

pub use self::parallel::ParallelRenderer;
pub use self::renderer::Renderer;
