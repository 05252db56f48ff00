// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::{pixel_seed, LcgRng};
use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

pub use super::renderer::Renderer;

const REPORT_INTERVAL: Duration = Duration::from_millis(200);

/// Framebuffer shared across workers during one render. Pixel indices
/// are claimed exclusively from the atomic cursor, so no slot is ever
/// written by two threads; that disjointness is the whole safety
/// argument, there is no locking on the buffer.
struct SharedFramebuffer {
    pixels: Vec<UnsafeCell<RGBSpectrum>>,
}

unsafe impl Sync for SharedFramebuffer {}

impl SharedFramebuffer {
    fn new(len: usize) -> Self {
        let mut pixels = Vec::with_capacity(len);
        pixels.resize_with(len, || UnsafeCell::new(RGBSpectrum::default()));
        Self { pixels }
    }

    /// Safety: the caller must be the only writer of `index` for the
    /// lifetime of the render.
    unsafe fn store(&self, index: usize, value: RGBSpectrum) {
        *self.pixels[index].get() = value;
    }

    fn into_bitmap(self, width: usize, height: usize) -> Bitmap {
        let pixels = self.pixels.into_iter().map(UnsafeCell::into_inner).collect();
        Bitmap::from_pixels(width, height, pixels)
    }
}

/// Pull-based parallel renderer: a fixed pool of worker threads claims
/// pixels one at a time from a shared atomic cursor, so slow pixels
/// (deep paths) never stall the rest of a statically assigned stripe.
/// A dedicated reporter thread polls the completed-pixel counter and
/// drives the progress bar without ever blocking a worker.
pub struct ParallelRenderer {
    integrator: Box<dyn Integrator>,
    samples_per_pixel: u32,
    thread_count: usize,
    seed: u64,
}

impl ParallelRenderer {
    pub fn new(integrator: Box<dyn Integrator>) -> Self {
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            integrator,
            samples_per_pixel: 16,
            thread_count,
            seed: 0,
        }
    }

    pub fn with_samples_per_pixel(mut self, spp: u32) -> Self {
        self.samples_per_pixel = spp.max(1);
        self
    }

    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }
}

impl Renderer for ParallelRenderer {
    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> Bitmap {
        let width = camera.width();
        let height = camera.height();
        if width == 0 || height == 0 {
            return Bitmap::new(0, 0);
        }

        let total = width * height;
        let spp = self.samples_per_pixel.max(1);
        let inv_spp = 1.0 / (spp as Float);

        log::info!("rendering {}x{} at {} spp on {} threads",
                   width, height, spp, self.thread_count);

        let framebuffer = SharedFramebuffer::new(total);
        let next_pixel = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);
        let integrator = self.integrator.as_ref();

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pixels")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        thread::scope(|scope| {
            for _ in 0..self.thread_count {
                scope.spawn(|| {
                    loop {
                        let index = next_pixel.fetch_add(1, Ordering::Relaxed);
                        if index >= total {
                            break;
                        }

                        let x = index % width;
                        let y = index / width;
                        let mut rng = LcgRng::new(pixel_seed(self.seed, x, y));

                        let u = Vector2f::new((x as Float + 0.5) / (width as Float),
                                              (y as Float + 0.5) / (height as Float));
                        let mut color = RGBSpectrum::black();
                        for _ in 0..spp {
                            let ray = camera.sample_ray(&u);
                            let sample = integrator.cast_ray(scene, &ray, &mut rng);
                            if sample.is_finite() {
                                color += sample;
                            } else {
                                log::warn!("discarding non-finite sample at pixel ({}, {})", x, y);
                            }
                        }

                        // This worker is the sole owner of `index`.
                        unsafe {
                            framebuffer.store(index, color * inv_spp);
                        }
                        completed.fetch_add(1, Ordering::Release);
                    }
                });
            }

            scope.spawn(|| {
                loop {
                    let done = completed.load(Ordering::Acquire);
                    progress.set_position(done as u64);
                    if done >= total {
                        break;
                    }
                    thread::sleep(REPORT_INTERVAL);
                }
            });
        });
        progress.finish_and_clear();

        framebuffer.into_bitmap(width, height)
    }
}

/* Tests for ParallelRenderer */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::core::scene::SceneObject;
    use crate::integrators::path::PathIntegrator;
    use crate::materials::lambertian_diffuse::LambertianDiffuse;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;
    use crate::shapes::rectangle::Rectangle;
    use std::sync::Arc;

    struct ConstantIntegrator(RGBSpectrum);

    impl Integrator for ConstantIntegrator {
        fn cast_ray(&self, _scene: &Scene, _ray: &Ray3f, _rng: &mut LcgRng) -> RGBSpectrum {
            self.0
        }
    }

    /// Encodes the primary ray direction, so every pixel has a value no
    /// other pixel can produce.
    struct DirectionIntegrator;

    impl Integrator for DirectionIntegrator {
        fn cast_ray(&self, _scene: &Scene, ray: &Ray3f, _rng: &mut LcgRng) -> RGBSpectrum {
            let d = ray.dir();
            RGBSpectrum::new(d.x, d.y, d.z)
        }
    }

    fn empty_scene() -> Scene {
        let mut scene = Scene::new();
        scene.build_bvh();
        scene
    }

    fn test_camera(width: usize, height: usize) -> PerspectiveCamera {
        PerspectiveCamera::new(Vector3f::zeros(),
                               Vector3f::new(0.0, 0.0, 1.0),
                               Vector3f::new(0.0, 1.0, 0.0),
                               std::f32::consts::FRAC_PI_2,
                               width, height)
    }

    #[test]
    fn test_every_pixel_is_filled_exactly_once() {
        let scene = empty_scene();
        let camera = test_camera(17, 13);
        let renderer = ParallelRenderer::new(Box::new(ConstantIntegrator(RGBSpectrum::splat(1.0))))
            .with_samples_per_pixel(4)
            .with_thread_count(4);

        let bitmap = renderer.render(&scene, &camera);
        assert_eq!(bitmap.width(), 17);
        assert_eq!(bitmap.height(), 13);
        for pixel in bitmap.pixels() {
            // A skipped pixel would stay black; a double-sampled pixel
            // cannot occur because each slot is written once with the
            // spp average.
            assert_eq!(*pixel, RGBSpectrum::splat(1.0));
        }
    }

    #[test]
    fn test_pixels_receive_their_own_rays() {
        let scene = empty_scene();
        let width = 9;
        let height = 7;
        let camera = test_camera(width, height);
        let renderer = ParallelRenderer::new(Box::new(DirectionIntegrator))
            .with_samples_per_pixel(1)
            .with_thread_count(3);

        let bitmap = renderer.render(&scene, &camera);
        for y in 0..height {
            for x in 0..width {
                let u = Vector2f::new((x as Float + 0.5) / width as Float,
                                      (y as Float + 0.5) / height as Float);
                let d = camera.sample_ray(&u).dir();
                let expected = RGBSpectrum::new(d.x, d.y, d.z);
                assert_eq!(bitmap[(x, y)], expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_framebuffer_identical_across_worker_counts() {
        let white = Arc::new(LambertianDiffuse::new(RGBSpectrum::splat(0.7)));
        let mut scene = Scene::new();
        // Diffuse wall in front of the camera, emitter behind it facing
        // the wall: pixel estimates depend on the per-pixel random
        // streams, not just on geometry.
        scene.add_object(SceneObject::new(
            Arc::new(Rectangle::new(Vector3f::new(-4.0, -4.0, 6.0),
                                    Vector3f::new(0.0, 8.0, 0.0),
                                    Vector3f::new(8.0, 0.0, 0.0))),
            white.clone(),
        ));
        scene.add_object(SceneObject::with_emission(
            Arc::new(Rectangle::new(Vector3f::new(-1.0, -1.0, -6.0),
                                    Vector3f::new(2.0, 0.0, 0.0),
                                    Vector3f::new(0.0, 2.0, 0.0))),
            white.clone(),
            RGBSpectrum::new(30.0, 20.0, 10.0),
        ));
        scene.build_bvh();
        let camera = test_camera(16, 12);

        let render_with = |threads: usize| {
            let renderer = ParallelRenderer::new(Box::new(PathIntegrator::new(0.8)))
                .with_samples_per_pixel(2)
                .with_thread_count(threads)
                .with_seed(42);
            renderer.render(&scene, &camera)
        };

        let reference = render_with(1);
        for &threads in &[2usize, 8] {
            let bitmap = render_with(threads);
            for y in 0..camera.height() {
                for x in 0..camera.width() {
                    assert_eq!(bitmap[(x, y)], reference[(x, y)],
                               "pixel ({}, {}) with {} threads", x, y, threads);
                }
            }
        }
    }

    #[test]
    fn test_spp_floor_is_one() {
        let renderer = ParallelRenderer::new(Box::new(ConstantIntegrator(RGBSpectrum::splat(2.0))))
            .with_samples_per_pixel(0);
        assert_eq!(renderer.samples_per_pixel(), 1);
    }
}
