// Copyright @yucwang 2026

#![allow(dead_code)]

use galette::integrators::path::PathIntegrator;
use galette::io::{exr_utils, png_utils, ppm_utils};
use galette::renderers::{ParallelRenderer, Renderer};
use galette::scenes::cornell_box::cornell_box;

use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <output.(ppm|png|exr)> [--spp N] [--threads N] [--seed N] [--rr P] [--width N] [--height N]", args[0]);
        std::process::exit(1);
    }

    let output_path = &args[1];
    let mut spp: u32 = 16;
    let mut threads: Option<usize> = None;
    let mut seed: u64 = 0;
    let mut survival: f32 = 0.8;
    let mut width: usize = 784;
    let mut height: usize = 784;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(spp);
            }
            "--threads" => {
                i += 1;
                threads = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(seed);
            }
            "--rr" => {
                i += 1;
                survival = args.get(i).and_then(|v| v.parse::<f32>().ok()).unwrap_or(survival);
            }
            "--width" => {
                i += 1;
                width = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(width);
            }
            "--height" => {
                i += 1;
                height = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(height);
            }
            _ => {}
        }
        i += 1;
    }

    let (scene, camera) = cornell_box(width, height);

    let integrator = Box::new(PathIntegrator::new(survival));
    let mut renderer = ParallelRenderer::new(integrator)
        .with_samples_per_pixel(spp)
        .with_seed(seed);
    if let Some(threads) = threads {
        renderer = renderer.with_thread_count(threads);
    }

    let image = renderer.render(&scene, &camera);

    let result = if output_path.ends_with(".exr") {
        exr_utils::write_exr_to_file(&image, output_path)
            .map_err(|e| e.to_string())
    } else if output_path.ends_with(".png") {
        png_utils::write_png_to_file(&image, output_path)
            .map_err(|e| e.to_string())
    } else {
        ppm_utils::write_ppm_to_file(&image, output_path)
            .map_err(|e| e.to_string())
    };

    if let Err(e) = result {
        log::error!("failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }
}
