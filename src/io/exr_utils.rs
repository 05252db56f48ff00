// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;

use exr::error::UnitResult;
use exr::prelude::*;

// Write the linear (pre-gamma) framebuffer as an OpenEXR image.
pub fn write_exr_to_file(bitmap: &Bitmap, file_path: &str) -> UnitResult {
    log::info!("Starting writing OpenEXR image: {}.", file_path);

    let image = bitmap.raw_copy();
    let width = bitmap.width();
    write_rgb_file(file_path, width, bitmap.height(), |x, y| {
        image[y * width + x]
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
