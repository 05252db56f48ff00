// Copyright @yucwang 2026

use crate::io::ppm_utils::gamma_encode_pixels;
use crate::math::bitmap::Bitmap;

// Write the framebuffer as an 8-bit PNG with the same display encoding
// as the PPM path.
pub fn write_png_to_file(bitmap: &Bitmap, file_path: &str) -> image::ImageResult<()> {
    log::info!("Starting writing PNG image: {}.", file_path);

    image::save_buffer(file_path,
                       &gamma_encode_pixels(bitmap),
                       bitmap.width() as u32,
                       bitmap.height() as u32,
                       image::ColorType::Rgb8)?;

    log::info!("PNG written to: {}.", file_path);
    Ok(())
}
