// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use std::fs::File;
use std::io::{self, BufWriter, Write};

const GAMMA: Float = 0.6;

/// Display encoding for one channel: clamp to [0, 1], gamma, quantize.
pub fn gamma_encode_channel(c: Float) -> u8 {
    (255.0 * c.max(0.0).min(1.0).powf(GAMMA)) as u8
}

/// Interleaved gamma-encoded RGB bytes for the whole framebuffer.
pub fn gamma_encode_pixels(bitmap: &Bitmap) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bitmap.pixels().len() * 3);
    for pixel in bitmap.pixels() {
        bytes.push(gamma_encode_channel(pixel.r()));
        bytes.push(gamma_encode_channel(pixel.g()));
        bytes.push(gamma_encode_channel(pixel.b()));
    }
    bytes
}

// Write the framebuffer as a binary PPM (P6) file.
pub fn write_ppm_to_file(bitmap: &Bitmap, file_path: &str) -> io::Result<()> {
    log::info!("Starting writing PPM image: {}.", file_path);

    let mut file = BufWriter::new(File::create(file_path)?);
    write!(file, "P6\n{} {}\n255\n", bitmap.width(), bitmap.height())?;
    file.write_all(&gamma_encode_pixels(bitmap))?;
    file.flush()?;

    log::info!("PPM written to: {}.", file_path);
    Ok(())
}

/* Tests for the PPM writer */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::spectrum::RGBSpectrum;
    use std::fs;

    fn constant_bitmap(width: usize, height: usize, value: Float) -> Bitmap {
        let mut bitmap = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap[(x, y)] = RGBSpectrum::splat(value);
            }
        }
        bitmap
    }

    #[test]
    fn test_gamma_encode_endpoints() {
        // 1^0.6 = 1 and 0^0.6 = 0: the endpoints survive encoding.
        assert_eq!(gamma_encode_channel(1.0), 255);
        assert_eq!(gamma_encode_channel(0.0), 0);
        // Out-of-range values clamp before encoding.
        assert_eq!(gamma_encode_channel(7.5), 255);
        assert_eq!(gamma_encode_channel(-0.5), 0);
    }

    #[test]
    fn test_ppm_header_and_payload() {
        let path = std::env::temp_dir().join("galette_ppm_white.ppm");
        let path = path.to_str().unwrap().to_string();

        let bitmap = constant_bitmap(3, 2, 1.0);
        write_ppm_to_file(&bitmap, &path).expect("write failed");

        let contents = fs::read(&path).expect("read failed");
        let header = b"P6\n3 2\n255\n";
        assert_eq!(&contents[..header.len()], header);
        assert_eq!(contents.len(), header.len() + 3 * 2 * 3);
        assert!(contents[header.len()..].iter().all(|&b| b == 255));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_ppm_black_framebuffer() {
        let path = std::env::temp_dir().join("galette_ppm_black.ppm");
        let path = path.to_str().unwrap().to_string();

        let bitmap = constant_bitmap(4, 4, 0.0);
        write_ppm_to_file(&bitmap, &path).expect("write failed");

        let contents = fs::read(&path).expect("read failed");
        let header = b"P6\n4 4\n255\n";
        assert_eq!(&contents[..header.len()], header);
        assert!(contents[header.len()..].iter().all(|&b| b == 0));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_ppm_write_failure_is_reported() {
        let bitmap = constant_bitmap(2, 2, 0.5);
        let result = write_ppm_to_file(&bitmap, "/nonexistent-dir/out.ppm");
        assert!(result.is_err());
    }
}
