// Copyright @yucwang 2026

use super::constants::Float;
use super::spectrum::RGBSpectrum;

use std::ops;

/// Row-major framebuffer, one radiance accumulator per pixel.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<RGBSpectrum>,
    width: usize,
    height: usize,
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = RGBSpectrum;

    fn index(&self, index: (usize, usize)) -> &RGBSpectrum {
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut RGBSpectrum {
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { data: vec![RGBSpectrum::default(); width * height],
               width,
               height }
    }

    pub fn from_pixels(width: usize, height: usize, data: Vec<RGBSpectrum>) -> Self {
        assert_eq!(data.len(), width * height);
        Self { data, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[RGBSpectrum] {
        &self.data
    }

    pub fn raw_copy(&self) -> Vec<(Float, Float, Float)> {
        self.data.iter().map(|c| (c.r(), c.g(), c.b())).collect()
    }
}

/* Tests for Bitmap */
