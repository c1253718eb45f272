//! Boolean monochrome bitmap — the quantizer's output type.

use image::{GrayImage, Luma};

/// A 1-bit image: `true` = white, `false` = black.
///
/// Row-major storage. The packer and encoder accept only this type, so a
/// "not actually black-and-white" image cannot reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitImage {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BitImage {
    /// Create an all-black bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at (x, y). Panics if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.pixels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Set the pixel at (x, y). Panics if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, white: bool) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.pixels[(y as usize) * (self.width as usize) + x as usize] = white;
    }

    /// Iterate rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // max(1) keeps chunks() legal for zero-width images (no rows yielded
        // either way, since the pixel buffer is empty).
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Convert to an 8-bit grayscale image (white = 255) for encoding.
    pub fn to_gray(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let val = if self.get(x, y) { 255 } else { 0 };
                img.put_pixel(x, y, Luma([val]));
            }
        }
        img
    }
}
