//! Quantization — reducing grayscale to 1-bit black-and-white.
//!
//! Provides Floyd-Steinberg error-diffusion dithering and simple threshold
//! conversion. Both produce a [`BitImage`] with the input's dimensions.

use image::GrayImage;
use tracing::debug;

use crate::bitmap::BitImage;

/// Default threshold value for binarization.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Quantization algorithm selection.
///
/// Exactly one algorithm is active per conversion; the enum makes the
/// threshold/dither combination unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMode {
    /// Fixed threshold: white iff sample >= the given value.
    Threshold(u8),
    /// Floyd-Steinberg error-diffusion dithering.
    Dither,
}

impl Default for QuantizeMode {
    fn default() -> Self {
        Self::Threshold(DEFAULT_THRESHOLD)
    }
}

/// Quantize a grayscale image with the selected algorithm.
pub fn quantize(img: &GrayImage, mode: QuantizeMode) -> BitImage {
    match mode {
        QuantizeMode::Threshold(t) => threshold(img, t),
        QuantizeMode::Dither => floyd_steinberg(img),
    }
}

/// Simple threshold conversion without dithering.
///
/// Pixels with values >= `threshold` become white, others black.
/// Deterministic and idempotent on already-binary input.
pub fn threshold(img: &GrayImage, threshold: u8) -> BitImage {
    let (width, height) = img.dimensions();
    debug!(width, height, threshold, "Applying threshold conversion");

    let mut output = BitImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            output.set(x, y, img.get_pixel(x, y).0[0] >= threshold);
        }
    }
    output
}

/// Apply Floyd-Steinberg dithering to a grayscale image.
///
/// Pixels are processed in row-major order against the 128 midpoint.
/// Error distribution pattern:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
pub fn floyd_steinberg(img: &GrayImage) -> BitImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    // Work with i16 buffer to handle error diffusion overflow
    let mut buffer: Vec<Vec<i16>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| i16::from(img.get_pixel(x, y).0[0]))
                .collect()
        })
        .collect();

    let mut output = BitImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let old_pixel = buffer[y as usize][x as usize];
            let white = old_pixel >= i16::from(DEFAULT_THRESHOLD);
            let new_pixel: i16 = if white { 255 } else { 0 };
            output.set(x, y, white);

            let error = old_pixel - new_pixel;
            distribute_error(&mut buffer, x, y, width, height, error);
        }
    }
    output
}

/// Distribute quantization error to neighboring unprocessed pixels.
fn distribute_error(
    buffer: &mut [Vec<i16>],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    error: i16,
) {
    let xu = x as usize;
    let yu = y as usize;

    // Right: 7/16
    if x + 1 < width {
        buffer[yu][xu + 1] += error * 7 / 16;
    }
    // Bottom-left: 3/16
    if x > 0 && y + 1 < height {
        buffer[yu + 1][xu - 1] += error * 3 / 16;
    }
    // Bottom: 5/16
    if y + 1 < height {
        buffer[yu + 1][xu] += error * 5 / 16;
    }
    // Bottom-right: 1/16
    if x + 1 < width && y + 1 < height {
        buffer[yu + 1][xu + 1] += error / 16;
    }
}
