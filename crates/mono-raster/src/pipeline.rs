//! The full conversion pipeline as a pure function.

use image::GrayImage;

use crate::Result;
use crate::bitmap::BitImage;
use crate::compose::{self, CanvasSize, FitMode};
use crate::quantize::{self, QuantizeMode};

/// Options for a single conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Target canvas size; `None` keeps the source dimensions.
    pub canvas: Option<CanvasSize>,
    /// Clockwise rotation in degrees.
    pub rotate_deg: i32,
    /// How the image maps onto the canvas.
    pub fit: FitMode,
    /// Quantization algorithm.
    pub quantize: QuantizeMode,
}

/// Convert a grayscale image to a 1-bit bitmap.
///
/// Geometric normalization followed by quantization, as a pure function of
/// its inputs. Nothing is shared across invocations.
pub fn convert(img: &GrayImage, opts: &ConvertOptions) -> Result<BitImage> {
    let composed = compose::compose(img, opts.canvas, opts.rotate_deg, opts.fit)?;
    Ok(quantize::quantize(&composed, opts.quantize))
}
