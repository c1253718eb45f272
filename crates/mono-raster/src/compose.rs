//! Geometric normalization — scale-to-fit, rotation, and letterboxing.

use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::{RasterError, Result};

/// Target canvas dimensions for composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// How a source image is mapped onto a requested canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Scale to fit preserving aspect ratio, then center on a black canvas
    /// of exactly the requested size.
    #[default]
    FitLetterbox,
    /// Resize directly to the requested dimensions, no aspect preservation,
    /// no centering.
    Stretch,
}

/// Resize to the largest dimensions that fit `canvas` while preserving
/// aspect ratio.
///
/// Nearest-neighbor sampling keeps hard pixel-block edges and introduces no
/// intermediate gray values ahead of the threshold/dither stage. Fractional
/// scaled dimensions truncate, clamped to a 1-pixel minimum.
pub fn scale_to_fit(img: &GrayImage, canvas: CanvasSize) -> GrayImage {
    let (orig_w, orig_h) = img.dimensions();
    if orig_w == 0 || orig_h == 0 {
        return img.clone();
    }

    let scale_w = f64::from(canvas.width) / f64::from(orig_w);
    let scale_h = f64::from(canvas.height) / f64::from(orig_h);
    let scale = scale_w.min(scale_h);
    let new_w = ((f64::from(orig_w) * scale) as u32).max(1);
    let new_h = ((f64::from(orig_h) * scale) as u32).max(1);

    debug!(orig_w, orig_h, new_w, new_h, "Scaling image to fit canvas");
    imageops::resize(img, new_w, new_h, FilterType::Nearest)
}

/// Rotate clockwise by `degrees`, expanding the bounds so nothing is
/// cropped.
///
/// Multiples of 90 degrees take exact lossless paths; other angles sample
/// the source nearest-neighbor through the inverse rotation, with black
/// fill outside the source.
pub fn rotate_cw(img: &GrayImage, degrees: i32) -> GrayImage {
    match degrees.rem_euclid(360) {
        0 => img.clone(),
        90 => imageops::rotate90(img),
        180 => imageops::rotate180(img),
        270 => imageops::rotate270(img),
        deg => rotate_arbitrary(img, f64::from(deg)),
    }
}

fn rotate_arbitrary(img: &GrayImage, degrees: f64) -> GrayImage {
    let (w, h) = img.dimensions();
    let (sin, cos) = degrees.to_radians().sin_cos();

    let fw = f64::from(w);
    let fh = f64::from(h);
    let new_w = (fw * cos.abs() + fh * sin.abs()).round().max(1.0) as u32;
    let new_h = (fw * sin.abs() + fh * cos.abs()).round().max(1.0) as u32;
    debug!(w, h, new_w, new_h, degrees, "Rotating image");

    let cx = fw / 2.0;
    let cy = fh / 2.0;
    let ncx = f64::from(new_w) / 2.0;
    let ncy = f64::from(new_h) / 2.0;

    let mut out = GrayImage::new(new_w, new_h);
    for y in 0..new_h {
        for x in 0..new_w {
            // Inverse of the clockwise rotation, sampled at pixel centers.
            let dx = f64::from(x) + 0.5 - ncx;
            let dy = f64::from(y) + 0.5 - ncy;
            let sx = (cos * dx + sin * dy + cx).floor();
            let sy = (-sin * dx + cos * dy + cy).floor();
            if sx >= 0.0 && sy >= 0.0 && (sx as u32) < w && (sy as u32) < h {
                out.put_pixel(x, y, *img.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    out
}

/// Paste `img` centered on a black canvas of exactly `canvas` size.
///
/// Offsets use floor division. An image larger than the canvas (possible
/// after rotation) is clipped, never an error.
pub fn letterbox(img: &GrayImage, canvas: CanvasSize) -> GrayImage {
    let off_x = (i64::from(canvas.width) - i64::from(img.width())).div_euclid(2);
    let off_y = (i64::from(canvas.height) - i64::from(img.height())).div_euclid(2);
    debug!(off_x, off_y, "Centering image on canvas");

    let mut out = GrayImage::new(canvas.width, canvas.height);
    for (x, y, pixel) in img.enumerate_pixels() {
        let tx = i64::from(x) + off_x;
        let ty = i64::from(y) + off_y;
        if (0..i64::from(canvas.width)).contains(&tx)
            && (0..i64::from(canvas.height)).contains(&ty)
        {
            out.put_pixel(tx as u32, ty as u32, *pixel);
        }
    }
    out
}

/// Run the full geometric stage: optional fit/stretch to a canvas,
/// clockwise rotation, and (in letterbox mode) centered compositing.
///
/// Without a canvas size, both fit modes pass the image through rotation
/// only. A canvas with a zero dimension is rejected before any processing.
pub fn compose(
    img: &GrayImage,
    canvas: Option<CanvasSize>,
    rotate_deg: i32,
    fit: FitMode,
) -> Result<GrayImage> {
    if let Some(c) = canvas {
        if c.width == 0 || c.height == 0 {
            return Err(RasterError::InvalidCanvasSize {
                width: c.width,
                height: c.height,
            });
        }
    }

    let scaled = match (canvas, fit) {
        (Some(c), FitMode::FitLetterbox) => scale_to_fit(img, c),
        (Some(c), FitMode::Stretch) => {
            debug!(width = c.width, height = c.height, "Stretching image to canvas");
            imageops::resize(img, c.width, c.height, FilterType::Nearest)
        }
        (None, _) => img.clone(),
    };

    let rotated = rotate_cw(&scaled, rotate_deg);

    Ok(match (canvas, fit) {
        (Some(c), FitMode::FitLetterbox) => letterbox(&rotated, c),
        _ => rotated,
    })
}
