//! 1-bit image conversion for binary-depth displays.
//!
//! Provides geometric normalization (scale-to-fit, rotation, letterboxing),
//! quantization (fixed threshold or Floyd-Steinberg dithering), and
//! headerless MSB-first bit packing for e-paper panels, thermal printers,
//! and LED matrices.

pub mod bitmap;
pub mod compose;
pub mod io;
pub mod pack;
pub mod pipeline;
pub mod quantize;

// Re-exports for convenience
pub use bitmap::BitImage;
pub use compose::{CanvasSize, FitMode, compose, letterbox, rotate_cw, scale_to_fit};
pub use pack::{bytes_per_row, pack, unpack};
pub use pipeline::{ConvertOptions, convert};
pub use quantize::{DEFAULT_THRESHOLD, QuantizeMode, floyd_steinberg, quantize, threshold};

use std::path::PathBuf;

/// Errors that can occur during conversion and boundary I/O.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Input file missing, unreadable, or not a recognized image format.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Output image could not be written.
    #[error("failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Raw packed bitstream could not be written.
    #[error("failed to write raw bitmap {}: {source}", path.display())]
    WriteRaw {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Requested canvas has a zero dimension.
    #[error("invalid canvas size {width}x{height}: both dimensions must be positive")]
    InvalidCanvasSize { width: u32, height: u32 },

    /// Packed data does not match the dimensions given to `unpack`.
    #[error("raw data is {actual} bytes, expected {expected} for {width}x{height}")]
    RawLengthMismatch {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, RasterError>;
