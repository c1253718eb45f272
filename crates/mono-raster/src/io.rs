//! Decode/encode boundary — the only file I/O in the crate.

use std::fs;
use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::bitmap::BitImage;
use crate::pack;
use crate::{RasterError, Result};

/// Decode an image file into an 8-bit grayscale buffer.
pub fn decode(path: &Path) -> Result<GrayImage> {
    let img = image::open(path).map_err(|source| RasterError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Decoded image"
    );
    Ok(img.to_luma8())
}

/// Encode a bitmap into a standard image container, chosen by the output
/// path's extension.
pub fn encode(bitmap: &BitImage, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "Encoding output image");
    bitmap.to_gray().save(path).map_err(|source| RasterError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the packed raw bitstream to `path`.
///
/// A failed write removes the partial file, so no truncated artifact is
/// left on disk.
pub fn write_raw(bitmap: &BitImage, path: &Path) -> Result<()> {
    let data = pack::pack(bitmap);
    debug!(path = %path.display(), bytes = data.len(), "Writing raw bitmap");
    fs::write(path, &data).map_err(|source| {
        let _ = fs::remove_file(path);
        RasterError::WriteRaw {
            path: path.to_path_buf(),
            source,
        }
    })
}
