//! Headerless MSB-first bit packing for raw device upload.

use crate::bitmap::BitImage;
use crate::{RasterError, Result};

/// Packed bytes per row: eight pixels per byte, rounded up.
pub fn bytes_per_row(width: u32) -> usize {
    (width as usize + 7) / 8
}

/// Pack a bitmap into a headerless byte stream.
///
/// Rows top to bottom, pixels left to right, the first pixel of each byte
/// in the most significant bit (1 = white). The final byte of a row is
/// zero-padded in its low bits; partial bits never carry across rows. The
/// stream carries no dimensions — consumers must know them out of band.
pub fn pack(bitmap: &BitImage) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(bytes_per_row(bitmap.width()) * bitmap.height() as usize);
    for row in bitmap.rows() {
        for chunk in row.chunks(8) {
            let mut byte = 0u8;
            for (i, &white) in chunk.iter().enumerate() {
                if white {
                    byte |= 1 << (7 - i);
                }
            }
            out.push(byte);
        }
    }
    out
}

/// Reconstruct a bitmap from a packed stream and out-of-band dimensions.
///
/// Row-padding bits are ignored. Fails if the data length does not match
/// the dimensions.
pub fn unpack(data: &[u8], width: u32, height: u32) -> Result<BitImage> {
    let stride = bytes_per_row(width);
    let expected = stride * height as usize;
    if data.len() != expected {
        return Err(RasterError::RawLengthMismatch {
            expected,
            actual: data.len(),
            width,
            height,
        });
    }

    let mut bitmap = BitImage::new(width, height);
    for y in 0..height {
        let row = &data[y as usize * stride..][..stride];
        for x in 0..width {
            let byte = row[x as usize / 8];
            bitmap.set(x, y, (byte >> (7 - (x % 8))) & 1 == 1);
        }
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_from_rows(rows: &[&[bool]]) -> BitImage {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut bitmap = BitImage::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &white) in row.iter().enumerate() {
                bitmap.set(x as u32, y as u32, white);
            }
        }
        bitmap
    }

    #[test]
    fn bytes_per_row_rounds_up() {
        assert_eq!(bytes_per_row(0), 0);
        assert_eq!(bytes_per_row(1), 1);
        assert_eq!(bytes_per_row(8), 1);
        assert_eq!(bytes_per_row(9), 2);
        assert_eq!(bytes_per_row(16), 2);
        assert_eq!(bytes_per_row(720), 90);
    }

    #[test]
    fn pack_first_pixel_in_msb() {
        let row = [true, false, false, false, false, false, false, false];
        let bitmap = bitmap_from_rows(&[&row]);
        assert_eq!(pack(&bitmap), vec![0x80]);
    }

    #[test]
    fn pack_width_4_pads_low_nibble() {
        // Two rows of four white pixels: each row packs into the upper
        // nibble of its own byte.
        let row = [true, true, true, true];
        let bitmap = bitmap_from_rows(&[&row, &row]);
        assert_eq!(pack(&bitmap), vec![0xF0, 0xF0]);
    }

    #[test]
    fn pack_single_black_pixel() {
        let bitmap = BitImage::new(1, 1);
        assert_eq!(pack(&bitmap), vec![0x00]);
    }

    #[test]
    fn pack_does_not_carry_bits_across_rows() {
        // Width 10: each row needs 2 bytes, 6 padding bits.
        let mut bitmap = BitImage::new(10, 2);
        for x in 0..10 {
            bitmap.set(x, 0, true);
        }
        bitmap.set(0, 1, true);
        assert_eq!(pack(&bitmap), vec![0xFF, 0xC0, 0x80, 0x00]);
    }

    #[test]
    fn pack_empty_bitmap_is_empty() {
        assert_eq!(pack(&BitImage::new(0, 0)), Vec::<u8>::new());
        assert_eq!(pack(&BitImage::new(0, 3)), Vec::<u8>::new());
        assert_eq!(pack(&BitImage::new(3, 0)), Vec::<u8>::new());
    }

    #[test]
    fn pack_unpack_round_trip() {
        for width in [8u32, 10, 13] {
            let mut bitmap = BitImage::new(width, 3);
            // Checker-ish pattern exercising byte boundaries
            for y in 0..3 {
                for x in 0..width {
                    bitmap.set(x, y, (x + y) % 3 == 0);
                }
            }
            let packed = pack(&bitmap);
            assert_eq!(packed.len(), bytes_per_row(width) * 3);
            let unpacked = unpack(&packed, width, 3).unwrap();
            assert_eq!(unpacked, bitmap, "round trip failed at width {width}");
        }
    }

    #[test]
    fn unpack_rejects_length_mismatch() {
        let err = unpack(&[0xFF], 10, 2).unwrap_err();
        assert!(matches!(
            err,
            RasterError::RawLengthMismatch { expected: 4, actual: 1, .. }
        ));
    }
}
