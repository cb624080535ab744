//! JPEG encoding for opaque crops.
//!
//! JPEG has no alpha channel, so any translucent pixels are composited onto
//! white before encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_rgba, EncodeError, ImageFormat};

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Example
///
/// ```
/// use cropkit_core::encode::encode_jpeg;
///
/// let pixels = vec![128u8; 100 * 100 * 4];
/// let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let rgb = flatten_onto_white(pixels);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

fn flatten_onto_white(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 4];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        // RGB-sized buffer is one byte per pixel short
        let pixels = vec![128u8; 100 * 100 * 3];
        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_height() {
        let result = encode_jpeg(&[], 100, 0, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_flatten_opaque_is_unchanged() {
        let rgb = flatten_onto_white(&[10, 20, 30, 255]);
        assert_eq!(rgb, vec![10, 20, 30]);
    }

    #[test]
    fn test_flatten_transparent_is_white() {
        let rgb = flatten_onto_white(&[10, 20, 30, 0]);
        assert_eq!(rgb, vec![255, 255, 255]);
    }
}
