//! PNG encoding for crops with transparency.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_rgba, EncodeError, ImageFormat};

/// Encode RGBA pixel data to PNG bytes.
///
/// PNG is lossless, so circle-masked crops keep exact transparent corners.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Png,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let pixels = vec![0u8; 16 * 16 * 4];
        let png = encode_png(&pixels, 16, 16).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_preserves_alpha() {
        let pixels = vec![255, 0, 0, 0, 0, 255, 0, 255];
        let png = encode_png(&pixels, 2, 1).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_encode_png_zero_width() {
        let result = encode_png(&[], 0, 10);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let result = encode_png(&[0u8; 7], 2, 1);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }
}
