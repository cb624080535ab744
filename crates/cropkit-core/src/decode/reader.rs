//! Encoded image decoding with EXIF orientation handling.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};
use exif::{In, Reader, Tag};

use super::{DecodeError, Orientation, SourceImage};

/// Decode an encoded image (JPEG or PNG) from bytes, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    log::debug!(
        "decoded {}x{} image, orientation {:?}",
        img.width(),
        img.height(),
        orientation
    );
    SourceImage::from_rgba_image(apply_orientation(img, orientation).into_rgba8())
}

/// Decode an encoded image without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    SourceImage::from_rgba_image(img.into_rgba8())
}

/// Extract EXIF orientation value from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` when no EXIF data is present.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};

    fn two_pixel_image() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        DynamicImage::ImageRgba8(image::RgbaImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png_round_trip_pixels() {
        let pixels = vec![10, 20, 30, 255, 40, 50, 60, 128];
        let png = encode_png(&pixels, 2, 1).unwrap();

        let img = decode_image(&png).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(img.pixel(1, 0), [40, 50, 60, 128]);
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let pixels = vec![128u8; 8 * 8 * 4];
        let jpeg = encode_jpeg(&pixels, 8, 8, 90).unwrap();

        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width, img.height), (8, 8));
        assert!(img.pixels().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&[0u8; 4 * 4 * 4], 4, 4).unwrap();
        let result = decode_image(&png[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let png = encode_png(&[0u8; 4], 1, 1).unwrap();
        assert_eq!(get_orientation(&png), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate90CW);
        assert_eq!((result.width(), result.height()), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let result = apply_orientation(two_pixel_image(), Orientation::FlipHorizontal).into_rgba8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
