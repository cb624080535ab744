//! Final pixel-accurate crop and encoding.
//!
//! Export uses the same inverse mapping as the live preview, but renders at
//! `output_scale` times the region's viewport size, samples bilinearly and
//! may rotate the output canvas about its centre.
//!
//! # Format selection
//!
//! With [`OutputFormat::Auto`] the result is PNG whenever it carries
//! transparency (circle mask, content outside the source image, rotated
//! corners) and JPEG otherwise. Circle crops are always PNG, whatever the
//! configured format: JPEG would flatten the masked corners.

use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;
use crate::decode::SourceImage;
use crate::encode::{encode_jpeg, encode_png, EncodeError, ImageFormat};
use crate::error::CropError;
use crate::mask::CircleMask;
use crate::raster::Raster;
use crate::region::{CropRegion, CropShape};
use crate::render::raster_dimensions;
use crate::transform::draw_region;
use crate::view::ViewTransform;

/// Encoded crop handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CroppedResult {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl CroppedResult {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Export parameters that come from configuration rather than geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub output_scale: f64,
    pub rotation_degrees: f64,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_scale: 1.0,
            rotation_degrees: 0.0,
            format: OutputFormat::Auto,
            jpeg_quality: 100,
        }
    }
}

/// Turns the finished raster into bytes of the chosen format.
pub(crate) type EncodeFn = fn(&Raster, ImageFormat, u8) -> Result<Vec<u8>, EncodeError>;

/// The encoder used for every real export.
pub(crate) fn encode_raster(
    raster: &Raster,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(&raster.pixels, raster.width, raster.height, jpeg_quality),
        ImageFormat::Png => encode_png(&raster.pixels, raster.width, raster.height),
    }
}

/// Crop `image` to `region` as seen through `view` and encode the result.
///
/// # Errors
///
/// - [`CropError::EmptyRegion`] if the region has zero width or height
/// - [`CropError::EncodeFailure`] if the encoder rejects the raster
pub fn export_crop(
    image: &SourceImage,
    region: &CropRegion,
    view: &ViewTransform,
    options: &ExportOptions,
) -> Result<CroppedResult, CropError> {
    export_crop_with(image, region, view, options, encode_raster)
}

pub(crate) fn export_crop_with(
    image: &SourceImage,
    region: &CropRegion,
    view: &ViewTransform,
    options: &ExportOptions,
    encode: EncodeFn,
) -> Result<CroppedResult, CropError> {
    if region.is_empty() {
        return Err(CropError::EmptyRegion);
    }

    let (width, height) = raster_dimensions(region.size(), options.output_scale);
    let source_rect = view.rect_to_source(region.as_rect());

    let mut raster = draw_region(image, source_rect, width, height, options.rotation_degrees);
    let circle = region.shape == CropShape::Circle;
    if circle {
        CircleMask::inscribed(width, height).apply(&mut raster);
    }

    let format = match options.format {
        _ if circle => {
            if options.format == OutputFormat::Jpeg {
                log::warn!("Circle crop needs transparency, encoding PNG instead of JPEG");
            }
            ImageFormat::Png
        }
        OutputFormat::Jpeg => ImageFormat::Jpeg,
        OutputFormat::Png => ImageFormat::Png,
        OutputFormat::Auto if !raster.is_opaque() => ImageFormat::Png,
        OutputFormat::Auto => ImageFormat::Jpeg,
    };

    log::debug!(
        "Exporting {}x{} {} crop from source {:.1},{:.1} {:.1}x{:.1}",
        width,
        height,
        format,
        source_rect.x,
        source_rect.y,
        source_rect.width,
        source_rect.height
    );

    let bytes = encode(&raster, format, options.jpeg_quality)?;

    Ok(CroppedResult {
        bytes,
        format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn opaque(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 90, 255]);
            }
        }
        SourceImage::new(width, height, pixels).unwrap()
    }

    fn view(w: f64, h: f64) -> ViewTransform {
        ViewTransform::new(Size::new(w, h), Size::new(w, h), 0.5, 3.0)
    }

    fn region(x0: f64, y0: f64, x1: f64, y1: f64, shape: CropShape) -> CropRegion {
        CropRegion::from_corners(Point::new(x0, y0), Point::new(x1, y1), shape)
    }

    #[test]
    fn test_rect_export_is_jpeg() {
        let image = opaque(100, 100);
        let result = export_crop(
            &image,
            &region(10.0, 10.0, 60.0, 40.0, CropShape::Rect),
            &view(100.0, 100.0),
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(result.format, ImageFormat::Jpeg);
        assert_eq!((result.width, result.height), (50, 30));
        assert_eq!(&result.bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(result.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_output_scale_multiplies_size() {
        let image = opaque(100, 100);
        let options = ExportOptions {
            output_scale: 2.0,
            ..Default::default()
        };
        let result = export_crop(
            &image,
            &region(0.0, 0.0, 25.0, 40.0, CropShape::Rect),
            &view(100.0, 100.0),
            &options,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (50, 80));
    }

    #[test]
    fn test_circle_export_is_masked_png() {
        let image = opaque(100, 100);
        let result = export_crop(
            &image,
            &region(20.0, 20.0, 80.0, 80.0, CropShape::Circle),
            &view(100.0, 100.0),
            &ExportOptions::default(),
        )
        .unwrap();
        assert_eq!(result.format, ImageFormat::Png);

        let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (60, 60));
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
        assert_eq!(decoded.get_pixel(30, 30).0[3], 255);
    }

    #[test]
    fn test_circle_ignores_forced_jpeg() {
        let image = opaque(100, 100);
        let options = ExportOptions {
            format: OutputFormat::Jpeg,
            ..Default::default()
        };
        let result = export_crop(
            &image,
            &region(0.0, 0.0, 100.0, 100.0, CropShape::Circle),
            &view(100.0, 100.0),
            &options,
        )
        .unwrap();
        assert_eq!(result.format, ImageFormat::Png);

        let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(99, 99).0[3], 0);
        assert_eq!(decoded.get_pixel(50, 50).0[3], 255);
    }

    #[test]
    fn test_encoder_failure_is_reported() {
        fn failing(_: &Raster, format: ImageFormat, _: u8) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::EncodingFailed {
                format,
                message: "disk full".to_string(),
            })
        }

        let image = opaque(20, 20);
        let err = export_crop_with(
            &image,
            &region(0.0, 0.0, 10.0, 10.0, CropShape::Rect),
            &view(20.0, 20.0),
            &ExportOptions::default(),
            failing,
        )
        .unwrap_err();
        assert!(matches!(err, CropError::EncodeFailure(_)));
    }

    #[test]
    fn test_outside_image_uses_png() {
        let image = opaque(100, 100);
        let mut v = view(100.0, 100.0);
        v.set_zoom(0.5);
        let result = export_crop(
            &image,
            &region(0.0, 0.0, 50.0, 50.0, CropShape::Rect),
            &v,
            &ExportOptions::default(),
        )
        .unwrap();
        assert_eq!(result.format, ImageFormat::Png);
    }

    #[test]
    fn test_forced_format() {
        let image = opaque(50, 50);
        let options = ExportOptions {
            format: OutputFormat::Png,
            ..Default::default()
        };
        let result = export_crop(
            &image,
            &region(0.0, 0.0, 50.0, 50.0, CropShape::Rect),
            &view(50.0, 50.0),
            &options,
        )
        .unwrap();
        assert_eq!(result.format, ImageFormat::Png);
    }

    #[test]
    fn test_rotation_keeps_output_size() {
        let image = opaque(100, 100);
        let options = ExportOptions {
            rotation_degrees: 45.0,
            ..Default::default()
        };
        let result = export_crop(
            &image,
            &region(30.0, 30.0, 70.0, 50.0, CropShape::Rect),
            &view(100.0, 100.0),
            &options,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (40, 20));
    }

    #[test]
    fn test_empty_region_rejected() {
        let image = opaque(10, 10);
        let err = export_crop(
            &image,
            &region(2.0, 2.0, 2.0, 9.0, CropShape::Rect),
            &view(10.0, 10.0),
            &ExportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CropError::EmptyRegion));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{Point, Size};
    use proptest::prelude::*;

    fn white(width: u32, height: u32) -> SourceImage {
        SourceImage::new(width, height, vec![255u8; (width * height * 4) as usize]).unwrap()
    }

    proptest! {
        /// Property: circle exports are transparent outside the inscribed
        /// circle and opaque at the centre.
        #[test]
        fn prop_circle_mask_containment(
            x0 in 0.0f64..40.0,
            y0 in 0.0f64..40.0,
            w in 4.0f64..60.0,
            h in 4.0f64..60.0,
            scale in 1.0f64..2.5,
        ) {
            let image = white(100, 100);
            let view = ViewTransform::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0), 0.5, 3.0);
            let region = CropRegion::from_corners(
                Point::new(x0, y0),
                Point::new(x0 + w, y0 + h),
                CropShape::Circle,
            );
            let options = ExportOptions { output_scale: scale, ..Default::default() };

            let result = export_crop(&image, &region, &view, &options).unwrap();
            let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgba8();
            let mask = CircleMask::inscribed(result.width, result.height);

            for (x, y, px) in decoded.enumerate_pixels() {
                if !mask.covers(x, y) {
                    prop_assert_eq!(px.0[3], 0);
                }
            }
            let centre = decoded.get_pixel(result.width / 2, result.height / 2);
            prop_assert!(centre.0[3] > 0);
        }
    }
}
