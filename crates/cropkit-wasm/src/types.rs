//! WASM-compatible wrapper types for image data.
//!
//! These wrap the core image types and handle the conversion between Rust
//! and JavaScript data representations.

use cropkit_core::{DecodeError, Raster, SourceImage};
use wasm_bindgen::prelude::*;

/// A source image for the crop editor.
///
/// Pixels are RGBA (4 bytes per pixel, row-major), the same layout as
/// `ImageData.data` from a canvas, so a host can pass
/// `new JsSourceImage(img.width, img.height, img.data)` directly.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsSourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and RGBA pixel data.
    ///
    /// The data is validated when the image is loaded into an editor.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4 when valid).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(image: SourceImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels().to_vec(),
        }
    }

    /// Convert to a validated core image. Clones the pixel data.
    pub(crate) fn to_source(&self) -> Result<SourceImage, DecodeError> {
        SourceImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// A rendered RGBA raster (preview, overlay or displayed frame).
///
/// Suitable for `new ImageData(new Uint8ClampedArray(r.pixels()), r.width)`.
#[wasm_bindgen]
pub struct JsRaster {
    inner: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// True for the zero-sized raster of a degenerate region.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl From<Raster> for JsRaster {
    fn from(inner: Raster) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_source_image_creation() {
        let img = JsSourceImage::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_to_source_validates() {
        let img = JsSourceImage::new(2, 2, vec![7u8; 16]);
        let source = img.to_source().unwrap();
        assert_eq!(source.pixel(1, 1), [7, 7, 7, 7]);

        let short = JsSourceImage::new(2, 2, vec![7u8; 12]);
        assert!(matches!(
            short.to_source(),
            Err(DecodeError::InvalidPixelData { expected: 16, actual: 12 })
        ));

        let empty = JsSourceImage::new(0, 3, vec![]);
        assert!(empty.to_source().is_err());
    }

    #[test]
    fn test_from_source_round_trip() {
        let source = SourceImage::new(3, 1, vec![1u8; 12]).unwrap();
        let js = JsSourceImage::from_source(source.clone());
        assert_eq!(js.to_source().unwrap(), source);
    }

    #[test]
    fn test_js_raster() {
        let raster: JsRaster = Raster::transparent(4, 2).into();
        assert_eq!((raster.width(), raster.height()), (4, 2));
        assert_eq!(raster.pixels().len(), 32);
        assert!(!raster.is_empty());
        let empty: JsRaster = Raster::empty().into();
        assert!(empty.is_empty());
    }
}
