//! Image decoding WASM bindings.
//!
//! Hosts that hold an encoded file (from a file picker or drag-and-drop)
//! decode it here instead of going through a canvas.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG/PNG bytes, applying EXIF orientation
//! - [`decode_image_no_orientation`] - Decode without EXIF orientation
//! - [`get_orientation`] - Read the EXIF orientation value (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, CropEditor } from '@cropkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! editor.load(image);
//! ```

use crate::types::JsSourceImage;
use cropkit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an encoded image from bytes.
///
/// The format is detected from the data. EXIF orientation is applied so the
/// image is upright.
///
/// # Errors
///
/// Returns an error if:
/// - The format is not recognized
/// - The data is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an encoded image from bytes, ignoring EXIF orientation.
#[wasm_bindgen]
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image_no_orientation(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of encoded bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
