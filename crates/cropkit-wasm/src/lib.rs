//! Cropkit WASM - WebAssembly bindings for the Cropkit crop editor
//!
//! This crate exposes the cropkit-core engine to JavaScript/TypeScript
//! applications as a `CropEditor` class driven by pointer events.
//!
//! # Module Structure
//!
//! - `editor` - The `CropEditor` class and its `onCrop`/`onCancel` callbacks
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (JPEG/PNG with EXIF orientation)
//! - `logger` - `log` output routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, CropEditor } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new CropEditor({ aspectRatio: 'banner' }, onCrop, onCancel);
//! editor.load(decode_image(new Uint8Array(await file.arrayBuffer())));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod logger;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_image_no_orientation, get_orientation};
pub use editor::CropEditor;
pub use types::{JsRaster, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    logger::install(level);
}

/// Change console log verbosity: "off", "error", "warn", "info", "debug"
/// or "trace". Returns false for an unknown level name.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> bool {
    match logger::parse_level(level) {
        Some(filter) => {
            log::set_max_level(filter);
            true
        }
        None => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_set_log_level() {
        assert!(set_log_level("info"));
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        assert!(!set_log_level("verbose"));
        assert_eq!(log::max_level(), log::LevelFilter::Info);
    }
}
