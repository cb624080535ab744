//! Source image decoding for the crop engine.
//!
//! This module provides:
//! - The [`SourceImage`] type the engine reads from (RGBA, fully decoded)
//! - Decoding of encoded files (JPEG, PNG) with EXIF orientation correction
//!
//! The engine itself never decodes: hosts either build a `SourceImage` from
//! pixels they already hold, or call [`decode_image`] on the selected file.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("avatar.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
