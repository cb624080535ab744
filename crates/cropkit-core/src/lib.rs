//! Cropkit Core - interactive image crop engine
//!
//! This crate holds everything a crop widget needs apart from the display
//! surface: crop-region geometry, the pointer interaction state machine,
//! zoom mapping between viewport and source pixels, overlay and preview
//! rendering, and the final crop export with rotation, circle masking and
//! encoding.
//!
//! # Structure
//!
//! - [`engine`] - [`CropEngine`], the session owner hosts talk to
//! - [`interaction`] / [`region`] - editing rules and handle hit-testing
//! - [`view`] - viewport <-> source mapping
//! - [`render`] / [`export`] - pure rendering of engine data
//! - [`decode`] / [`encode`] - file bytes in, file bytes out

pub mod aspect;
pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod mask;
pub mod raster;
pub mod region;
pub mod render;
pub mod transform;
pub mod view;

pub use aspect::AspectRatio;
pub use config::{CropConfig, OutputFormat};
pub use decode::{decode_image, DecodeError, SourceImage};
pub use encode::{EncodeError, ImageFormat};
pub use engine::CropEngine;
pub use error::CropError;
pub use export::CroppedResult;
pub use geometry::{Point, Rect, Size};
pub use interaction::Interaction;
pub use raster::Raster;
pub use region::{CropRegion, CropShape, ResizeHandle};
pub use view::{ViewTransform, ZoomDirection};
