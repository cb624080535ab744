//! Resampling of a source sub-rectangle into an output raster.
//!
//! Both the live preview and the final export draw the same thing: a
//! rectangle in source space, stretched to fill an output raster, optionally
//! rotated about the output centre. This module provides that draw.
//!
//! # Coordinate System
//!
//! - Source rectangles are in source pixels and may be fractional
//! - Pixel `i` covers `[i, i + 1)`; its centre is at `i + 0.5`
//! - Rotation angles are in degrees, positive = clockwise on screen
//!   (y grows downward)

mod crop;
mod rotation;
mod sample;

pub use crop::draw_region;
pub use rotation::CanvasRotation;
pub use sample::{sample_bilinear, sample_nearest};
