//! Rendering of the editor surface.
//!
//! Everything here is a pure function of engine data (source image, view
//! transform, crop region, style); nothing reads geometry back from pixels.
//!
//! - [`frame`] - the source image as displayed in the viewport
//! - [`overlay`] - dimmed surround, region stroke, handles and guides
//! - [`preview`] - live preview of the crop result

pub mod frame;
pub mod overlay;
pub mod preview;

pub use frame::render_frame;
pub use overlay::{render_overlay, OverlayStyle};
pub use preview::compute_preview;

use crate::geometry::Size;

/// Integral raster dimensions for a fractional size scaled by `scale`.
///
/// Each side is rounded to the nearest pixel and is at least 1.
pub fn raster_dimensions(size: Size, scale: f64) -> (u32, u32) {
    let w = (size.width * scale).round().max(1.0);
    let h = (size.height * scale).round().max(1.0);
    (w.min(u32::MAX as f64) as u32, h.min(u32::MAX as f64) as u32)
}
