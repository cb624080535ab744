//! Crop session configuration.
//!
//! Field names serialize in camelCase so a host can pass a plain object
//! straight through `serde-wasm-bindgen`; every field has a default, so a
//! partial object (or `{}`) is valid input.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::error::CropError;
use crate::geometry::Size;
use crate::region::CropShape;

/// Requested encoding of the exported crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG when the result needs transparency, JPEG otherwise.
    #[default]
    Auto,
    Jpeg,
    Png,
}

/// Settings supplied when a crop session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Aspect-ratio preset; also decides the default region.
    pub aspect_ratio: AspectRatio,
    /// Initial crop shape.
    pub shape: CropShape,
    /// Export supersampling factor, at least 1.
    pub output_scale: f64,
    /// Editing surface size. `None` uses the image size.
    pub viewport: Option<Size>,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change per zoom-in/zoom-out action.
    pub zoom_step: f64,
    /// Side of the square resize-handle hit box, in viewport pixels.
    pub handle_size: f64,
    /// Draw rule-of-thirds guides in the overlay.
    pub show_guides: bool,
    pub output_format: OutputFormat,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Square,
            shape: CropShape::Rect,
            output_scale: 1.0,
            viewport: None,
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 0.1,
            handle_size: 10.0,
            show_guides: true,
            output_format: OutputFormat::Auto,
            jpeg_quality: 100,
        }
    }
}

impl CropConfig {
    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), CropError> {
        if !self.output_scale.is_finite() || self.output_scale < 1.0 {
            return Err(CropError::InvalidConfig(format!(
                "outputScale must be >= 1, got {}",
                self.output_scale
            )));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= 1.0) {
            return Err(CropError::InvalidConfig(format!(
                "minZoom must be in (0, 1], got {}",
                self.min_zoom
            )));
        }
        if !(self.max_zoom >= 1.0 && self.max_zoom.is_finite()) {
            return Err(CropError::InvalidConfig(format!(
                "maxZoom must be >= 1, got {}",
                self.max_zoom
            )));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step.is_finite()) {
            return Err(CropError::InvalidConfig(format!(
                "zoomStep must be positive, got {}",
                self.zoom_step
            )));
        }
        if !(self.handle_size > 0.0 && self.handle_size.is_finite()) {
            return Err(CropError::InvalidConfig(format!(
                "handleSize must be positive, got {}",
                self.handle_size
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(CropError::InvalidConfig(format!(
                "jpegQuality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if let Some(viewport) = self.viewport {
            if viewport.is_empty() || !viewport.width.is_finite() || !viewport.height.is_finite() {
                return Err(CropError::InvalidConfig(format!(
                    "viewport must be non-empty, got {}x{}",
                    viewport.width, viewport.height
                )));
            }
        }
        if self.shape == CropShape::Circle && !circle_allowed(self.aspect_ratio) {
            return Err(CropError::InvalidConfig(format!(
                "circle shape requires a 1:1 or free aspect ratio, got {}",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Circle crops only make sense for square or unconstrained ratios.
pub(crate) fn circle_allowed(aspect: AspectRatio) -> bool {
    matches!(aspect, AspectRatio::Square | AspectRatio::Free)
}
