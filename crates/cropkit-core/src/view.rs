//! Mapping between source-image pixels and viewport pixels.
//!
//! The source is drawn scaled by `zoom` and centred in the viewport, so the
//! viewport centre is the zoom pivot:
//!
//! ```text
//! pan      = (viewport - source * zoom) / 2
//! viewport = source * zoom + pan
//! source   = (viewport - pan) / zoom
//! ```
//!
//! Crop regions live in viewport space and are not touched by zoom changes;
//! only this mapping changes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Zoom button direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

/// Current zoom and the sizes it relates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    viewport: Size,
    source: Size,
}

impl ViewTransform {
    /// A transform at zoom 1.0.
    pub fn new(viewport: Size, source: Size, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            viewport,
            source,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn source(&self) -> Size {
        self.source
    }

    /// Set the zoom, clamped to the configured bounds. Returns the new zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        // Round so repeated +/- steps land back on the same values.
        let rounded = (zoom * 10_000.0).round() / 10_000.0;
        self.zoom = rounded.clamp(self.min_zoom, self.max_zoom);
        self.zoom
    }

    /// Step the zoom in or out by `step`.
    pub fn step(&mut self, direction: ZoomDirection, step: f64) -> f64 {
        match direction {
            ZoomDirection::In => self.set_zoom(self.zoom + step),
            ZoomDirection::Out => self.set_zoom(self.zoom - step),
        }
    }

    /// Offset of the source origin inside the viewport.
    pub fn pan(&self) -> Point {
        Point::new(
            (self.viewport.width - self.source.width * self.zoom) / 2.0,
            (self.viewport.height - self.source.height * self.zoom) / 2.0,
        )
    }

    /// Source pixel position -> viewport position.
    pub fn to_viewport(&self, p: Point) -> Point {
        let pan = self.pan();
        Point::new(p.x * self.zoom + pan.x, p.y * self.zoom + pan.y)
    }

    /// Viewport position -> source pixel position.
    pub fn to_source(&self, p: Point) -> Point {
        let pan = self.pan();
        Point::new((p.x - pan.x) / self.zoom, (p.y - pan.y) / self.zoom)
    }

    /// Viewport rectangle -> source rectangle.
    pub fn rect_to_source(&self, r: Rect) -> Rect {
        let origin = self.to_source(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width / self.zoom, r.height / self.zoom)
    }

    /// Source rectangle -> viewport rectangle.
    pub fn rect_to_viewport(&self, r: Rect) -> Rect {
        let origin = self.to_viewport(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width * self.zoom, r.height * self.zoom)
    }

    /// The source image's footprint in the viewport.
    pub fn image_bounds(&self) -> Rect {
        self.rect_to_viewport(Rect::new(0.0, 0.0, self.source.width, self.source.height))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
