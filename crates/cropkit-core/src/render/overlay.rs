//! Editing overlay drawn over the displayed image.
//!
//! Layers, bottom to top:
//! 1. translucent dim everywhere outside the crop shape
//! 2. rule-of-thirds guides inside the shape (optional)
//! 3. one-pixel stroke on the shape boundary
//! 4. filled square resize handles

use crate::geometry::{Point, Size};
use crate::raster::Raster;
use crate::region::{CropRegion, CropShape, ResizeHandle};

use super::raster_dimensions;

/// Colours and switches for the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub dim: [u8; 4],
    pub stroke: [u8; 4],
    pub handle: [u8; 4],
    pub guide: [u8; 4],
    pub show_guides: bool,
    pub handle_size: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            dim: [0, 0, 0, 128],
            stroke: [255, 255, 255, 255],
            handle: [255, 255, 255, 255],
            guide: [255, 255, 255, 96],
            show_guides: true,
            handle_size: 10.0,
        }
    }
}

/// Render the overlay for `region` into a viewport-sized raster.
pub fn render_overlay(
    region: &CropRegion,
    viewport: Size,
    style: &OverlayStyle,
    aspect_locked: bool,
) -> Raster {
    let (width, height) = raster_dimensions(viewport, 1.0);
    let mut overlay = Raster::transparent(width, height);

    for y in 0..height {
        for x in 0..width {
            let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if !region.shape_contains(centre) {
                overlay.set_pixel(x, y, style.dim);
            }
        }
    }

    if region.is_empty() {
        return overlay;
    }

    if style.show_guides {
        draw_guides(&mut overlay, region, style.guide);
    }

    match region.shape {
        CropShape::Rect => stroke_rect(&mut overlay, region, style.stroke),
        CropShape::Circle => stroke_circle(&mut overlay, region, style.stroke),
    }

    let half = style.handle_size / 2.0;
    for handle in ResizeHandle::active(region.shape, aspect_locked) {
        let at = handle.position(region);
        overlay.fill_rect(
            (at.x - half).floor() as i64,
            (at.y - half).floor() as i64,
            (at.x + half).ceil() as i64,
            (at.y + half).ceil() as i64,
            style.handle,
        );
    }

    overlay
}

fn draw_guides(overlay: &mut Raster, region: &CropRegion, colour: [u8; 4]) {
    let (x0, y0) = (region.start.x.floor() as i64, region.start.y.floor() as i64);
    let (x1, y1) = (region.end.x.ceil() as i64, region.end.y.ceil() as i64);

    for i in 1..=2 {
        let t = i as f64 / 3.0;
        let gx = (region.start.x + region.width() * t).floor() as i64;
        let gy = (region.start.y + region.height() * t).floor() as i64;

        for y in y0..y1 {
            if region.shape_contains(Point::new(gx as f64 + 0.5, y as f64 + 0.5)) {
                overlay.blend_pixel(gx, y, colour);
            }
        }
        for x in x0..x1 {
            if region.shape_contains(Point::new(x as f64 + 0.5, gy as f64 + 0.5)) {
                overlay.blend_pixel(x, gy, colour);
            }
        }
    }
}

fn stroke_rect(overlay: &mut Raster, region: &CropRegion, colour: [u8; 4]) {
    let left = region.start.x.floor() as i64;
    let top = region.start.y.floor() as i64;
    let right = (region.end.x.ceil() as i64 - 1).max(left);
    let bottom = (region.end.y.ceil() as i64 - 1).max(top);

    overlay.fill_rect(left, top, right + 1, top + 1, colour);
    overlay.fill_rect(left, bottom, right + 1, bottom + 1, colour);
    overlay.fill_rect(left, top, left + 1, bottom + 1, colour);
    overlay.fill_rect(right, top, right + 1, bottom + 1, colour);
}

fn stroke_circle(overlay: &mut Raster, region: &CropRegion, colour: [u8; 4]) {
    let c = region.center();
    let r = region.circle_radius();

    let x0 = region.start.x.floor() as i64;
    let y0 = region.start.y.floor() as i64;
    let x1 = region.end.x.ceil() as i64;
    let y1 = region.end.y.ceil() as i64;

    for y in y0..y1 {
        for x in x0..x1 {
            let d = (x as f64 + 0.5 - c.x).hypot(y as f64 + 0.5 - c.y);
            if d <= r && d > r - 1.0 {
                overlay.blend_pixel(x, y, colour);
            }
        }
    }
}
