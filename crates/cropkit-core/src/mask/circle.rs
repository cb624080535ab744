//! Circular mask inscribed in a raster.
//!
//! The circle is centred on the raster and its radius is half the smaller
//! raster dimension, so for a non-square raster it touches only the two
//! nearer edges.

use crate::raster::Raster;

/// A circle in raster pixel coordinates.
///
/// # Example
/// ```
/// use cropkit_core::mask::CircleMask;
///
/// let mask = CircleMask::inscribed(100, 100);
/// assert!(mask.covers(50, 50));
/// assert!(!mask.covers(0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMask {
    /// Centre X in pixels.
    pub center_x: f64,
    /// Centre Y in pixels.
    pub center_y: f64,
    /// Radius in pixels.
    pub radius: f64,
}

impl CircleMask {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius: radius.max(0.0),
        }
    }

    /// The circle inscribed in a `width` x `height` raster.
    pub fn inscribed(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self::new(w / 2.0, h / 2.0, w.min(h) / 2.0)
    }

    /// Whether the centre of pixel (x, y) lies inside the circle.
    #[inline]
    pub fn covers(&self, x: u32, y: u32) -> bool {
        let dx = x as f64 + 0.5 - self.center_x;
        let dy = y as f64 + 0.5 - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Clear every pixel outside the circle to fully transparent.
    pub fn apply(&self, raster: &mut Raster) {
        for y in 0..raster.height {
            for x in 0..raster.width {
                if !self.covers(x, y) {
                    raster.set_pixel(x, y, [0, 0, 0, 0]);
                }
            }
        }
    }
}
