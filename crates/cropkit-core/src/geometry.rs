//! Plain geometry primitives shared by viewport and source space.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Units are pixels of whichever space the value belongs to
//!   (viewport pixels for crop regions, source pixels for mapped rectangles)

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by the given offsets.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Clamp into `[0, size.width] x [0, size.height]`.
    pub fn clamp_to(self, size: Size) -> Self {
        Self::new(
            self.x.clamp(0.0, size.width.max(0.0)),
            self.y.clamp(0.0, size.height.max(0.0)),
        )
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of an integral raster.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// Centre point of a rectangle of this size anchored at the origin.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Scale down (never up) so that `self` fits inside `bounds`, keeping its ratio.
    pub fn fit_within(self, bounds: Size) -> Size {
        if self.is_empty() {
            return self;
        }
        let scale = (bounds.width / self.width)
            .min(bounds.height / self.height)
            .min(1.0);
        Size::new(self.width * scale, self.height * scale)
    }
}

/// An axis-aligned rectangle given by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centred on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the rectangle lies inside `[0, bounds.width] x [0, bounds.height]`,
    /// allowing `epsilon` of floating-point slack on every edge.
    pub fn is_within(&self, bounds: Size, epsilon: f64) -> bool {
        self.x >= -epsilon
            && self.y >= -epsilon
            && self.right() <= bounds.width + epsilon
            && self.bottom() <= bounds.height + epsilon
    }
}
