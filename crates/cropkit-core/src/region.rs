//! Crop region in viewport space and its resize handles.
//!
//! A region is stored as two corners, always normalized so that `start` is
//! the top-left and `end` the bottom-right. Zero-width or zero-height regions
//! are representable (they occur mid-drag) but cannot be exported.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Shape of the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropShape {
    #[default]
    Rect,
    /// Circle centred in the region with a diameter of its shorter side.
    Circle,
}

impl CropShape {
    pub fn toggled(self) -> Self {
        match self {
            CropShape::Rect => CropShape::Circle,
            CropShape::Circle => CropShape::Rect,
        }
    }
}

/// Rectangle selected by the user, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub start: Point,
    pub end: Point,
    pub shape: CropShape,
}

impl CropRegion {
    /// Build a region from any two opposite corners.
    pub fn from_corners(a: Point, b: Point, shape: CropShape) -> Self {
        Self {
            start: Point::new(a.x.min(b.x), a.y.min(b.y)),
            end: Point::new(a.x.max(b.x), a.y.max(b.y)),
            shape,
        }
    }

    pub fn centered(center: Point, size: Size, shape: CropShape) -> Self {
        let rect = Rect::centered(center, size);
        Self::from_corners(
            Point::new(rect.x, rect.y),
            Point::new(rect.right(), rect.bottom()),
            shape,
        )
    }

    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// True when the region has no area and cannot be exported.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Width/height ratio, `None` for degenerate regions.
    pub fn ratio(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.width() / self.height())
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.start.x, self.start.y, self.width(), self.height())
    }

    /// Inclusive point-in-rectangle test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.start.x && p.x <= self.end.x && p.y >= self.start.y && p.y <= self.end.y
    }

    /// Radius of the circle a [`CropShape::Circle`] region keeps: half the
    /// shorter side, matching the export mask.
    pub fn circle_radius(&self) -> f64 {
        self.width().min(self.height()) / 2.0
    }

    /// Whether the point lies inside the shape itself.
    pub fn shape_contains(&self, p: Point) -> bool {
        match self.shape {
            CropShape::Rect => self.contains(p),
            CropShape::Circle => {
                if self.is_empty() {
                    return false;
                }
                let c = self.center();
                let r = self.circle_radius();
                let (dx, dy) = (p.x - c.x, p.y - c.y);
                dx * dx + dy * dy <= r * r
            }
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            start: self.start.offset(dx, dy),
            end: self.end.offset(dx, dy),
            shape: self.shape,
        }
    }

    /// Clamp both corners into the viewport.
    pub fn clamped_to(&self, viewport: Size) -> Self {
        Self::from_corners(
            self.start.clamp_to(viewport),
            self.end.clamp_to(viewport),
            self.shape,
        )
    }
}

/// Resize handle on the region boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const CORNERS: &'static [Self] = &[
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    pub const ALL: &'static [Self] = &[
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
    ];

    /// Handles a region exposes. Corners always; edge midpoints only when
    /// non-uniform resizing is possible (rectangle shape, no aspect lock).
    pub fn active(shape: CropShape, aspect_locked: bool) -> &'static [Self] {
        if shape == CropShape::Rect && !aspect_locked {
            Self::ALL
        } else {
            Self::CORNERS
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomRight | Self::BottomLeft
        )
    }

    /// Horizontal edge this handle drags: -1 left, +1 right, 0 none.
    pub fn dir_x(self) -> i8 {
        match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => -1,
            Self::TopRight | Self::Right | Self::BottomRight => 1,
            Self::Top | Self::Bottom => 0,
        }
    }

    /// Vertical edge this handle drags: -1 top, +1 bottom, 0 none.
    pub fn dir_y(self) -> i8 {
        match self {
            Self::TopLeft | Self::Top | Self::TopRight => -1,
            Self::BottomLeft | Self::Bottom | Self::BottomRight => 1,
            Self::Left | Self::Right => 0,
        }
    }

    /// Where the handle sits on the given region.
    pub fn position(self, region: &CropRegion) -> Point {
        let c = region.center();
        let x = match self.dir_x() {
            -1 => region.start.x,
            1 => region.end.x,
            _ => c.x,
        };
        let y = match self.dir_y() {
            -1 => region.start.y,
            1 => region.end.y,
            _ => c.y,
        };
        Point::new(x, y)
    }

    /// The point that stays fixed while this handle is dragged.
    pub fn anchor(self, region: &CropRegion) -> Point {
        let c = region.center();
        let x = match self.dir_x() {
            -1 => region.end.x,
            1 => region.start.x,
            _ => c.x,
        };
        let y = match self.dir_y() {
            -1 => region.end.y,
            1 => region.start.y,
            _ => c.y,
        };
        Point::new(x, y)
    }
}

/// Find the handle whose square hit box (side `handle_size`, centred on the
/// handle) contains `p`. Corners win over edges.
pub fn hit_test_handle(
    region: &CropRegion,
    p: Point,
    handle_size: f64,
    aspect_locked: bool,
) -> Option<ResizeHandle> {
    let half = handle_size / 2.0;
    ResizeHandle::active(region.shape, aspect_locked)
        .iter()
        .copied()
        .find(|handle| {
            let h = handle.position(region);
            (p.x - h.x).abs() <= half && (p.y - h.y).abs() <= half
        })
}
