//! Pointer-driven editing of the crop region.
//!
//! The state machine has four states. A pointer-down classifies the pointer
//! into resize handle, region interior, or empty space (in that priority
//! order); subsequent pointer moves edit the region according to the state;
//! pointer-up returns to idle.
//!
//! # Invariants
//!
//! After every update:
//! - the region lies inside `[0, viewport.width] x [0, viewport.height]`
//! - with an aspect lock `r`, a non-empty region has `width / height == r`
//!
//! Dragging an edge past the opposite edge clamps it there (the region
//! collapses to zero extent on that axis); corners are never swapped.

use crate::geometry::{Point, Size};
use crate::region::{hit_test_handle, CropRegion, ResizeHandle};

/// Constraints every edit is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditContext {
    /// Viewport extent; regions never leave it.
    pub viewport: Size,
    /// Active width/height ratio, `None` for free-form.
    pub lock: Option<f64>,
    /// Side length of the square handle hit boxes.
    pub handle_size: f64,
}

/// Current pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Drawing a new region from `anchor`.
    Creating { anchor: Point },
    /// Dragging the whole region; `last` is the previous pointer position.
    Moving { last: Point },
    /// Dragging a handle; `grab` is the pointer offset from the handle at
    /// pointer-down so the handle does not jump under the cursor.
    Resizing { handle: ResizeHandle, grab: Point },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Classify a pointer-down and start the matching interaction.
    ///
    /// Starting a new region resets `region` to a zero-size rectangle at the
    /// (clamped) pointer position.
    pub fn begin(region: &mut CropRegion, pos: Point, ctx: &EditContext) -> Interaction {
        if let Some(handle) = hit_test_handle(region, pos, ctx.handle_size, ctx.lock.is_some()) {
            let at = handle.position(region);
            return Interaction::Resizing {
                handle,
                grab: Point::new(pos.x - at.x, pos.y - at.y),
            };
        }

        if region.contains(pos) {
            return Interaction::Moving { last: pos };
        }

        let anchor = pos.clamp_to(ctx.viewport);
        *region = CropRegion::from_corners(anchor, anchor, region.shape);
        Interaction::Creating { anchor }
    }

    /// Apply a pointer-move. Returns true when the region changed.
    pub fn update(&mut self, region: &mut CropRegion, pos: Point, ctx: &EditContext) -> bool {
        let next = match self {
            Interaction::Idle => return false,
            Interaction::Creating { anchor } => create_region(*anchor, pos, region, ctx),
            Interaction::Moving { last } => {
                let moved = move_region(region, pos.x - last.x, pos.y - last.y, ctx.viewport);
                *last = pos;
                moved
            }
            Interaction::Resizing { handle, grab } => {
                let target = Point::new(pos.x - grab.x, pos.y - grab.y);
                resize_region(region, *handle, target, ctx)
            }
        };

        let changed = next != *region;
        *region = next;
        changed
    }
}

/// Region spanned from `anchor` to the pointer, honouring the aspect lock.
///
/// With a lock, the axis dragged further (relative to the ratio) drives the
/// other one. Each axis extends in the direction the pointer went; an axis
/// the pointer has not moved along extends toward the side with more room.
/// If the locked rectangle would leave the viewport both dimensions shrink
/// together, down to zero extent.
pub fn create_region(anchor: Point, pos: Point, current: &CropRegion, ctx: &EditContext) -> CropRegion {
    let pos = pos.clamp_to(ctx.viewport);
    let Some(ratio) = ctx.lock else {
        return CropRegion::from_corners(anchor, pos, current.shape);
    };

    let dx = pos.x - anchor.x;
    let dy = pos.y - anchor.y;
    let sx = direction(dx, anchor.x, ctx.viewport.width);
    let sy = direction(dy, anchor.y, ctx.viewport.height);

    let room = Size::new(
        if sx > 0.0 { ctx.viewport.width - anchor.x } else { anchor.x },
        if sy > 0.0 { ctx.viewport.height - anchor.y } else { anchor.y },
    );
    let (w, h) = locked_extent(dx.abs(), dy.abs(), ratio, room);

    CropRegion::from_corners(
        anchor,
        Point::new(anchor.x + sx * w, anchor.y + sy * h),
        current.shape,
    )
}

/// Translate by `(dx, dy)`, stopping at the viewport edges per axis.
/// The region never changes size.
pub fn move_region(region: &CropRegion, dx: f64, dy: f64, viewport: Size) -> CropRegion {
    let dx = dx.clamp(-region.start.x, (viewport.width - region.end.x).max(-region.start.x));
    let dy = dy.clamp(-region.start.y, (viewport.height - region.end.y).max(-region.start.y));
    region.translated(dx, dy)
}

/// Move the edges owned by `handle` to `target`.
///
/// Free-form: each dragged edge follows the pointer but stops at the
/// opposite edge. Locked: the opposite corner (or, for an edge handle, the
/// midpoint of the opposite edge) stays fixed and the non-driving dimension
/// is recomputed from the driving one.
pub fn resize_region(
    region: &CropRegion,
    handle: ResizeHandle,
    target: Point,
    ctx: &EditContext,
) -> CropRegion {
    let target = target.clamp_to(ctx.viewport);
    match ctx.lock {
        None => resize_free(region, handle, target),
        Some(ratio) => resize_locked(region, handle, target, ratio, ctx.viewport),
    }
}

fn resize_free(region: &CropRegion, handle: ResizeHandle, target: Point) -> CropRegion {
    let mut start = region.start;
    let mut end = region.end;

    match handle.dir_x() {
        -1 => start.x = target.x.min(end.x),
        1 => end.x = target.x.max(start.x),
        _ => {}
    }
    match handle.dir_y() {
        -1 => start.y = target.y.min(end.y),
        1 => end.y = target.y.max(start.y),
        _ => {}
    }

    CropRegion::from_corners(start, end, region.shape)
}

fn resize_locked(
    region: &CropRegion,
    handle: ResizeHandle,
    target: Point,
    ratio: f64,
    viewport: Size,
) -> CropRegion {
    let anchor = handle.anchor(region);
    let sx = handle.dir_x() as f64;
    let sy = handle.dir_y() as f64;

    // Pointer past the anchor contributes zero extent, never a flip.
    let raw_w = ((target.x - anchor.x) * sx).max(0.0);
    let raw_h = ((target.y - anchor.y) * sy).max(0.0);

    let room_x = match handle.dir_x() {
        1 => viewport.width - anchor.x,
        -1 => anchor.x,
        _ => 2.0 * anchor.x.min(viewport.width - anchor.x),
    };
    let room_y = match handle.dir_y() {
        1 => viewport.height - anchor.y,
        -1 => anchor.y,
        _ => 2.0 * anchor.y.min(viewport.height - anchor.y),
    };
    let room = Size::new(room_x, room_y);

    let (w, h) = if handle.is_corner() {
        locked_extent(raw_w, raw_h, ratio, room)
    } else if sx != 0.0 {
        limit(raw_w, raw_w / ratio, room)
    } else {
        limit(raw_h * ratio, raw_h, room)
    };

    let (x0, x1) = if sx == 0.0 {
        (anchor.x - w / 2.0, anchor.x + w / 2.0)
    } else {
        (anchor.x, anchor.x + sx * w)
    };
    let (y0, y1) = if sy == 0.0 {
        (anchor.y - h / 2.0, anchor.y + h / 2.0)
    } else {
        (anchor.y, anchor.y + sy * h)
    };

    CropRegion::from_corners(Point::new(x0, y0), Point::new(x1, y1), region.shape)
}

/// Extent for an aspect-locked drag of `(raw_w, raw_h)`, fitted into `room`.
fn locked_extent(raw_w: f64, raw_h: f64, ratio: f64, room: Size) -> (f64, f64) {
    let (w, h) = if raw_w >= raw_h * ratio {
        (raw_w, raw_w / ratio)
    } else {
        (raw_h * ratio, raw_h)
    };
    limit(w, h, room)
}

/// Shrink `(w, h)` uniformly so it fits in `room`.
fn limit(w: f64, h: f64, room: Size) -> (f64, f64) {
    let mut scale: f64 = 1.0;
    if w > room.width {
        scale = scale.min(room.width.max(0.0) / w);
    }
    if h > room.height {
        scale = scale.min(room.height.max(0.0) / h);
    }
    (w * scale, h * scale)
}

fn direction(delta: f64, origin: f64, extent: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else if extent - origin >= origin {
        1.0
    } else {
        -1.0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
