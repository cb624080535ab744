//! Rotation about the centre of an output canvas.
//!
//! Drawing with a rotated canvas means: translate to the centre, rotate,
//! translate back, then draw. To fill the output we need the inverse: for
//! each output pixel, the unrotated canvas position that lands on it.
//!
//! For a clockwise rotation by θ (y down), the inverse transform is:
//! ```text
//! ux =  (x - cx) * cos(θ) + (y - cy) * sin(θ) + cx
//! uy = -(x - cx) * sin(θ) + (y - cy) * cos(θ) + cy
//! ```

/// Inverse rotation about a canvas centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRotation {
    cos: f64,
    sin: f64,
    cx: f64,
    cy: f64,
    identity: bool,
}

impl CanvasRotation {
    /// Rotation by `angle_degrees` about the centre of a `width` x `height` canvas.
    pub fn new(angle_degrees: f64, width: u32, height: u32) -> Self {
        let normalized = angle_degrees % 360.0;
        let identity = normalized.abs() < 0.001 || (360.0 - normalized.abs()).abs() < 0.001;
        let radians = angle_degrees * std::f64::consts::PI / 180.0;

        Self {
            cos: radians.cos(),
            sin: radians.sin(),
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            identity,
        }
    }

    /// True when the rotation is a whole number of turns.
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Map an output canvas position to the unrotated canvas position drawn there.
    #[inline]
    pub fn unrotate(&self, x: f64, y: f64) -> (f64, f64) {
        if self.identity {
            return (x, y);
        }
        let dx = x - self.cx;
        let dy = y - self.cy;
        (
            dx * self.cos + dy * self.sin + self.cx,
            -dx * self.sin + dy * self.cos + self.cy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_identity_angles() {
        assert!(CanvasRotation::new(0.0, 10, 10).is_identity());
        assert!(CanvasRotation::new(360.0, 10, 10).is_identity());
        assert!(CanvasRotation::new(-720.0, 10, 10).is_identity());
        assert!(!CanvasRotation::new(90.0, 10, 10).is_identity());
    }

    #[test]
    fn test_identity_is_exact() {
        let rot = CanvasRotation::new(0.0, 7, 3);
        assert_eq!(rot.unrotate(1.5, 2.5), (1.5, 2.5));
    }

    #[test]
    fn test_centre_is_fixed() {
        let rot = CanvasRotation::new(37.0, 100, 60);
        assert_close(rot.unrotate(50.0, 30.0), (50.0, 30.0));
    }

    #[test]
    fn test_quarter_turn_clockwise() {
        // After a clockwise quarter turn the point right of centre shows what
        // was above centre.
        let rot = CanvasRotation::new(90.0, 100, 100);
        assert_close(rot.unrotate(60.0, 50.0), (50.0, 40.0));
    }

    #[test]
    fn test_half_turn() {
        let rot = CanvasRotation::new(180.0, 100, 100);
        assert_close(rot.unrotate(10.0, 20.0), (90.0, 80.0));
    }
}
