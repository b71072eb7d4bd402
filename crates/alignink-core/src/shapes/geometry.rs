//! Bounding geometry of a shape.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Position, size and rotation of a shape.
///
/// This is also the "size" a drag handle reports while a shape is being
/// moved, resized or rotated, and the final size committed on release.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (may be zero).
    pub width: f64,
    /// Height (may be zero).
    pub height: f64,
    /// Rotation in degrees, clockwise around the center.
    #[serde(default)]
    pub rotate: f64,
}

impl Geometry {
    /// Create an unrotated geometry.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotate: 0.0,
        }
    }

    /// Set the rotation in degrees.
    pub fn with_rotate(mut self, rotate: f64) -> Self {
        self.rotate = rotate;
        self
    }

    /// The unrotated box as a kurbo Rect.
    ///
    /// Negative sizes are normalized so `x0 <= x1` and `y0 <= y1`.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height).abs()
    }

    /// Center of the unrotated box.
    pub fn center(&self) -> Point {
        self.as_rect().center()
    }

    /// Rotation in radians.
    pub fn rotation_radians(&self) -> f64 {
        self.rotate.to_radians()
    }

    /// Check that every field, and every edge and center derived from
    /// them, is a finite number.
    pub fn is_finite(&self) -> bool {
        let x1 = self.x + self.width;
        let y1 = self.y + self.height;
        [
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotate,
            x1,
            y1,
            self.x + x1,
            self.y + y1,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl From<Rect> for Geometry {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_rect() {
        let rect = Geometry::new(10.0, 20.0, 100.0, 50.0).as_rect();
        assert!((rect.x0 - 10.0).abs() < f64::EPSILON);
        assert!((rect.y0 - 20.0).abs() < f64::EPSILON);
        assert!((rect.x1 - 110.0).abs() < f64::EPSILON);
        assert!((rect.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_size_normalized() {
        let rect = Geometry::new(100.0, 100.0, -40.0, -20.0).as_rect();
        assert!((rect.x0 - 60.0).abs() < f64::EPSILON);
        assert!((rect.x1 - 100.0).abs() < f64::EPSILON);
        assert!((rect.y0 - 80.0).abs() < f64::EPSILON);
        assert!((rect.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_finite() {
        assert!(Geometry::new(0.0, 0.0, 0.0, 0.0).is_finite());
        assert!(!Geometry::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(!Geometry::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
        assert!(!Geometry::new(0.0, 0.0, 1.0, 1.0).with_rotate(f64::NAN).is_finite());
    }

    #[test]
    fn test_overflowing_edges_not_finite() {
        assert!(!Geometry::new(f64::MAX, 0.0, f64::MAX, 1.0).is_finite());
        assert!(!Geometry::new(0.0, f64::MAX, 1.0, f64::MAX).is_finite());
        // Edges fit, but their sum (used for the center) does not.
        assert!(!Geometry::new(f64::MAX * 0.75, 0.0, 0.0, 1.0).is_finite());
        assert!(Geometry::new(-1e300, -1e300, 1e300, 1e300).is_finite());
    }

    #[test]
    fn test_rotate_defaults_when_missing() {
        let geometry: Geometry =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(geometry, Geometry::new(1.0, 2.0, 3.0, 4.0));
    }
}
