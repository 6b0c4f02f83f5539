//! Content-space geometry primitives.
//!
//! All coordinates are in canvas content units with the y axis increasing
//! downward. OCR observations arrive with boxes normalized to [0,1]x[0,1]
//! within the scanned rectangle and the y axis increasing upward; use
//! [`Rect::from_normalized`] to convert (the y flip happens there).

use serde::{Deserialize, Serialize};

/// A point in canvas content space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Proximity checks compare against squared thresholds, so the square
    /// root is never taken.
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// An axis-aligned rectangle in canvas content space.
///
/// `x`/`y` is the corner with the smallest coordinates (top-left in a
/// y-down content space).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a box normalized to [0,1]x[0,1] within `region` (y axis up,
    /// per the OCR boundary contract) into content space (y axis down).
    pub fn from_normalized(normalized: Rect, region: Rect) -> Self {
        Self {
            x: region.x + normalized.x * region.width,
            y: region.y + (1.0 - normalized.y - normalized.height) * region.height,
            width: normalized.width * region.width,
            height: normalized.height * region.height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A rect with zero or negative extent carries no usable geometry.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sq_is_squared_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(b.distance_sq(&a), 25.0);
    }

    #[test]
    fn center_of_rect() {
        let rect = Rect::new(10.0, 20.0, 40.0, 10.0);
        assert_eq!(rect.center(), Point::new(30.0, 25.0));
    }

    #[test]
    fn from_normalized_flips_y() {
        let region = Rect::new(100.0, 200.0, 400.0, 300.0);
        // A box hugging the bottom-left corner in the OCR's y-up space...
        let normalized = Rect::new(0.0, 0.0, 0.25, 0.1);
        let content = Rect::from_normalized(normalized, region);
        // ...lands at the bottom of the region in y-down content space.
        assert_eq!(content.x, 100.0);
        assert!((content.y - (200.0 + 0.9 * 300.0)).abs() < 1e-9);
        assert_eq!(content.width, 100.0);
        assert!((content.height - 30.0).abs() < 1e-9);
    }

    #[test]
    fn from_normalized_full_box_covers_region() {
        let region = Rect::new(50.0, 60.0, 200.0, 100.0);
        let content = Rect::from_normalized(Rect::new(0.0, 0.0, 1.0, 1.0), region);
        assert_eq!(content, region);
    }

    #[test]
    fn contains_includes_edges() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn intersects_detects_overlap_and_separation() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn degenerate_rect_detected() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
