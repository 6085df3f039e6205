//! Geometric primitives: Point, Size, Rect.
//!
//! Layout math runs in `f64` and rectangles are stored by their corners
//! (`x0, y0` top-left, `x1, y1` bottom-right) so that tiling can write edges
//! directly without converting back and forth from width/height.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Calculate area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// An axis-aligned rectangle defined by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl Rect {
    /// Create a rectangle from its edges.
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create from size at origin.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Width (`x1 - x0`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height (`y1 - y0`).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Get the size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Get the area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Get the origin (top-left) point.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Get center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if a point is inside the rectangle (inclusive).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    /// Check if another rectangle lies entirely within this one (inclusive).
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Shrink each edge by its own amount.
    ///
    /// An axis that would invert collapses to its midpoint instead, so the
    /// result always satisfies `x0 <= x1` and `y0 <= y1`.
    #[must_use]
    pub fn inset_edges(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::new(
            self.x0 + left,
            self.y0 + top,
            self.x1 - right,
            self.y1 - bottom,
        )
        .collapsed()
    }

    /// Shrink uniformly on all sides, collapsing inverted axes.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        self.inset_edges(amount, amount, amount, amount)
    }

    /// Collapse an inverted axis to its midpoint.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        if self.x1 < self.x0 {
            let mid = (self.x0 + self.x1) / 2.0;
            self.x0 = mid;
            self.x1 = mid;
        }
        if self.y1 < self.y0 {
            let mid = (self.y0 + self.y1) / 2.0;
            self.y0 = mid;
            self.y1 = mid;
        }
        self
    }

    /// Round every edge to the nearest integer pixel.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::new(
            round_half_up(self.x0),
            round_half_up(self.y0),
            round_half_up(self.x1),
            round_half_up(self.y1),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// Pixel snapping must treat `-0.5` and `0.5` the same way, which
/// `f64::round` (ties away from zero) does not.
#[must_use]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_size_default() {
        assert_eq!(Size::default(), Size::ZERO);
    }

    #[test]
    fn test_rect_default() {
        let r = Rect::default();
        assert_eq!(r.x0, 0.0);
        assert_eq!(r.area(), 0.0);
    }

    #[test]
    fn test_inset_edges_collapses_to_midpoint() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset_edges(8.0, 0.0, 8.0, 0.0);
        assert_eq!(r.y0, 5.0);
        assert_eq!(r.y1, 5.0);
        assert_eq!(r.width(), 10.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }
}
