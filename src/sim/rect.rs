//! Axis-aligned rectangle geometry for paddle, ball, bricks and power-ups
//!
//! Screen space: origin at the top-left corner, x grows right, y grows down.
//! A rectangle covers [x, x + width) × [y, y + height).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square box of side `2 * radius` around a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint of the bottom edge
    #[inline]
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.bottom())
    }

    /// Check if a point lies inside the rectangle (right/bottom edges excluded)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// AABB overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Free-function form of [`Rect::overlaps`]
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Overlaps horizontally, separated vertically
        let below = Rect::new(2.0, 20.0, 4.0, 4.0);
        assert!(!a.overlaps(&below));
        // Overlaps vertically, separated horizontally
        let beside = Rect::new(15.0, 2.0, 4.0, 4.0);
        assert!(!a.overlaps(&beside));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(r.contains_point(Vec2::new(39.9, 59.9)));
        assert!(!r.contains_point(Vec2::new(40.0, 30.0)));
        assert!(!r.contains_point(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_around_circle_and_center() {
        let r = Rect::around_circle(Vec2::new(400.0, 570.0), 8.0);
        assert_eq!(r, Rect::new(392.0, 562.0, 16.0, 16.0));
        assert_eq!(r.center(), Vec2::new(400.0, 570.0));
        assert_eq!(r.bottom_center(), Vec2::new(400.0, 578.0));
    }
}
