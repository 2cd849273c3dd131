//! Axis-aligned collision detection
//!
//! Everything that moves in Abyss Strike is an axis-aligned rectangle, so
//! the whole collision story is one pure overlap predicate. Keeping it
//! trivial is deliberate: combat resolution in `tick` leans on the exact
//! half-open semantics below, and tests pin them down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle: origin at the top-left corner, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point, used as the anchor for explosions and debris
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Check whether two rectangles overlap.
///
/// Half-open semantics: rectangles that merely touch along an edge
/// (`a.right() == b.left()`) do NOT overlap. Call sites keep a fixed
/// argument order (moving entity first) so behavior is reproducible even
/// though the predicate is symmetric on paper.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Touching along the right edge
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        // Touching along the bottom edge
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
        // Corner contact only
        let d = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &d));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));

        // Overlapping on x only is not a collision
        let c = Rect::new(5.0, 30.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(3.0, 4.0, 10.0, 20.0);
        assert_eq!(r.left(), 3.0);
        assert_eq!(r.right(), 13.0);
        assert_eq!(r.top(), 4.0);
        assert_eq!(r.bottom(), 24.0);
        assert_eq!(r.center(), Vec2::new(8.0, 14.0));
    }
}
