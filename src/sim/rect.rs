//! Axis-aligned rectangle geometry for walls, trails and cycle hit boxes
//!
//! A rectangle is stored as a center plus half-extents. Edges that merely
//! touch do not count as overlapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center point
    pub center: Vec2,
    /// Half of width and height
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self {
            center,
            half: half.abs(),
        }
    }

    /// Rectangle spanning two corners (any order)
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            half: (max - min) * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Strict overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half + other.half;
        delta.x < reach.x && delta.y < reach.y
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let min = self.min();
        let max = self.max();
        other.min().cmpge(min).all() && other.max().cmple(max).all()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        let delta = (point - self.center).abs();
        delta.x <= self.half.x && delta.y <= self.half.y
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(Vec2::ZERO, Vec2::ONE);
        let touching = Rect::new(Vec2::new(2.0, 0.0), Vec2::ONE);
        let overlapping = Rect::new(Vec2::new(1.5, 0.5), Vec2::ONE);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_from_corners_any_order() {
        let r = Rect::from_corners(Vec2::new(3.0, -1.0), Vec2::new(-1.0, 1.0));
        assert_eq!(r.center, Vec2::new(1.0, 0.0));
        assert_eq!(r.half, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_containment() {
        let arena = Rect::new(Vec2::ZERO, Vec2::new(10.0, 5.0));
        assert!(arena.contains_rect(&Rect::new(Vec2::new(9.0, 0.0), Vec2::splat(0.5))));
        assert!(!arena.contains_rect(&Rect::new(Vec2::new(9.8, 0.0), Vec2::splat(0.5))));
        assert!(arena.contains_point(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_union_covers_both() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(0.5));
        let b = Rect::new(Vec2::new(4.0, 0.0), Vec2::splat(0.5));
        let u = a.union(&b);
        assert!(u.contains_rect(&a) && u.contains_rect(&b));
        assert_eq!(u.size(), Vec2::new(5.0, 1.0));
    }
}
