//! Axis-aligned rectangle geometry
//!
//! All collision and scoring checks reduce to one overlap test between
//! pixel-space rectangles (y increases downward). Touching edges count as
//! overlapping: the separation test is strict, so `a.right() == b.pos.x`
//! is still a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Right edge (x + width)
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge (y + height)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Edge-inclusive overlap test
    ///
    /// True iff the projections on both axes intersect. Degenerate
    /// rectangles (zero or one pixel of extent, like the scoring zone)
    /// need no special case.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.pos.x
            || self.pos.x > other.right()
            || self.bottom() < other.pos.y
            || self.pos.y > other.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));

        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(a.overlaps(&below));
    }

    #[test]
    fn test_disjoint_rects_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Separated on x only
        assert!(!a.overlaps(&Rect::new(10.5, 0.0, 10.0, 10.0)));
        // Separated on y only
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_one_pixel_scoring_zone() {
        let player = Rect::new(250.0, 300.0, 106.0, 60.0);
        let zone = Rect::new(300.0, 0.0, 1.0, 720.0);
        assert!(player.overlaps(&zone));

        let zone_ahead = Rect::new(400.0, 0.0, 1.0, 720.0);
        assert!(!player.overlaps(&zone_ahead));
    }

    #[test]
    fn test_zero_extent_rect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let point = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(a.overlaps(&point));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -600.0f32..600.0, ay in -600.0f32..600.0,
            aw in 0.0f32..300.0, ah in 0.0f32..300.0,
            bx in -600.0f32..600.0, by in -600.0f32..600.0,
            bw in 0.0f32..300.0, bh in 0.0f32..300.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn rect_overlaps_itself(
            x in -600.0f32..600.0, y in -600.0f32..600.0,
            w in 0.0f32..300.0, h in 0.0f32..300.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.overlaps(&r));
        }

        #[test]
        fn axis_separation_implies_miss(
            ax in -600.0f32..600.0, ay in -600.0f32..600.0,
            aw in 0.0f32..300.0, ah in 0.0f32..300.0,
            by in -600.0f32..600.0, bh in 0.0f32..300.0,
            gap in 0.1f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(a.right() + gap, by, 10.0, bh);
            prop_assert!(!a.overlaps(&b));
        }
    }
}
