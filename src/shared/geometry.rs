//! Integer rectangle helpers in world pixels (y grows downwards).
//!
//! `IRect` stores `min`/`max`; gameplay code thinks in left/top/right/bottom
//! edges and centres, so this trait bridges the two.

use bevy::math::{IRect, IVec2};

/// Rectangle from top-left corner and size.
pub fn rect_xywh(x: i32, y: i32, w: i32, h: i32) -> IRect {
    IRect::from_corners(IVec2::new(x, y), IVec2::new(x + w, y + h))
}

pub trait RectExt {
    fn left(&self) -> i32;
    fn right(&self) -> i32;
    fn top(&self) -> i32;
    fn bottom(&self) -> i32;
    /// `min + size / 2`, rounded towards the top-left.
    fn center_point(&self) -> IVec2;

    /// Move so the left edge sits at `x`, keeping the size.
    fn set_left(&mut self, x: i32);
    fn set_right(&mut self, x: i32);
    fn set_top(&mut self, y: i32);
    fn set_bottom(&mut self, y: i32);
    fn set_center_x(&mut self, x: i32);
    fn set_center_y(&mut self, y: i32);
    fn with_center(self, center: IVec2) -> Self;
    fn with_midbottom(self, midbottom: IVec2) -> Self;

    /// Strict overlap: touching edges do not collide.
    fn overlaps(&self, other: &IRect) -> bool;
    /// Half-open containment: `min <= p < max`.
    fn contains_point(&self, p: IVec2) -> bool;
    /// Grow (or shrink, with negative deltas) around the centre.
    /// `dx` is the total change in width.
    fn inflated(&self, dx: i32, dy: i32) -> IRect;
}

impl RectExt for IRect {
    fn left(&self) -> i32 {
        self.min.x
    }

    fn right(&self) -> i32 {
        self.max.x
    }

    fn top(&self) -> i32 {
        self.min.y
    }

    fn bottom(&self) -> i32 {
        self.max.y
    }

    fn center_point(&self) -> IVec2 {
        self.min + self.size() / 2
    }

    fn set_left(&mut self, x: i32) {
        let w = self.width();
        self.min.x = x;
        self.max.x = x + w;
    }

    fn set_right(&mut self, x: i32) {
        let w = self.width();
        self.max.x = x;
        self.min.x = x - w;
    }

    fn set_top(&mut self, y: i32) {
        let h = self.height();
        self.min.y = y;
        self.max.y = y + h;
    }

    fn set_bottom(&mut self, y: i32) {
        let h = self.height();
        self.max.y = y;
        self.min.y = y - h;
    }

    fn set_center_x(&mut self, x: i32) {
        let w = self.width();
        self.set_left(x - w / 2);
    }

    fn set_center_y(&mut self, y: i32) {
        let h = self.height();
        self.set_top(y - h / 2);
    }

    fn with_center(mut self, center: IVec2) -> Self {
        self.set_center_x(center.x);
        self.set_center_y(center.y);
        self
    }

    fn with_midbottom(mut self, midbottom: IVec2) -> Self {
        self.set_center_x(midbottom.x);
        self.set_bottom(midbottom.y);
        self
    }

    fn overlaps(&self, other: &IRect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    fn inflated(&self, dx: i32, dy: i32) -> IRect {
        let min = self.min - IVec2::new(dx / 2, dy / 2);
        let size = (self.size() + IVec2::new(dx, dy)).max(IVec2::ZERO);
        IRect::from_corners(min, min + size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = rect_xywh(10, 20, 64, 32);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 74);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 52);
        assert_eq!(r.center_point(), IVec2::new(42, 36));
    }

    #[test]
    fn test_set_edges_keep_size() {
        let mut r = rect_xywh(0, 0, 66, 122);
        r.set_right(100);
        assert_eq!(r.left(), 34);
        assert_eq!(r.width(), 66);
        r.set_top(-5);
        assert_eq!(r.bottom(), 117);
        assert_eq!(r.height(), 122);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect_xywh(0, 0, 64, 64);
        let b = rect_xywh(64, 0, 64, 64);
        assert!(!a.overlaps(&b));
        let c = rect_xywh(63, 63, 64, 64);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = rect_xywh(0, 0, 64, 64);
        assert!(r.contains_point(IVec2::new(0, 0)));
        assert!(r.contains_point(IVec2::new(63, 63)));
        assert!(!r.contains_point(IVec2::new(64, 10)));
    }

    #[test]
    fn test_inflate_negative_shrinks_around_center() {
        let r = rect_xywh(0, 0, 192, 192);
        let hitbox = r.inflated(-126, -70);
        assert_eq!(hitbox.width(), 66);
        assert_eq!(hitbox.height(), 122);
        assert_eq!(hitbox.center_point(), r.center_point());
    }
}
