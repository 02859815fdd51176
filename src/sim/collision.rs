//! Axis-aligned bounding-box collision tests
//!
//! Every entity is an upright rectangle in the shared 0-100 space, so
//! the standard AABB overlap test is the only geometry the game needs.

use super::state::GameObject;

/// Strict AABB overlap: touching edges do not count.
pub fn overlaps(a: &GameObject, b: &GameObject) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObjectKind, Tint};
    use glam::Vec2;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> GameObject {
        GameObject {
            id: 0,
            kind: ObjectKind::Enemy,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            direction: None,
            speed: None,
            tint: Some(Tint::Pink),
        }
    }

    #[test]
    fn test_identical_rects_overlap() {
        let a = rect(10.0, 10.0, 5.0, 5.0);
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_partial_overlap() {
        let a = rect(10.0, 10.0, 5.0, 5.0);
        let b = rect(13.0, 12.0, 5.0, 5.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(10.0, 10.0, 5.0, 5.0);
        let b = rect(15.0, 10.0, 5.0, 5.0);
        assert!(!overlaps(&a, &b));
        let below = rect(10.0, 15.0, 5.0, 5.0);
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(50.0, 50.0, 2.0, 2.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = rect(10.0, 10.0, 20.0, 20.0);
        let inner = rect(15.0, 15.0, 2.0, 2.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }
}
