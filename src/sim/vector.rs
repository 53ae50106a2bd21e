//! Point-to-point vector helpers
//!
//! Every "move toward" and "is touching" decision in the sim goes through
//! these, so the zero-distance guard lives in exactly one place.

use glam::Vec2;

/// Distance and unit direction from one point to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    pub distance: f32,
    /// `None` when both points coincide (already arrived)
    pub direction: Option<Vec2>,
}

/// Compute the heading from `from` to `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Heading {
    let delta = to - from;
    let distance = delta.length();
    let direction = (distance > 0.0).then(|| delta / distance);
    Heading {
        distance,
        direction,
    }
}

/// Strict circular overlap test: `‖a − b‖ < radius`
#[inline]
pub fn circle_overlap(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Distance from `target` to the farthest corner of a `width × height` screen
pub fn corner_distance(target: Vec2, width: f32, height: f32) -> f32 {
    [
        Vec2::ZERO,
        Vec2::new(width, 0.0),
        Vec2::new(0.0, height),
        Vec2::new(width, height),
    ]
    .into_iter()
    .map(|corner| corner.distance(target))
    .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heading_unit_direction() {
        let h = heading(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert!((h.distance - 5.0).abs() < 1e-6);
        let dir = h.direction.expect("distinct points");
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_heading_zero_distance() {
        let p = Vec2::new(50.0, 50.0);
        let h = heading(p, p);
        assert_eq!(h.distance, 0.0);
        assert!(h.direction.is_none());
    }

    #[test]
    fn test_corner_distance_from_center() {
        let d = corner_distance(Vec2::new(320.0, 240.0), 640.0, 480.0);
        assert!((d - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_corner_distance_picks_farthest() {
        let d = corner_distance(Vec2::ZERO, 640.0, 480.0);
        assert!((d - 800.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn circle_overlap_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            r in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circle_overlap(a, b, r), circle_overlap(b, a, r));
        }

        #[test]
        fn circle_overlap_is_translation_invariant(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            dx in -40.0f32..40.0, dy in -40.0f32..40.0,
            shift in -500i32..500,
        ) {
            // Integer coordinates keep the translated distance exact
            let a = Vec2::new(ax.round(), ay.round());
            let b = a + Vec2::new(dx.round(), dy.round());
            let offset = Vec2::splat(shift as f32);
            prop_assert_eq!(
                circle_overlap(a, b, 32.0),
                circle_overlap(a + offset, b + offset, 32.0)
            );
        }
    }
}
