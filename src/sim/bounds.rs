//! Axis-aligned bounding boxes
//!
//! The whole collision model is AABB overlap: a box around the player, a box
//! around every active entity, and a per-axis separating test between them.

use glam::Vec3;

/// An axis-aligned box described by its center and half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: Vec3,
    pub half_extent: Vec3,
}

impl BoundingBox {
    pub fn new(center: Vec3, half_extent: Vec3) -> Self {
        Self { center, half_extent }
    }

    /// Overlap iff the centers are closer than the combined half-extents on
    /// every axis. Symmetric, and a box always intersects itself.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        (self.center.x - other.center.x).abs() < self.half_extent.x + other.half_extent.x
            && (self.center.y - other.center.y).abs() < self.half_extent.y + other.half_extent.y
            && (self.center.z - other.center.z).abs() < self.half_extent.z + other.half_extent.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingBox::new(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);
        let c = BoundingBox::new(Vec3::new(3.0, 0.0, 0.0), Vec3::ONE);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_separated_on_one_axis_misses() {
        let a = BoundingBox::new(Vec3::ZERO, Vec3::splat(0.5));
        let b = BoundingBox::new(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_faces_do_not_intersect() {
        // Strict inequality: exactly touching is a miss
        let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingBox::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        assert!(!a.intersects(&b));
    }

    proptest! {
        #[test]
        fn prop_intersection_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0, az in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0, bz in -50.0f32..50.0,
            ae in 0.01f32..10.0, be in 0.01f32..10.0,
        ) {
            let a = BoundingBox::new(Vec3::new(ax, ay, az), Vec3::splat(ae));
            let b = BoundingBox::new(Vec3::new(bx, by, bz), Vec3::splat(be));
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_box_intersects_itself(
            x in -50.0f32..50.0, y in -50.0f32..50.0, z in -50.0f32..50.0,
            ex in 0.01f32..10.0, ey in 0.01f32..10.0, ez in 0.01f32..10.0,
        ) {
            let a = BoundingBox::new(Vec3::new(x, y, z), Vec3::new(ex, ey, ez));
            prop_assert!(a.intersects(&a));
        }

        #[test]
        fn prop_coincident_centers_intersect(
            x in -50.0f32..50.0, y in -50.0f32..50.0, z in -50.0f32..50.0,
            ae in 0.01f32..10.0, be in 0.01f32..10.0,
        ) {
            let a = BoundingBox::new(Vec3::new(x, y, z), Vec3::splat(ae));
            let b = BoundingBox::new(Vec3::new(x, y, z), Vec3::splat(be));
            prop_assert!(a.intersects(&b));
        }
    }
}
