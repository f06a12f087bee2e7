//! Geometry primitives shared by the collision tests
//!
//! Boxes are axis-aligned and given by their min/max corners. Callers keep
//! `min <= max` on every axis; nothing here checks it.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounding box of a local hull rotated by `heading` (yaw) and moved to `position`
    pub fn from_hull(corners: &[Vec3; 8], heading: f32, position: Vec3) -> Self {
        let rotation = Mat3::from_rotation_y(heading);
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &corner in corners {
            let world = rotation * corner + position;
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }

    /// The eight corners, bottom face first
    pub fn corners(&self) -> [Vec3; 8] {
        box_corners(self.min, self.max)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        closest_point_on_box(self.min, self.max, point)
    }
}

/// The eight corners of the vehicle hull in local space
pub fn vehicle_hull() -> [Vec3; 8] {
    box_corners(
        Vec3::new(-HULL_HALF_WIDTH, 0.0, HULL_FRONT),
        Vec3::new(HULL_HALF_WIDTH, HULL_HEIGHT, HULL_REAR),
    )
}

/// World AABB of the vehicle at a given pose
#[inline]
pub fn vehicle_aabb(position: Vec3, heading: f32) -> Aabb {
    Aabb::from_hull(&vehicle_hull(), heading, position)
}

fn box_corners(min: Vec3, max: Vec3) -> [Vec3; 8] {
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ]
}

/// Closest point inside the box to `point` (per-axis clamp)
#[inline]
pub fn closest_point_on_box(min: Vec3, max: Vec3, point: Vec3) -> Vec3 {
    // Not Vec3::clamp: that asserts min <= max, and degenerate boxes must not panic
    point.max(min).min(max)
}

/// Project all eight box corners onto `normal`, returning (min, max) dot products
///
/// A plane through the origin with this normal touches the box exactly when
/// 0 lies inside the returned interval.
pub fn box_projection_extent(normal: Vec3, min: Vec3, max: Vec3) -> (f32, f32) {
    box_corners(min, max)
        .iter()
        .map(|corner| corner.dot(normal))
        .fold((f32::MAX, f32::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)))
}
