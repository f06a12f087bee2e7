//! Collision tests between the vehicle box and course geometry
//!
//! All tests are pure and allocation-free. Obstacles are upright posts and
//! trees, bonuses are small spheres, and the finish line is a thin box.

use glam::Vec3;

use super::geometry::{Aabb, box_projection_extent, closest_point_on_box};

/// True if the sphere touches or overlaps the box
#[inline]
pub fn box_intersects_sphere(min: Vec3, max: Vec3, center: Vec3, radius: f32) -> bool {
    closest_point_on_box(min, max, center).distance(center) <= radius
}

/// Box against an upright obstacle (tree trunk, billboard post)
///
/// Uses the sphere formula: the vertical offset between the box and the
/// obstacle center counts toward the distance.
#[inline]
pub fn box_intersects_cylinder(min: Vec3, max: Vec3, center: Vec3, radius: f32) -> bool {
    box_intersects_sphere(min, max, center, radius)
}

/// True if the box hits any obstacle in the list (stops at the first hit)
pub fn box_intersects_any(min: Vec3, max: Vec3, centers: &[Vec3], radius: f32) -> bool {
    first_hit(min, max, centers, radius).is_some()
}

/// Index of the first obstacle (in list order) the box hits
pub fn first_hit(min: Vec3, max: Vec3, centers: &[Vec3], radius: f32) -> Option<usize> {
    for (i, &center) in centers.iter().enumerate() {
        if box_intersects_cylinder(min, max, center, radius) {
            return Some(i);
        }
    }
    None
}

/// True if the point lies inside the closed box
#[inline]
pub fn point_inside_box(point: Vec3, min: Vec3, max: Vec3) -> bool {
    point.cmpge(min).all() && point.cmple(max).all()
}

/// True if the box straddles or touches the plane through the origin with this normal
pub fn box_intersects_plane_through_origin(normal: Vec3, min: Vec3, max: Vec3) -> bool {
    let (lo, hi) = box_projection_extent(normal, min, max);
    lo <= 0.0 && hi >= 0.0
}

impl Aabb {
    #[inline]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        box_intersects_sphere(self.min, self.max, center, radius)
    }

    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point_inside_box(point, self.min, self.max)
    }
}
