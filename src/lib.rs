//! Drift Circuit - arcade driving simulation core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (vehicle dynamics, collisions, scoring)
//! - `tuning`: Data-driven vehicle and scoring constants
//! - `snapshot`: Read-only render/HUD export of the simulation state

pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use snapshot::{RenderSnapshot, Telemetry};
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Vehicle spawn point (also the manual/crash reset point)
    pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, -0.95, 0.0);
    /// Speeds below this count as "at rest"
    pub const REST_EPSILON: f32 = 0.1;

    /// Vehicle hull in local space (x = width, y = height, z = length, -z forward)
    pub const HULL_HALF_WIDTH: f32 = 0.64;
    pub const HULL_HEIGHT: f32 = 0.8;
    pub const HULL_FRONT: f32 = -1.8;
    pub const HULL_REAR: f32 = 1.3;

    /// Obstacle radii
    pub const TREE_RADIUS: f32 = 0.27;
    pub const OUTDOOR_RADIUS: f32 = 0.2;
    pub const BONUS_RADIUS: f32 = 0.1;

    /// Number of bonus slots on the course
    pub const BONUS_SLOTS: usize = 5;

    /// Simulated frame delta used by the headless host (60 Hz)
    pub const HOST_DT: f32 = 1.0 / 60.0;
}

/// World up axis
pub const UP: Vec3 = Vec3::Y;

/// Unit forward vector for a yaw angle (0 rad faces -Z)
#[inline]
pub fn heading_vector(heading: f32) -> Vec3 {
    Vec3::new(-heading.sin(), 0.0, -heading.cos())
}

/// Unit right vector for a yaw angle
#[inline]
pub fn right_vector(heading: f32) -> Vec3 {
    heading_vector(heading).cross(UP).normalize_or_zero()
}

/// Sanitize a host-supplied frame delta (negative or NaN becomes 0)
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_vector_faces_negative_z() {
        let fwd = heading_vector(0.0);
        assert!((fwd - Vec3::NEG_Z).length() < 1e-6);

        // Positive yaw turns the nose toward -X (left)
        let left = heading_vector(FRAC_PI_2);
        assert!((left - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_right_vector_is_perpendicular() {
        for heading in [0.0, 0.4, -1.3, 2.9] {
            let fwd = heading_vector(heading);
            let right = right_vector(heading);
            assert!(fwd.dot(right).abs() < 1e-6);
            assert!((right.length() - 1.0).abs() < 1e-6);
        }
        assert!((right_vector(0.0) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(-1.0), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    }
}
