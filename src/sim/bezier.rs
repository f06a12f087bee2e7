//! Cubic Bezier curves for bonus pickup motion

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A cubic Bezier curve defined by four control points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    pub const fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Closed loop used by bonus pickups: leaves `anchor`, swings through
    /// `anchor + (∓1, 0, 0.3)` and comes back.
    pub fn bonus_loop(anchor: Vec3) -> Self {
        Self::new(
            anchor,
            anchor + Vec3::new(-1.0, 0.0, 0.3),
            anchor + Vec3::new(1.0, 0.0, 0.3),
            anchor,
        )
    }

    /// Point on the curve at `t` (expected in [0, 1], not clamped)
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        let tt = t * t;
        let uu = u * u;

        uu * u * self.p0 + 3.0 * uu * t * self.p1 + 3.0 * u * tt * self.p2 + tt * t * self.p3
    }
}
