//! Wheel transforms (render-only)
//!
//! Each wheel rotates about its own pivot in model space: camber correction,
//! steering (front only), spin, then the camber is undone. Nothing here feeds
//! back into the dynamics.

use glam::{Mat4, Vec3};

/// Wheel hub pivots in the vehicle model's local space
pub const FRONT_LEFT_PIVOT: Vec3 = Vec3::new(-1.11, -0.5503, 0.1809);
pub const FRONT_RIGHT_PIVOT: Vec3 = Vec3::new(-1.11, 0.5393, 0.1858);
pub const REAR_LEFT_PIVOT: Vec3 = Vec3::new(0.5940, -0.5501, 0.19642);
pub const REAR_RIGHT_PIVOT: Vec3 = Vec3::new(0.59399, 0.54683, 0.20197);

/// Model-space transforms for the four wheels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSet {
    pub front_left: Mat4,
    pub front_right: Mat4,
    pub rear_left: Mat4,
    pub rear_right: Mat4,
}

impl Default for WheelSet {
    fn default() -> Self {
        Self {
            front_left: Mat4::IDENTITY,
            front_right: Mat4::IDENTITY,
            rear_left: Mat4::IDENTITY,
            rear_right: Mat4::IDENTITY,
        }
    }
}

impl WheelSet {
    /// Build all four transforms from the steering angle, spin and camber
    pub fn compute(steer: f32, spin: f32, camber: f32) -> Self {
        Self {
            front_left: wheel_transform(FRONT_LEFT_PIVOT, -camber, Some(steer), spin),
            front_right: wheel_transform(FRONT_RIGHT_PIVOT, camber, Some(steer), spin),
            rear_left: wheel_transform(REAR_LEFT_PIVOT, -camber, None, spin),
            rear_right: wheel_transform(REAR_RIGHT_PIVOT, camber, None, spin),
        }
    }

    /// Transforms in front-left, front-right, rear-left, rear-right order
    pub fn as_array(&self) -> [Mat4; 4] {
        [self.front_left, self.front_right, self.rear_left, self.rear_right]
    }
}

/// `T(pivot) · Rx(camber) · Rz(steer) · Ry(spin) · Rx(-camber) · T(-pivot)`
fn wheel_transform(pivot: Vec3, camber: f32, steer: Option<f32>, spin: f32) -> Mat4 {
    let steer = steer.map_or(Mat4::IDENTITY, Mat4::from_rotation_z);
    Mat4::from_translation(pivot)
        * Mat4::from_rotation_x(camber)
        * steer
        * Mat4::from_rotation_y(spin)
        * Mat4::from_rotation_x(-camber)
        * Mat4::from_translation(-pivot)
}

/// Spin increment for one frame
///
/// Wheels roll backward (positive) when the velocity opposes the vehicle's
/// forward axis, forward (negative) otherwise.
pub fn spin_delta(velocity: Vec3, forward: Vec3, speed: f32, dt: f32, wheel_radius: f32) -> f32 {
    let direction = if velocity.dot(forward) < 0.0 { 1.0 } else { -1.0 };
    direction * speed * dt / wheel_radius
}
