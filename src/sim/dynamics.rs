//! Arcade vehicle dynamics
//!
//! Not a tire model. Throttle grows an acceleration vector along the heading,
//! velocity is integrated and capped, and the sideways part of the velocity is
//! bled off each frame to give a controllable slide. Heading follows a
//! simplified bicycle model driven by `tan(steer)`.

use glam::Vec3;

use super::state::Vehicle;
use super::tick::DriveInput;
use crate::consts::REST_EPSILON;
use crate::{Tuning, heading_vector, right_vector};

/// Advance acceleration, velocity, heading and position by `dt`.
///
/// Returns the position delta applied this frame.
pub fn integrate(vehicle: &mut Vehicle, input: &DriveInput, dt: f32, tuning: &Tuning) -> Vec3 {
    let forward = heading_vector(vehicle.heading);
    let right = right_vector(vehicle.heading);
    vehicle.heading_dir = forward;

    apply_drive_force(vehicle, input, forward, dt, tuning);

    vehicle.velocity += vehicle.acceleration * dt;
    vehicle.velocity = vehicle.velocity.clamp_length_max(tuning.max_speed);

    vehicle.velocity = apply_drift(vehicle.velocity, forward, right, dt, tuning);

    if vehicle.velocity.length() > REST_EPSILON {
        vehicle.heading += vehicle.steer.tan() * dt;
    }

    let delta = vehicle.velocity * dt;
    vehicle.position += delta;
    delta
}

/// Throttle, brake or coast. Throttle wins when both pedals are held.
fn apply_drive_force(vehicle: &mut Vehicle, input: &DriveInput, forward: Vec3, dt: f32, tuning: &Tuning) {
    if input.throttle {
        // Switching from braking drops the old (backward) push
        if vehicle.signed_accel < 0.0 {
            vehicle.acceleration = Vec3::ZERO;
        }
        // Diminishing returns near top speed
        let speed_factor = 1.0 - vehicle.velocity.length() / tuning.max_speed;
        vehicle.acceleration += forward * tuning.acceleration_rate * speed_factor * dt;
        vehicle.acceleration = vehicle.acceleration.clamp_length_max(tuning.max_acceleration);
    } else if input.brake {
        if vehicle.signed_accel > 0.0 {
            vehicle.acceleration = Vec3::ZERO;
        }
        vehicle.acceleration -= forward * tuning.acceleration_rate * dt;
        vehicle.acceleration = vehicle.acceleration.clamp_length_max(tuning.max_acceleration);
    } else {
        let speed = vehicle.velocity.length();
        // Snap to rest instead of creeping, or overshooting into reverse on a long frame
        if speed > REST_EPSILON && tuning.deceleration_rate * dt < speed {
            vehicle.acceleration = -vehicle.velocity / speed * tuning.deceleration_rate;
        } else {
            vehicle.acceleration = Vec3::ZERO;
            vehicle.velocity = Vec3::ZERO;
        }
    }
}

/// Split velocity into forward and lateral parts and damp the lateral slide
fn apply_drift(velocity: Vec3, forward: Vec3, right: Vec3, dt: f32, tuning: &Tuning) -> Vec3 {
    let along = velocity.dot(forward) * forward;
    let lateral = velocity.dot(right) * right * tuning.drift_factor;
    let settle = (1.0 - tuning.drift_stability * dt).max(0.0);
    along + lateral * settle
}

/// Refresh the display scalars: speed and signed acceleration
pub fn update_readouts(vehicle: &mut Vehicle) {
    vehicle.speed = vehicle.velocity.length();
    let magnitude = vehicle.acceleration.length();
    vehicle.signed_accel = if vehicle.acceleration.dot(vehicle.heading_dir) < 0.0 {
        -magnitude
    } else {
        magnitude
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN_POSITION;

    fn throttle() -> DriveInput {
        DriveInput {
            throttle: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_throttle_from_rest_moves_forward() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        let delta = integrate(&mut vehicle, &throttle(), 0.1, &tuning);

        // a = 10 * 1.0 * 0.1 = 1, v = a * 0.1
        assert!((vehicle.acceleration - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert!((vehicle.velocity - Vec3::new(0.0, 0.0, -0.1)).length() < 1e-6);
        assert!((delta - Vec3::new(0.0, 0.0, -0.01)).length() < 1e-6);
    }

    #[test]
    fn test_brake_clears_forward_push() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.acceleration = Vec3::new(0.0, 0.0, -8.0);
        vehicle.signed_accel = 8.0;
        let brake = DriveInput {
            brake: true,
            ..Default::default()
        };
        integrate(&mut vehicle, &brake, 0.1, &tuning);
        update_readouts(&mut vehicle);

        assert!((vehicle.acceleration - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
        assert!(vehicle.signed_accel < 0.0);
    }

    #[test]
    fn test_brake_clamp_keeps_direction() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.acceleration = Vec3::new(0.0, 0.0, 19.5);
        vehicle.signed_accel = -19.5;
        let brake = DriveInput {
            brake: true,
            ..Default::default()
        };
        integrate(&mut vehicle, &brake, 0.1, &tuning);

        assert!((vehicle.acceleration.length() - tuning.max_acceleration).abs() < 1e-4);
        assert!(vehicle.acceleration.z > 0.0, "clamp must not flip the brake push");
    }

    #[test]
    fn test_throttle_wins_over_brake() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        let both = DriveInput {
            throttle: true,
            brake: true,
            ..Default::default()
        };
        integrate(&mut vehicle, &both, 0.1, &tuning);
        assert!(vehicle.velocity.z < 0.0);
    }

    #[test]
    fn test_coasting_below_epsilon_snaps_to_rest() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.velocity = Vec3::new(0.0, 0.0, -0.05);
        vehicle.acceleration = Vec3::new(0.0, 0.0, -3.0);
        integrate(&mut vehicle, &DriveInput::default(), 0.016, &tuning);
        assert_eq!(vehicle.velocity, Vec3::ZERO);
        assert_eq!(vehicle.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_long_coasting_frame_never_reverses() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.velocity = Vec3::new(0.0, 0.0, -0.3);
        integrate(&mut vehicle, &DriveInput::default(), 0.5, &tuning);
        assert_eq!(vehicle.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_lateral_slide_is_damped() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        // Pure sideways slide while facing -Z
        vehicle.velocity = Vec3::new(5.0, 0.0, 0.0);
        integrate(&mut vehicle, &DriveInput::default(), 0.1, &tuning);

        // Coasting first: 5 - 0.5 = 4.5, then drift 0.99 and settle (1 - 0.05)
        let expected = 4.5 * 0.99 * 0.95;
        assert!((vehicle.velocity.x - expected).abs() < 1e-4);
        assert!(vehicle.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn test_forward_motion_is_not_damped() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.velocity = Vec3::new(0.0, 0.0, -10.0);
        vehicle.acceleration = Vec3::ZERO;
        vehicle.signed_accel = 0.0;
        // Throttle with a tiny dt keeps the change purely longitudinal
        integrate(&mut vehicle, &throttle(), 0.001, &tuning);
        assert!(vehicle.velocity.x.abs() < 1e-6);
        assert!(vehicle.velocity.z < -10.0);
    }

    #[test]
    fn test_heading_only_turns_while_moving() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.steer = 0.5;
        integrate(&mut vehicle, &DriveInput::default(), 0.1, &tuning);
        assert_eq!(vehicle.heading, 0.0);

        vehicle.velocity = Vec3::new(0.0, 0.0, -10.0);
        integrate(&mut vehicle, &DriveInput::default(), 0.1, &tuning);
        assert!((vehicle.heading - 0.5_f32.tan() * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_clamped_to_max_speed() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.velocity = Vec3::new(0.0, 0.0, -19.9);
        vehicle.acceleration = Vec3::new(0.0, 0.0, -20.0);
        vehicle.signed_accel = 20.0;
        integrate(&mut vehicle, &throttle(), 0.5, &tuning);
        assert!(vehicle.velocity.length() <= tuning.max_speed + 1e-4);
    }

    #[test]
    fn test_readouts_sign_follows_heading() {
        let mut vehicle = Vehicle::new(SPAWN_POSITION);
        vehicle.velocity = Vec3::new(3.0, 0.0, -4.0);
        vehicle.acceleration = Vec3::new(0.0, 0.0, 2.0);
        update_readouts(&mut vehicle);
        assert!((vehicle.speed - 5.0).abs() < 1e-6);
        assert!((vehicle.signed_accel + 2.0).abs() < 1e-6);
    }
}
