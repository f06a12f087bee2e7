//! Per-frame simulation step
//!
//! Runs once per rendered frame with the measured frame delta (variable
//! timestep). Order: dynamics, obstacle collision, bonus pickup, finish line,
//! readouts, steering, wheels, cornering score, bonus motion.

use serde::{Deserialize, Serialize};

use super::course::ObstacleKind;
use super::dynamics::{integrate, update_readouts};
use super::geometry::Aabb;
use super::state::{DrivePhase, SimEvent, SimState, Vehicle};
use super::steering::{SteerInput, update_steer};
use super::wheels::{WheelSet, spin_delta};
use crate::consts::BONUS_SLOTS;
use crate::{heading_vector, sanitize_dt};

/// Input levels sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInput {
    pub throttle: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl DriveInput {
    #[inline]
    pub fn steer(&self) -> SteerInput {
        SteerInput {
            left: self.steer_left,
            right: self.steer_right,
        }
    }
}

/// Advance the simulation by one frame
pub fn step(state: &mut SimState, input: &DriveInput, dt: f32) {
    let dt = sanitize_dt(dt);
    state.events.clear();
    state.time += f64::from(dt);

    if state.phase == DrivePhase::Crashed {
        state.phase = DrivePhase::Driving;
    }

    integrate(&mut state.vehicle, input, dt, &state.tuning);

    let aabb = state.vehicle.aabb();
    let crashed = match state.course.obstacle_hit(&aabb) {
        Some((kind, index)) => {
            apply_crash(state, kind, index);
            true
        }
        None => false,
    };

    if !crashed {
        collect_bonuses(state, &aabb);
    }
    update_finish_line(state, dt, !crashed);

    update_readouts(&mut state.vehicle);

    let vehicle = &mut state.vehicle;
    vehicle.steer = update_steer(vehicle.steer, input.steer(), dt, &state.tuning);
    update_wheels(vehicle, dt, &state.tuning);
    score_cornering(vehicle, dt, &state.tuning);

    for bonus in &mut state.bonuses {
        bonus.advance(dt);
    }
}

/// Manual reset: back to the spawn point at rest with the score cleared.
/// Keeps the multiplier and leaves the bonuses as they are.
pub fn reset(state: &mut SimState) {
    state.vehicle.reset_motion(state.course.spawn);
    state.phase = DrivePhase::Driving;
    state.events.push(SimEvent::ManualReset);
    log::info!("Manual reset");
}

/// Collision response: the vehicle after hitting an obstacle.
///
/// Everything goes back to spawn defaults, multiplier included.
pub fn crash_reset(vehicle: &Vehicle, spawn: glam::Vec3) -> Vehicle {
    let mut next = vehicle.clone();
    next.reset_motion(spawn);
    next.multiplier = 1.0;
    next
}

fn apply_crash(state: &mut SimState, kind: ObstacleKind, index: usize) {
    log::info!(
        "Crashed into {:?} #{} at ({:.2}, {:.2}), score {} lost",
        kind,
        index,
        state.vehicle.position.x,
        state.vehicle.position.z,
        state.vehicle.score
    );
    state.vehicle = crash_reset(&state.vehicle, state.course.spawn);
    state.reactivate_bonuses();
    state.phase = DrivePhase::Crashed;
    state.crashes += 1;
    state.events.push(SimEvent::Crashed { kind, index });
}

fn collect_bonuses(state: &mut SimState, aabb: &Aabb) {
    let radius = state.course.bonus_radius;
    for (slot, bonus) in state.bonuses.iter_mut().enumerate().take(BONUS_SLOTS) {
        if bonus.active && aabb.intersects_sphere(bonus.position, radius) {
            bonus.active = false;
            state.vehicle.multiplier += state.tuning.multiplier_step;
            let multiplier = state.vehicle.multiplier;
            log::debug!("Bonus {} collected, multiplier now {:.1}x", slot, multiplier);
            state.events.push(SimEvent::BonusCollected { slot, multiplier });
        }
    }
}

/// Tick the gate cooldown and, if allowed this frame, check for a lap
fn update_finish_line(state: &mut SimState, dt: f32, can_trigger: bool) {
    if state.gate.update(dt) {
        log::debug!("Finish line armed");
        state.events.push(SimEvent::GateArmed);
    }

    if can_trigger && state.gate.try_trigger(state.vehicle.position) {
        state.vehicle.score += state.tuning.lap_bonus;
        state.laps += 1;
        state.reactivate_bonuses();
        log::info!("Lap {} complete, score {}", state.laps, state.vehicle.score);
        state.events.push(SimEvent::LapCompleted {
            lap: state.laps,
            score: state.vehicle.score,
        });
    }
}

fn update_wheels(vehicle: &mut Vehicle, dt: f32, tuning: &crate::Tuning) {
    let forward = heading_vector(vehicle.heading);
    vehicle.wheel_spin += spin_delta(vehicle.velocity, forward, vehicle.speed, dt, tuning.wheel_radius);
    vehicle.wheels = WheelSet::compute(vehicle.steer, vehicle.wheel_spin, tuning.camber);
}

/// Points for holding a slide through corners
fn score_cornering(vehicle: &mut Vehicle, dt: f32, tuning: &crate::Tuning) {
    let steer = vehicle.steer.abs();
    if steer > tuning.cornering_threshold {
        let points = steer * tuning.cornering_rate * vehicle.speed * dt * vehicle.multiplier;
        vehicle.add_points(points);
    }
}
