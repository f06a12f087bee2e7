//! Simulation state and core types
//!
//! Everything the per-frame step reads or writes lives in `SimState`.
//! The render consumer only ever borrows it immutably.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::bezier::CubicBezier;
use super::course::{Course, ObstacleKind};
use super::geometry::Aabb;
use super::wheels::WheelSet;
use crate::Tuning;
use crate::heading_vector;

/// Where the vehicle is in the crash/reset cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrivePhase {
    /// Normal driving
    #[default]
    Driving,
    /// Hit an obstacle this frame and was put back on the spawn point
    Crashed,
}

/// Things that happened during the last step, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Vehicle hit an obstacle and was reset
    Crashed { kind: ObstacleKind, index: usize },
    /// A bonus was picked up; `multiplier` is the new value
    BonusCollected { slot: usize, multiplier: f32 },
    /// Finish line cooldown elapsed
    GateArmed,
    /// Armed finish line crossed
    LapCompleted { lap: u32, score: u64 },
    /// Host requested a manual reset
    ManualReset,
}

/// The player's vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Yaw angle (radians, 0 faces -Z)
    pub heading: f32,
    /// Unit forward vector for `heading`, as of the last step
    pub heading_dir: Vec3,
    /// Front wheel angle (radians, positive steers left)
    pub steer: f32,
    /// Accumulated wheel spin (radians)
    pub wheel_spin: f32,
    /// |velocity| as of the last step
    pub speed: f32,
    /// |acceleration|, negative when pushing against the heading
    pub signed_accel: f32,
    pub score: u64,
    /// Fractional cornering points not yet added to `score`
    #[serde(default)]
    pub score_carry: f32,
    pub multiplier: f32,
    /// Per-wheel model transforms (render-only)
    #[serde(skip)]
    pub wheels: WheelSet,
}

impl Vehicle {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            heading: 0.0,
            heading_dir: heading_vector(0.0),
            steer: 0.0,
            wheel_spin: 0.0,
            speed: 0.0,
            signed_accel: 0.0,
            score: 0,
            score_carry: 0.0,
            multiplier: 1.0,
            wheels: WheelSet::default(),
        }
    }

    /// Put the vehicle back on the spawn point at rest, clearing the score.
    /// The multiplier is left alone.
    pub fn reset_motion(&mut self, spawn: Vec3) {
        self.position = spawn;
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
        self.heading = 0.0;
        self.heading_dir = heading_vector(0.0);
        self.steer = 0.0;
        self.wheel_spin = 0.0;
        self.speed = 0.0;
        self.signed_accel = 0.0;
        self.score = 0;
        self.score_carry = 0.0;
        self.wheels = WheelSet::default();
    }

    /// World AABB of the hull at the current pose
    #[inline]
    pub fn aabb(&self) -> Aabb {
        super::geometry::vehicle_aabb(self.position, self.heading)
    }

    /// Body model matrix (translation then yaw)
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.heading)
    }

    /// Add points, keeping fractions across frames
    pub fn add_points(&mut self, points: f32) {
        if !(points.is_finite() && points > 0.0) {
            return;
        }
        let total = self.score_carry + points;
        let whole = total.floor();
        self.score += whole as u64;
        self.score_carry = total - whole;
    }
}

/// A collectible moving along a looping Bezier path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusPickup {
    pub anchor: Vec3,
    pub curve: CubicBezier,
    /// Curve parameter in [0, 1]
    pub t: f32,
    /// Curve parameter advance per second
    pub speed: f32,
    pub active: bool,
    pub position: Vec3,
}

impl BonusPickup {
    pub fn new(anchor: Vec3, speed: f32) -> Self {
        Self {
            anchor,
            curve: CubicBezier::bonus_loop(anchor),
            t: 0.0,
            speed,
            active: true,
            position: anchor,
        }
    }

    /// Move along the curve; wraps back to the start instead of reversing.
    /// Inactive bonuses stay frozen.
    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.t += self.speed * dt;
        if self.t > 1.0 {
            self.t = 0.0;
        }
        self.position = self.curve.evaluate(self.t);
    }
}

/// Finish line trigger with a re-arm cooldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishGate {
    pub bounds: Aabb,
    /// Seconds that must pass after a trigger before re-arming
    pub cooldown: f32,
    /// Seconds since the last trigger (or since the run started)
    pub since_trigger: f32,
    pub armed: bool,
}

impl FinishGate {
    /// Starts disarmed; the first lap counts only after one cooldown
    pub fn new(bounds: Aabb, cooldown: f32) -> Self {
        Self {
            bounds,
            cooldown,
            since_trigger: 0.0,
            armed: false,
        }
    }

    /// Advance the cooldown clock. Returns true on the frame the gate arms.
    pub fn update(&mut self, dt: f32) -> bool {
        self.since_trigger += dt;
        if !self.armed && self.since_trigger > self.cooldown {
            self.armed = true;
            return true;
        }
        false
    }

    /// Fire if armed and `point` is inside the gate. Disarms and restarts the cooldown.
    pub fn try_trigger(&mut self, point: Vec3) -> bool {
        if self.armed && self.bounds.contains_point(point) {
            self.armed = false;
            self.since_trigger = 0.0;
            true
        } else {
            false
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub tuning: Tuning,
    pub course: Course,
    pub vehicle: Vehicle,
    pub bonuses: Vec<BonusPickup>,
    pub gate: FinishGate,
    pub phase: DrivePhase,
    /// Laps completed since the run started
    pub laps: u32,
    /// Crash count since the run started
    pub crashes: u32,
    /// Simulated seconds
    pub time: f64,
    /// Events from the most recent step (cleared at the start of each step)
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Tuning::default(), Course::default())
    }
}

impl SimState {
    pub fn new(tuning: Tuning, course: Course) -> Self {
        let bonuses = course
            .bonus_anchors
            .iter()
            .map(|&anchor| BonusPickup::new(anchor, tuning.bonus_speed))
            .collect();
        let gate = FinishGate::new(course.finish_line, tuning.gate_cooldown);
        let vehicle = Vehicle::new(course.spawn);

        Self {
            tuning,
            course,
            vehicle,
            bonuses,
            gate,
            phase: DrivePhase::Driving,
            laps: 0,
            crashes: 0,
            time: 0.0,
            events: Vec::new(),
        }
    }

    /// Re-enable every bonus without touching its curve parameter
    pub fn reactivate_bonuses(&mut self) {
        for bonus in &mut self.bonuses {
            bonus.active = true;
        }
    }

    /// Number of bonuses still waiting to be collected
    pub fn active_bonus_count(&self) -> usize {
        self.bonuses.iter().filter(|b| b.active).count()
    }

    /// Take the events produced by the last step
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
