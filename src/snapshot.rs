//! Read-only exports of the simulation state
//!
//! `RenderSnapshot` packs model matrices into GPU-ready instance records and
//! `Telemetry` carries the HUD readouts. Neither can mutate the simulation.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::sim::SimState;

/// One model matrix, column-major, ready for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ModelInstance {
    pub model: [[f32; 4]; 4],
}

impl ModelInstance {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Translation column
    pub fn position(&self) -> Vec3 {
        let [x, y, z, _] = self.model[3];
        Vec3::new(x, y, z)
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub body: ModelInstance,
    /// World-space wheel matrices: front-left, front-right, rear-left, rear-right
    pub wheels: [ModelInstance; 4],
    /// Active bonuses only; collected ones are not drawn
    pub bonuses: Vec<ModelInstance>,
    pub finish_line_min: Vec3,
    pub finish_line_max: Vec3,
}

impl RenderSnapshot {
    pub fn capture(state: &SimState) -> Self {
        let body = state.vehicle.model_matrix();
        let wheels = state
            .vehicle
            .wheels
            .as_array()
            .map(|wheel| ModelInstance::new(body * wheel));
        let bonuses = state
            .bonuses
            .iter()
            .filter(|b| b.active)
            .map(|b| ModelInstance::new(Mat4::from_translation(b.position)))
            .collect();

        Self {
            body: ModelInstance::new(body),
            wheels,
            bonuses,
            finish_line_min: state.course.finish_line.min,
            finish_line_max: state.course.finish_line.max,
        }
    }

    /// Body, wheels, then bonuses, in draw order
    pub fn instances(&self) -> Vec<ModelInstance> {
        let mut out = Vec::with_capacity(5 + self.bonuses.len());
        out.push(self.body);
        out.extend_from_slice(&self.wheels);
        out.extend_from_slice(&self.bonuses);
        out
    }

    /// Raw bytes of `instances()` for a vertex/instance buffer upload
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }
}

/// HUD readouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub speed: f32,
    /// Negative while braking against the heading
    pub acceleration: f32,
    pub velocity: Vec3,
    pub acceleration_vec: Vec3,
    pub steer: f32,
    pub heading: f32,
    pub heading_dir: Vec3,
    pub multiplier: f32,
    pub score: u64,
    pub laps: u32,
    pub gate_armed: bool,
}

impl Telemetry {
    pub fn capture(state: &SimState) -> Self {
        let v = &state.vehicle;
        Self {
            speed: v.speed,
            acceleration: v.signed_accel,
            velocity: v.velocity,
            acceleration_vec: v.acceleration,
            steer: v.steer,
            heading: v.heading,
            heading_dir: v.heading_dir,
            multiplier: v.multiplier,
            score: v.score,
            laps: state.laps,
            gate_armed: state.gate.armed,
        }
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Speed: {:.2}", self.speed)?;
        writeln!(f, "Acceleration: {:.2}", self.acceleration)?;
        writeln!(f, "Vec Velocity: {}", fmt_vec(self.velocity))?;
        writeln!(f, "Vec Acceleration: {}", fmt_vec(self.acceleration_vec))?;
        writeln!(f, "Front Wheel Angle: {:.2}", self.steer)?;
        writeln!(f, "Car Rotation Angle: {:.2}", self.heading)?;
        writeln!(f, "Vec Direction: {}", fmt_vec(self.heading_dir))?;
        writeln!(f, "Multiplier: {:.1} x", self.multiplier)?;
        writeln!(f, "Laps: {}{}", self.laps, if self.gate_armed { " (line armed)" } else { "" })?;
        write!(f, "Score: {}", self.score)
    }
}
