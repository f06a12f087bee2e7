//! Driving simulation module
//!
//! All gameplay logic lives here. The step is a total function of
//! (previous state, frame delta, input levels):
//! - No rendering, windowing or platform dependencies
//! - Stable iteration order (obstacle and bonus lists keep insertion order)
//! - Collisions reset the run instead of returning errors

pub mod bezier;
pub mod collision;
pub mod course;
pub mod dynamics;
pub mod geometry;
pub mod state;
pub mod steering;
pub mod tick;
pub mod wheels;

pub use bezier::CubicBezier;
pub use collision::{
    box_intersects_any, box_intersects_cylinder, box_intersects_plane_through_origin,
    box_intersects_sphere, point_inside_box,
};
pub use course::{Course, ObstacleKind, ObstacleSet};
pub use geometry::{Aabb, box_projection_extent, closest_point_on_box, vehicle_aabb};
pub use state::{BonusPickup, DrivePhase, FinishGate, SimEvent, SimState, Vehicle};
pub use steering::SteerInput;
pub use tick::{DriveInput, crash_reset, reset, step};
pub use wheels::WheelSet;
