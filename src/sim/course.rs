//! Static course layout
//!
//! Obstacle tables, bonus anchors and the finish line. Built once and never
//! mutated during a run.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::first_hit;
use super::geometry::Aabb;
use crate::consts::*;

/// Which obstacle set the vehicle ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Outdoor,
}

/// A set of upright obstacles sharing one radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    pub radius: f32,
    pub centers: Vec<Vec3>,
}

impl ObstacleSet {
    pub fn new(radius: f32, centers: Vec<Vec3>) -> Self {
        Self { radius, centers }
    }

    /// Index of the first obstacle the box touches
    pub fn first_hit(&self, aabb: &Aabb) -> Option<usize> {
        first_hit(aabb.min, aabb.max, &self.centers, self.radius)
    }
}

/// Immutable description of the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub trees: ObstacleSet,
    pub outdoors: ObstacleSet,
    /// Starting anchor of each bonus loop
    pub bonus_anchors: [Vec3; BONUS_SLOTS],
    pub bonus_radius: f32,
    pub finish_line: Aabb,
    pub spawn: Vec3,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            trees: ObstacleSet::new(
                TREE_RADIUS,
                vec![
                    Vec3::new(6.0, -1.0, -8.0),
                    Vec3::new(-6.0, -1.0, -8.0),
                    Vec3::new(78.0, -1.0, -74.0),
                    Vec3::new(96.0, -1.0, -74.0),
                    Vec3::new(17.0, -1.0, -70.0),
                    Vec3::new(41.0, -1.0, -42.0),
                    Vec3::new(47.0, -1.0, -4.0),
                    Vec3::new(39.0, -1.0, 31.0),
                    Vec3::new(10.0, -1.0, 35.0),
                ],
            ),
            outdoors: ObstacleSet::new(
                OUTDOOR_RADIUS,
                vec![
                    Vec3::new(6.0, 0.0, -30.0),
                    Vec3::new(-6.0, 0.0, -30.0),
                    Vec3::new(31.68, 0.0, -100.0),
                    Vec3::new(28.32, 0.0, -100.0),
                    Vec3::new(22.0, 0.0, -42.32),
                    Vec3::new(22.0, 0.0, -45.68),
                    Vec3::new(-1.43, 0.0, 53.57),
                    Vec3::new(1.43, 0.0, 56.43),
                ],
            ),
            // One bonus per corner of the circuit
            bonus_anchors: [
                Vec3::new(16.0, -0.9, -89.0),
                Vec3::new(90.0, -0.9, -74.0),
                Vec3::new(27.0, -0.9, -44.0),
                Vec3::new(63.0, -0.9, -4.0),
                Vec3::new(10.0, -0.9, 53.0),
            ],
            bonus_radius: BONUS_RADIUS,
            finish_line: Aabb::new(Vec3::new(-5.24, -0.95, 2.68), Vec3::new(5.24, -0.95, 3.32)),
            spawn: SPAWN_POSITION,
        }
    }
}

impl Course {
    /// First obstacle (trees before outdoor posts) the box touches
    pub fn obstacle_hit(&self, aabb: &Aabb) -> Option<(ObstacleKind, usize)> {
        if let Some(i) = self.trees.first_hit(aabb) {
            return Some((ObstacleKind::Tree, i));
        }
        self.outdoors
            .first_hit(aabb)
            .map(|i| (ObstacleKind::Outdoor, i))
    }

    /// Parse a course layout from JSON
    pub fn from_json(json: &str) -> Result<Self, crate::TuningError> {
        Ok(serde_json::from_str(json)?)
    }
}
