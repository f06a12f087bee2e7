//! Vehicle and scoring tuning
//!
//! Every constant of the driving model lives here so handling can be tweaked
//! from a JSON file without recompiling. Missing fields fall back to the
//! defaults, which reproduce the stock arcade feel.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid tuning JSON
    Parse(serde_json::Error),
    /// A value is outside its usable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Driving model constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Drivetrain ===
    /// Throttle/brake acceleration growth (units/s² per second held)
    pub acceleration_rate: f32,
    /// Coasting deceleration (units/s²)
    pub deceleration_rate: f32,
    /// Top speed (units/s)
    pub max_speed: f32,
    /// Acceleration magnitude cap (units/s²)
    pub max_acceleration: f32,

    // === Drift ===
    /// Fraction of lateral velocity kept each frame (higher = slidier)
    pub drift_factor: f32,
    /// Rate at which the remaining lateral slide bleeds off (1/s)
    pub drift_stability: f32,

    // === Steering ===
    /// Maximum front wheel angle (radians)
    pub max_steer: f32,
    /// Wheel turn rate while a steer key is held (rad/s)
    pub steer_rate: f32,
    /// Wheel return-to-center rate with no steer input (rad/s)
    pub steer_return_rate: f32,

    // === Wheels (cosmetic) ===
    /// Wheel radius used for spin accumulation
    pub wheel_radius: f32,
    /// Negative camber angle (radians)
    pub camber: f32,

    // === Scoring ===
    /// Multiplier gained per bonus pickup
    pub multiplier_step: f32,
    /// Points awarded for crossing the armed finish line
    pub lap_bonus: u64,
    /// Seconds before the finish line re-arms after a lap
    pub gate_cooldown: f32,
    /// Steering angle (radians) above which cornering scores points
    pub cornering_threshold: f32,
    /// Cornering points per radian of steer per unit speed per second
    pub cornering_rate: f32,
    /// Bonus curve progression (curve parameter per second)
    pub bonus_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration_rate: 10.0,
            deceleration_rate: 5.0,
            max_speed: 20.0,
            max_acceleration: 20.0,

            drift_factor: 0.99,
            drift_stability: 0.5,

            max_steer: 40.0_f32.to_radians(),
            steer_rate: 200.0_f32.to_radians(),
            steer_return_rate: 100.0_f32.to_radians(),

            wheel_radius: 0.4,
            camber: 10.0_f32.to_radians(),

            multiplier_step: 0.1,
            lap_bonus: 1000,
            gate_cooldown: 5.0,
            cornering_threshold: 0.3,
            cornering_rate: 50.0,
            bonus_speed: 1.0,
        }
    }
}

/// Steering beyond this makes `tan(steer)` blow up
const MAX_SAFE_STEER: f32 = 80.0 * std::f32::consts::PI / 180.0;

impl Tuning {
    /// Parse tuning from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Save tuning as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TuningError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Tuning saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Check that every value is inside the range the model can integrate
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be zero or positive",
                })
            }
        }

        positive("acceleration_rate", self.acceleration_rate)?;
        positive("deceleration_rate", self.deceleration_rate)?;
        positive("max_speed", self.max_speed)?;
        positive("max_acceleration", self.max_acceleration)?;
        positive("steer_rate", self.steer_rate)?;
        positive("steer_return_rate", self.steer_return_rate)?;
        positive("wheel_radius", self.wheel_radius)?;
        non_negative("drift_stability", self.drift_stability)?;
        non_negative("camber", self.camber)?;
        non_negative("multiplier_step", self.multiplier_step)?;
        non_negative("gate_cooldown", self.gate_cooldown)?;
        non_negative("cornering_threshold", self.cornering_threshold)?;
        non_negative("cornering_rate", self.cornering_rate)?;
        non_negative("bonus_speed", self.bonus_speed)?;

        if !(0.0..=1.0).contains(&self.drift_factor) {
            return Err(TuningError::Invalid {
                field: "drift_factor",
                reason: "must be within [0, 1]",
            });
        }
        if !(self.max_steer > 0.0 && self.max_steer < MAX_SAFE_STEER) {
            return Err(TuningError::Invalid {
                field: "max_steer",
                reason: "must be within (0, 80°)",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 35.0, "lap_bonus": 250 }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.max_speed, 35.0);
        assert_eq!(tuning.lap_bonus, 250);
        assert_eq!(tuning.drift_factor, Tuning::default().drift_factor);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            drift_factor: 0.95,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "max_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_speed", .. }));

        let err = Tuning::from_json(r#"{ "drift_factor": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "drift_factor", .. }));

        // Near-vertical steering would make tan() diverge
        let err = Tuning::from_json(r#"{ "max_steer": 1.55 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_steer", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let tuning = Tuning::load_or_default("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
