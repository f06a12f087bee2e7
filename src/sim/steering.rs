//! Front wheel steering angle
//!
//! Independent of the heading: keys drive the angle toward the lock at
//! `steer_rate`; with no key it returns to center at `steer_return_rate`
//! and stops exactly at zero.

use crate::Tuning;

/// Steering keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteerInput {
    pub left: bool,
    pub right: bool,
}

/// Next steering angle. Left wins when both keys are held.
pub fn update_steer(steer: f32, input: SteerInput, dt: f32, tuning: &Tuning) -> f32 {
    let max = tuning.max_steer;
    if input.left {
        (steer + tuning.steer_rate * dt).min(max)
    } else if input.right {
        (steer - tuning.steer_rate * dt).max(-max)
    } else {
        return_to_center(steer, tuning.steer_return_rate * dt)
    }
}

/// Move toward zero by at most `step`, never crossing it
fn return_to_center(steer: f32, step: f32) -> f32 {
    if steer > 0.0 {
        (steer - step).max(0.0)
    } else if steer < 0.0 {
        (steer + step).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEFT: SteerInput = SteerInput { left: true, right: false };
    const RIGHT: SteerInput = SteerInput { left: false, right: true };
    const NONE: SteerInput = SteerInput { left: false, right: false };

    #[test]
    fn test_turns_toward_lock() {
        let tuning = Tuning::default();
        let steer = update_steer(0.0, LEFT, 0.1, &tuning);
        assert!((steer - tuning.steer_rate * 0.1).abs() < 1e-6);

        let steer = update_steer(0.0, RIGHT, 10.0, &tuning);
        assert_eq!(steer, -tuning.max_steer);
    }

    #[test]
    fn test_left_wins_over_right() {
        let tuning = Tuning::default();
        let both = SteerInput { left: true, right: true };
        assert!(update_steer(0.0, both, 0.1, &tuning) > 0.0);
    }

    #[test]
    fn test_returns_exactly_to_zero() {
        let tuning = Tuning::default();
        let mut steer = tuning.max_steer;
        let mut frames = 0;
        while steer != 0.0 {
            steer = update_steer(steer, NONE, 1.0 / 60.0, &tuning);
            assert!(steer >= 0.0, "return overshot past center");
            frames += 1;
            assert!(frames < 1000);
        }

        let steer = update_steer(-0.05, NONE, 1.0, &tuning);
        assert_eq!(steer, 0.0);
    }

    #[test]
    fn test_return_is_slower_than_turn() {
        let tuning = Tuning::default();
        let turned = update_steer(0.0, LEFT, 0.05, &tuning);
        let returned = update_steer(turned, NONE, 0.05, &tuning);
        assert!(returned > 0.0);
    }

    proptest! {
        #[test]
        fn prop_steer_stays_within_lock(
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.5), 1..200)
        ) {
            let tuning = Tuning::default();
            let mut steer = 0.0;
            for (left, right, dt) in inputs {
                steer = update_steer(steer, SteerInput { left, right }, dt, &tuning);
                prop_assert!(steer.abs() <= tuning.max_steer);
            }
        }

        #[test]
        fn prop_release_never_flips_sign(start in -0.7f32..0.7, dt in 0.0f32..2.0) {
            let tuning = Tuning::default();
            let next = update_steer(start, NONE, dt, &tuning);
            prop_assert!(next * start >= 0.0);
            prop_assert!(next.abs() <= start.abs());
        }
    }
}
