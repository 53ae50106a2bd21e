//! Enemy homing movement
//!
//! Enemies walk straight at their target each tick. Speed is either flat or
//! eased by remaining distance so that enemies slow down as they close in,
//! with a creep floor that keeps them from stalling before contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::heading;

/// How an enemy's per-tick speed is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedModel {
    /// Constant `speed` every tick
    #[default]
    Flat,
    /// `speed * (distance / max_distance + min_speed)`
    Eased,
}

/// What enemies home toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetMode {
    /// The player's current center; contact ends the round
    #[default]
    Player,
    /// Fixed screen center; contact only parks the enemy
    ScreenCenter,
}

/// Movement parameters for one homing step
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    pub speed: f32,
    pub model: SpeedModel,
    /// Easing floor (only used by `SpeedModel::Eased`)
    pub min_speed: f32,
    /// Normalizing distance for easing, usually target to farthest corner
    pub max_distance: f32,
}

impl Motion {
    pub fn flat(speed: f32) -> Self {
        Self {
            speed,
            model: SpeedModel::Flat,
            min_speed: 0.0,
            max_distance: 1.0,
        }
    }

    /// Speed for the given remaining distance
    pub fn speed_at(&self, distance: f32) -> f32 {
        match self.model {
            SpeedModel::Flat => self.speed,
            SpeedModel::Eased => {
                // Corner bias is part of the game feel: enemies from the far
                // corners arrive faster than ones spawned mid-edge.
                let max_distance = self.max_distance.max(f32::EPSILON);
                self.speed * (distance / max_distance + self.min_speed)
            }
        }
    }
}

/// Outcome of a single homing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingStep {
    /// Within reach of the target; no movement happened
    Contact,
    Moved,
}

/// Advance `pos` one tick toward `target`
///
/// Contact is signalled when the distance is at most `reach` (or zero),
/// in which case `pos` is left untouched. A step never carries the enemy
/// past the target.
pub fn home_toward(pos: &mut Vec2, target: Vec2, reach: f32, motion: &Motion) -> HomingStep {
    let h = heading(*pos, target);
    let Some(direction) = h.direction else {
        return HomingStep::Contact;
    };
    if h.distance <= reach {
        return HomingStep::Contact;
    }

    let step = motion.speed_at(h.distance).min(h.distance);
    *pos += direction * step;
    HomingStep::Moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flat_scenario_reaches_contact_after_46_ticks() {
        let mut pos = Vec2::ZERO;
        let target = Vec2::new(100.0, 0.0);
        let motion = Motion::flat(2.0);

        for _ in 0..46 {
            assert_eq!(home_toward(&mut pos, target, 8.0, &motion), HomingStep::Moved);
        }
        assert!((pos - Vec2::new(92.0, 0.0)).length() < 1e-4);
        assert!((pos.distance(target) - 8.0).abs() < 1e-4);

        assert_eq!(home_toward(&mut pos, target, 8.0, &motion), HomingStep::Contact);
        assert!((pos - Vec2::new(92.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_distance_is_contact_without_movement() {
        let mut pos = Vec2::new(50.0, 50.0);
        let motion = Motion::flat(2.0);
        let target = pos;
        assert_eq!(home_toward(&mut pos, target, 0.0, &motion), HomingStep::Contact);
        assert_eq!(pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_step_does_not_overshoot() {
        let mut pos = Vec2::new(99.0, 0.0);
        let motion = Motion::flat(5.0);
        assert_eq!(
            home_toward(&mut pos, Vec2::new(100.0, 0.0), 0.0, &motion),
            HomingStep::Moved
        );
        assert_eq!(pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_eased_speed_slows_near_target() {
        let motion = Motion {
            speed: 2.0,
            model: SpeedModel::Eased,
            min_speed: 0.2,
            max_distance: 400.0,
        };
        assert!((motion.speed_at(400.0) - 2.4).abs() < 1e-5);
        assert!((motion.speed_at(0.0) - 0.4).abs() < 1e-5);
        assert!(motion.speed_at(100.0) < motion.speed_at(300.0));
    }

    proptest! {
        #[test]
        fn homing_converges_within_bound(
            angle in 0.0f32..std::f32::consts::TAU,
            d in 20.0f32..600.0,
            eased in any::<bool>(),
        ) {
            let target = Vec2::new(320.0, 240.0);
            let mut pos = target + Vec2::from_angle(angle) * d;
            let reach = 16.0;
            let motion = Motion {
                speed: 2.0,
                model: if eased { SpeedModel::Eased } else { SpeedModel::Flat },
                min_speed: 0.2,
                max_distance: 800.0,
            };
            let min_effective = if eased { 2.0 * 0.2 } else { 2.0 };
            let bound = (d / min_effective).ceil() as u32 + 1;

            let mut last = pos.distance(target);
            let mut ticks = 0;
            while home_toward(&mut pos, target, reach, &motion) == HomingStep::Moved {
                let now = pos.distance(target);
                prop_assert!(now < last);
                last = now;
                ticks += 1;
                prop_assert!(ticks <= bound);
            }
            prop_assert!(last <= reach);
        }
    }
}
