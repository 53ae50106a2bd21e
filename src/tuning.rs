//! Game balance and round configuration
//!
//! Defaults are the classic hardcoded values. A JSON file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{HitPolicy, OnHit, SpeedModel, TargetMode};

/// Enemy profile swapped in when a stage begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageProfile {
    /// Contact distance at which an enemy catches its target
    pub reach: f32,
    /// Flat speed, or the peak of the eased curve (pixels per tick)
    pub speed: f32,
    pub speed_model: SpeedModel,
    /// Sprite-sheet column for the renderer
    pub sprite: u32,
    /// Whether enemies spawn during this stage
    pub spawns: bool,
}

impl StageProfile {
    pub fn new(reach: f32, speed: f32, speed_model: SpeedModel, sprite: u32) -> Self {
        Self {
            reach,
            speed,
            speed_model,
            sprite,
            spawns: true,
        }
    }

    /// Final-stage variant: same enemy, no new spawns
    pub fn closing(mut self) -> Self {
        self.spawns = false;
        self
    }
}

/// Used when a stage list was emptied after validation: chase slowly, never spawn
static FALLBACK_STAGE: StageProfile = StageProfile {
    reach: SPRITE_SIZE / 2.0,
    speed: MAX_ENEMY_SPEED * 0.5,
    speed_model: SpeedModel::Flat,
    sprite: 0,
    spawns: false,
};

fn default_stages() -> Vec<StageProfile> {
    let half = SPRITE_SIZE / 2.0;
    vec![
        StageProfile::new(half, MAX_ENEMY_SPEED * 0.5, SpeedModel::Flat, 0),
        StageProfile::new(half, MAX_ENEMY_SPEED, SpeedModel::Eased, 1),
        StageProfile::new(SPRITE_SIZE * 0.75, MAX_ENEMY_SPEED, SpeedModel::Flat, 2),
        StageProfile::new(SPRITE_SIZE * 0.75, MAX_ENEMY_SPEED, SpeedModel::Flat, 3).closing(),
    ]
}

/// Complete round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// How far outside the screen enemies appear
    pub spawn_margin: f32,

    // === Collision ===
    /// Projectile vs. enemy contact distance
    pub contact_radius: f32,
    /// Landed projectile vs. player pickup distance
    pub pickup_radius: f32,
    pub hit_policy: HitPolicy,
    pub on_hit: OnHit,

    // === Player ===
    pub player_speed: f32,
    pub rotation_speed: f32,
    pub initial_bolts: u32,
    pub max_bolts: u32,
    pub resupply_interval: f32,
    pub fire_debounce: f32,
    pub projectile_speed: f32,

    // === Enemies ===
    pub target: TargetMode,
    /// Creep floor of the eased speed curve
    pub min_enemy_speed: f32,
    pub spawn_interval: f32,

    // === Stages ===
    pub stage_duration: f32,
    pub stages: Vec<StageProfile>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            spawn_margin: SPRITE_SIZE,

            contact_radius: SPRITE_SIZE,
            pickup_radius: SPRITE_SIZE,
            hit_policy: HitPolicy::Circle,
            on_hit: OnHit::Land,

            player_speed: PLAYER_SPEED,
            rotation_speed: ROTATION_SPEED,
            initial_bolts: INITIAL_BOLT_AMOUNT,
            max_bolts: INITIAL_BOLT_AMOUNT,
            resupply_interval: RESUPPLY_INTERVAL,
            fire_debounce: FIRE_DEBOUNCE,
            projectile_speed: PROJECTILE_SPEED,

            target: TargetMode::Player,
            min_enemy_speed: MIN_ENEMY_SPEED,
            spawn_interval: SPAWN_INTERVAL,

            stage_duration: STAGE_DURATION,
            stages: default_stages(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("contact_radius", self.contact_radius),
            ("pickup_radius", self.pickup_radius),
            ("projectile_speed", self.projectile_speed),
            ("resupply_interval", self.resupply_interval),
            ("spawn_interval", self.spawn_interval),
            ("stage_duration", self.stage_duration),
            ("player_speed", self.player_speed),
            ("rotation_speed", self.rotation_speed),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("spawn_margin", self.spawn_margin),
            ("fire_debounce", self.fire_debounce),
            ("min_enemy_speed", self.min_enemy_speed),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for stage in &self.stages {
            if stage.speed.is_nan() || stage.speed <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "stages.speed",
                    value: stage.speed,
                });
            }
            if stage.reach.is_nan() || stage.reach < 0.0 {
                return Err(ConfigError::Negative {
                    field: "stages.reach",
                    value: stage.reach,
                });
            }
        }

        match self.stages.last() {
            None => return Err(ConfigError::NoStages),
            Some(last) if last.spawns && self.stages.len() > 1 => {
                return Err(ConfigError::FinalStageSpawns);
            }
            _ => {}
        }

        if self.initial_bolts > self.max_bolts {
            return Err(ConfigError::InvalidBoltCap {
                initial: self.initial_bolts,
                max: self.max_bolts,
            });
        }

        Ok(())
    }

    /// Number of the last stage (stages are 1-based)
    pub fn final_stage(&self) -> u32 {
        self.stages.len().max(1) as u32
    }

    /// Profile for a 1-based stage number, clamped to the configured range
    pub fn stage_profile(&self, stage: u32) -> &StageProfile {
        let index = (stage.max(1) as usize - 1).min(self.stages.len().saturating_sub(1));
        self.stages.get(index).unwrap_or(&FALLBACK_STAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.final_stage(), 4);
        assert!(!tuning.stage_profile(4).spawns);
        assert!(tuning.stage_profile(1).spawns);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval": 2.5, "hit_policy": "Bounds" }"#)
            .expect("valid json");
        assert_eq!(tuning.spawn_interval, 2.5);
        assert_eq!(tuning.hit_policy, HitPolicy::Bounds);
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
        assert_eq!(tuning.stages.len(), 4);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "spawn_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_enemy_speed_floor() {
        let err = Tuning::from_json(r#"{ "min_enemy_speed": -5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Negative {
                field: "min_enemy_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_movement_and_margin_fields() {
        for (field, value) in [
            ("spawn_margin", -1.0),
            ("fire_debounce", -0.1),
            ("player_speed", 0.0),
            ("rotation_speed", -0.03),
        ] {
            let json = format!(r#"{{ "{field}": {value} }}"#);
            assert!(Tuning::from_json(&json).is_err(), "{field} = {value}");
        }

        let nan = Tuning {
            player_speed: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.stages[0].reach = -4.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Negative {
                field: "stages.reach",
                ..
            })
        ));
    }

    #[test]
    fn test_stage_profile_without_stages_does_not_spawn() {
        let tuning = Tuning {
            stages: vec![],
            ..Default::default()
        };
        assert!(!tuning.stage_profile(1).spawns);
        assert!(!tuning.stage_profile(3).spawns);
    }

    #[test]
    fn test_rejects_empty_stage_list() {
        let err = Tuning::from_json(r#"{ "stages": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoStages));
    }

    #[test]
    fn test_rejects_spawning_final_stage() {
        let mut tuning = Tuning::default();
        tuning.stages.last_mut().unwrap().spawns = true;
        assert!(matches!(tuning.validate(), Err(ConfigError::FinalStageSpawns)));
    }

    #[test]
    fn test_rejects_bolt_cap_below_initial() {
        let tuning = Tuning {
            initial_bolts: 12,
            max_bolts: 10,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidBoltCap { initial: 12, max: 10 })
        ));
    }

    #[test]
    fn test_stage_profile_clamps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.stage_profile(0), tuning.stage_profile(1));
        assert_eq!(tuning.stage_profile(99), tuning.stage_profile(4));
    }
}
