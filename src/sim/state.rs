//! Round state and core simulation types
//!
//! Everything a round needs between ticks lives in `GameState`; nothing is
//! process-global. Entities carry stable ids and are removed by tombstoning
//! (`destroyed`) followed by a compaction pass at the end of each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::homing::{Motion, SpeedModel};
use crate::consts::SPRITE_SIZE;
use crate::error::ConfigError;
use crate::tuning::{StageProfile, Tuning};
use crate::wrap_rotation;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused,
    /// Terminal until restart or quit; see `GameState::outcome`
    GameOver,
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Final stage cleared
    Won,
    /// An enemy reached the player
    Lost,
}

/// Things that happened during the last tick, for audio/HUD/logging hosts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { projectile: u32 },
    EnemySpawned { enemy: u32, pos: Vec2 },
    EnemyDestroyed { enemy: u32, projectile: u32, pos: Vec2 },
    EnemyReached { enemy: u32 },
    BoltPickedUp { projectile: u32 },
    StageAdvanced { stage: u32 },
    Paused,
    Resumed,
    RoundOver(Outcome),
    Restarted,
    Quit,
}

/// An enemy homing toward its target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Contact distance
    pub reach: f32,
    pub speed: f32,
    pub speed_model: SpeedModel,
    /// Sprite-sheet column, render only
    pub sprite: u32,
    /// Square visual extent (bounds hit policy)
    pub size: f32,
    /// Parked at a fixed target (screen-center mode)
    #[serde(default)]
    pub reached: bool,
    #[serde(default)]
    pub destroyed: bool,
}

impl Enemy {
    /// Spawn an enemy using the given stage profile
    pub fn new(id: u32, pos: Vec2, profile: &StageProfile) -> Self {
        Self {
            id,
            pos,
            reach: profile.reach,
            speed: profile.speed,
            speed_model: profile.speed_model,
            sprite: profile.sprite,
            size: SPRITE_SIZE,
            reached: false,
            destroyed: false,
        }
    }

    pub fn motion(&self, min_speed: f32, max_distance: f32) -> Motion {
        Motion {
            speed: self.speed,
            model: self.speed_model,
            min_speed,
            max_distance,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.destroyed
    }
}

/// A bolt: in flight while `active`, a pickup once landed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing, render only
    pub rotation: f32,
    pub active: bool,
    #[serde(default)]
    pub destroyed: bool,
}

impl Projectile {
    /// Launch a projectile from `origin` along `rotation`
    pub fn fired(id: u32, origin: Vec2, rotation: f32, speed: f32) -> Self {
        Self {
            id,
            pos: origin,
            vel: Vec2::from_angle(rotation) * speed,
            rotation,
            active: true,
            destroyed: false,
        }
    }

    /// Integrate one tick of motion. Landed projectiles have zero velocity.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Stop in place and become a pickup
    pub fn land(&mut self) {
        self.vel = Vec2::ZERO;
        self.active = false;
    }

    /// Inside the closed `[0, width] × [0, height]` play field
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        (0.0..=width).contains(&self.pos.x) && (0.0..=height).contains(&self.pos.y)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.destroyed
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Aim angle in [0, 2π)
    pub rotation: f32,
    pub bolts: u32,
    /// Play time of the last resupply
    pub load_time: f64,
    /// Play time of the last shot (fire debounce)
    pub shot_time: Option<f64>,
    /// Fire was held on the previous tick
    pub bolt_shot_before: bool,
}

impl Player {
    pub fn new(pos: Vec2, bolts: u32) -> Self {
        Self {
            pos,
            rotation: 0.0,
            bolts,
            load_time: 0.0,
            shot_time: None,
            bolt_shot_before: false,
        }
    }

    /// Turn by `delta` radians, keeping rotation in [0, 2π)
    pub fn turn(&mut self, delta: f32) {
        self.rotation = wrap_rotation(self.rotation + delta);
    }

    /// Add one bolt unless already at `max`. Returns whether it was added.
    pub fn add_bolt(&mut self, max: u32) -> bool {
        if self.bolts < max {
            self.bolts += 1;
            true
        } else {
            false
        }
    }

    /// Spend one bolt. Refused at zero.
    pub fn take_bolt(&mut self) -> bool {
        if self.bolts > 0 {
            self.bolts -= 1;
            true
        } else {
            false
        }
    }

    /// The character art faces left; mirror it when aiming right
    pub fn faces_right(&self) -> bool {
        use std::f32::consts::PI;
        self.rotation < PI * 0.5 || self.rotation > PI * 1.5
    }
}

/// Round timekeeping
///
/// `play_time` only advances while running, so pausing never moves stage
/// progression, spawn/resupply timers or the HUD clock. Wall time and the
/// accumulated pause total are kept for hosts that display both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundClock {
    pub wall_time: f64,
    pub play_time: f64,
    pub pause_started: Option<f64>,
    pub paused_total: f64,
}

impl RoundClock {
    pub fn tick_wall(&mut self, dt: f32) {
        self.wall_time += dt as f64;
    }

    pub fn tick_play(&mut self, dt: f32) {
        self.play_time += dt as f64;
    }

    pub fn pause(&mut self) {
        self.pause_started = Some(self.wall_time);
    }

    pub fn resume(&mut self) {
        if let Some(start) = self.pause_started.take() {
            self.paused_total += self.wall_time - start;
        }
    }

    /// Seconds of unpaused play
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.play_time
    }
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Set once the round is over
    pub outcome: Option<Outcome>,
    /// Current stage (1-based, only ever increases within a round)
    pub stage: u32,
    /// Play time of the last spawn
    pub spawn_time: f64,
    pub enemies_destroyed: u32,
    pub clock: RoundClock,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Active projectiles (fire order)
    pub projectiles: Vec<Projectile>,
    /// Host should exit
    pub quit_requested: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new round with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// Create a new round after validating `tuning`
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let player = Self::fresh_player(&tuning);
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            outcome: None,
            stage: 1,
            spawn_time: 0.0,
            enemies_destroyed: 0,
            clock: RoundClock::default(),
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            quit_requested: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    fn fresh_player(tuning: &Tuning) -> Player {
        let center = Vec2::new(tuning.screen_width, tuning.screen_height) / 2.0;
        Player::new(center, tuning.initial_bolts)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restore round-start values. Ids and the RNG keep counting so a
    /// restarted round never repeats the previous one's handles or spawns.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.outcome = None;
        self.stage = 1;
        self.spawn_time = 0.0;
        self.enemies_destroyed = 0;
        self.clock = RoundClock::default();
        self.time_ticks = 0;
        self.player = Self::fresh_player(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.quit_requested = false;
    }

    /// Seconds of unpaused play this round
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Profile of the current stage
    pub fn stage_profile(&self) -> &StageProfile {
        self.tuning.stage_profile(self.stage)
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_live())
    }

    /// Point the enemies home toward
    pub fn enemy_target(&self) -> Vec2 {
        match self.tuning.target {
            super::TargetMode::Player => self.player.pos,
            super::TargetMode::ScreenCenter => {
                Vec2::new(self.tuning.screen_width, self.tuning.screen_height) / 2.0
            }
        }
    }

    /// Drop tombstoned entities
    pub fn compact(&mut self) {
        self.enemies.retain(Enemy::is_live);
        self.projectiles.retain(Projectile::is_live);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.stage, 1);
        assert_eq!(state.player.pos, Vec2::new(320.0, 240.0));
        assert_eq!(state.player.bolts, 10);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_with_tuning_rejects_empty_stages() {
        let tuning = Tuning {
            stages: vec![],
            ..Default::default()
        };
        let err = GameState::with_tuning(tuning, 7).unwrap_err();
        assert!(matches!(err, ConfigError::NoStages));
    }

    #[test]
    fn test_tick_survives_stages_cleared_mid_round() {
        let mut state = GameState::new(7);
        state.tuning.stages.clear();
        for _ in 0..120 {
            crate::sim::tick(&mut state, &crate::sim::TickInput::default(), 0.5);
        }
        assert!(!state.stage_profile().spawns);
    }

    #[test]
    fn test_projectile_kinematics_scenario() {
        let mut p = Projectile::fired(1, Vec2::new(320.0, 240.0), 0.0, 10.0);
        for _ in 0..5 {
            p.advance();
        }
        assert_eq!(p.pos, Vec2::new(370.0, 240.0));
        assert!(p.active);
    }

    #[test]
    fn test_landed_projectile_stays_put() {
        let mut p = Projectile::fired(1, Vec2::new(100.0, 100.0), 1.0, 10.0);
        p.land();
        let at = p.pos;
        p.advance();
        assert_eq!(p.pos, at);
        assert!(!p.active);
    }

    #[test]
    fn test_projectile_bounds() {
        let mut p = Projectile::fired(1, Vec2::new(640.0, 0.0), 0.0, 10.0);
        assert!(p.in_bounds(640.0, 480.0));
        p.advance();
        assert!(!p.in_bounds(640.0, 480.0));
    }

    #[test]
    fn test_bolt_clamp() {
        let mut player = Player::new(Vec2::ZERO, 1);
        assert!(player.take_bolt());
        assert!(!player.take_bolt());
        assert_eq!(player.bolts, 0);
        for _ in 0..50 {
            player.add_bolt(10);
        }
        assert_eq!(player.bolts, 10);
    }

    #[test]
    fn test_player_mirroring() {
        let mut player = Player::new(Vec2::ZERO, 0);
        assert!(player.faces_right());
        player.turn(std::f32::consts::PI);
        assert!(!player.faces_right());
        player.turn(-std::f32::consts::PI - 0.1);
        assert!(player.faces_right());
        assert!(player.rotation >= 0.0);
    }

    #[test]
    fn test_clock_pause_accounting() {
        let mut clock = RoundClock::default();
        clock.tick_wall(1.0);
        clock.tick_play(1.0);
        clock.pause();
        clock.tick_wall(3.0);
        clock.resume();
        assert_eq!(clock.elapsed(), 1.0);
        assert_eq!(clock.paused_total, 3.0);
    }

    #[test]
    fn test_reset_keeps_ids_unique() {
        let mut state = GameState::new(1);
        let first = state.next_entity_id();
        state.reset();
        assert!(state.next_entity_id() > first);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = GameState::new(42);
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::fired(id, Vec2::new(10.0, 20.0), 0.5, 10.0));
        let json = serde_json::to_string(&state).expect("serialize");
        let restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.seed, 42);
        assert_eq!(restored.projectiles.len(), 1);
        assert_eq!(restored.projectiles[0].id, id);
    }
}
