//! Shoot the Ghosts - top-down arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (homing, projectiles, collisions, round state)
//! - `platform`: Input/render seams for the hosting run-loop
//! - `tuning`: Data-driven game balance
//! - `error`: Config loading errors

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{StageProfile, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 ticks per second)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Edge of one square sprite-sheet cell. Contact radii derive from it.
    pub const SPRITE_SIZE: f32 = 32.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 1.0;
    pub const ROTATION_SPEED: f32 = 0.03; // radians per tick
    pub const INITIAL_BOLT_AMOUNT: u32 = 10;
    /// Seconds of play between two resupplied bolts
    pub const RESUPPLY_INTERVAL: f32 = 0.5;
    /// Minimum seconds between two shots
    pub const FIRE_DEBOUNCE: f32 = 0.1;

    /// Projectile speed (pixels per tick)
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Enemy speeds (pixels per tick / easing floor)
    pub const MAX_ENEMY_SPEED: f32 = 2.0;
    pub const MIN_ENEMY_SPEED: f32 = 0.2;

    /// Seconds between enemy spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Seconds of unpaused play per stage
    pub const STAGE_DURATION: f32 = 30.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_rotation(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Format seconds of play as the HUD clock, e.g. `0h 1m 5s`
pub fn format_elapsed(seconds: f32) -> String {
    let total = seconds.max(0.0).round() as u64;
    let secs = total % 60;
    let minutes = total / 60;
    let hours = minutes / 60;
    format!("{}h {}m {}s", hours % 24, minutes % 60, secs)
}
