//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order, scanned newest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod homing;
pub mod stage;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Hit, HitPolicy, OnHit, hit_test, pickup_test, resolve_hits, resolve_pickups};
pub use homing::{HomingStep, Motion, SpeedModel, TargetMode, home_toward};
pub use stage::{Edge, random_spawn_point, stage_for};
pub use state::{Enemy, GameEvent, GamePhase, GameState, Outcome, Player, Projectile, RoundClock};
pub use tick::{TickInput, tick};
pub use vector::{Heading, circle_overlap, corner_distance, heading};
