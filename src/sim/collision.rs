//! Projectile/enemy hit detection and bolt pickup
//!
//! Scans run newest-to-oldest over both collections. Matches are tombstoned
//! rather than removed, so indices stay valid for the whole scan and the
//! owner compacts afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, Player, Projectile};
use super::vector::circle_overlap;

/// Shape used for projectile vs. enemy tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitPolicy {
    /// Distance between centers below the contact radius
    #[default]
    Circle,
    /// Projectile center inside the enemy's square sprite bounds
    Bounds,
}

/// What happens to a projectile that kills an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnHit {
    /// Stop in place and become a pickup
    #[default]
    Land,
    /// Removed along with the enemy
    Consume,
}

/// A resolved projectile/enemy hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: u32,
    pub enemy: u32,
    /// Enemy position at the time of the hit
    pub point: Vec2,
}

/// Projectile vs. enemy test
pub fn hit_test(policy: HitPolicy, projectile: Vec2, enemy: &Enemy, contact_radius: f32) -> bool {
    match policy {
        HitPolicy::Circle => circle_overlap(projectile, enemy.pos, contact_radius),
        HitPolicy::Bounds => {
            let half = enemy.size / 2.0;
            let d = (projectile - enemy.pos).abs();
            d.x < half && d.y < half
        }
    }
}

/// Landed projectile vs. player test
#[inline]
pub fn pickup_test(projectile: Vec2, player: Vec2, pickup_radius: f32) -> bool {
    circle_overlap(projectile, player, pickup_radius)
}

/// Resolve hits between in-flight projectiles and live enemies
///
/// Each projectile takes out at most one enemy per call: the most
/// recently spawned one it overlaps.
pub fn resolve_hits(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
    policy: HitPolicy,
    on_hit: OnHit,
    contact_radius: f32,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for projectile in projectiles.iter_mut().rev() {
        if !projectile.active || projectile.destroyed {
            continue;
        }
        let pos = projectile.pos;

        let target = enemies
            .iter_mut()
            .rev()
            .filter(|e| e.is_live())
            .find(|e| hit_test(policy, pos, e, contact_radius));

        if let Some(enemy) = target {
            enemy.destroyed = true;
            match on_hit {
                OnHit::Land => projectile.land(),
                OnHit::Consume => projectile.destroyed = true,
            }
            hits.push(Hit {
                projectile: projectile.id,
                enemy: enemy.id,
                point: enemy.pos,
            });
        }
    }

    hits
}

/// Collect landed projectiles the player is standing on
///
/// Returns the ids of the picked-up projectiles, which are tombstoned.
pub fn resolve_pickups(
    projectiles: &mut [Projectile],
    player: &Player,
    pickup_radius: f32,
) -> Vec<u32> {
    projectiles
        .iter_mut()
        .rev()
        .filter(|p| !p.active && !p.destroyed)
        .filter(|p| pickup_test(p.pos, player.pos, pickup_radius))
        .map(|p| {
            p.destroyed = true;
            p.id
        })
        .collect()
}
