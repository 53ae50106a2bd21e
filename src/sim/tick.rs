//! Fixed timestep simulation tick
//!
//! Round/stage controller: samples one input snapshot and advances the round
//! by one step. Order within a running tick: player, enemies, projectiles,
//! hits, pickups, compaction, stage, win check, spawn.

use glam::Vec2;

use super::collision::{resolve_hits, resolve_pickups};
use super::homing::{HomingStep, TargetMode, home_toward};
use super::stage::{random_spawn_point, stage_for};
use super::state::{Enemy, GameEvent, GamePhase, GameState, Outcome, Projectile};
use super::vector::{corner_distance, heading};
use crate::wrap_rotation;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute aim angle (gamepad right stick)
    pub aim: Option<f32>,
    /// Aim turning in [-1, 1] (arrow keys), ignored when `aim` is set
    pub turn: f32,
    /// Movement per axis in [-1, 1] (WASD / left stick)
    pub movement: Vec2,
    /// Fire control held this tick; shots trigger on the press edge
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round (game over only)
    pub restart: bool,
    /// Leave the game (game over only)
    pub quit: bool,
    /// Attract mode - autopilot aims, fires and collects bolts
    pub idle_mode: bool,
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.clock.tick_wall(dt);

    match state.phase {
        GamePhase::GameOver => {
            if input.quit {
                state.quit_requested = true;
                state.events.push(GameEvent::Quit);
                log::info!("Quit requested");
            } else if input.restart {
                state.reset();
                state.events.push(GameEvent::Restarted);
                log::info!("Round restarted");
            }
            return;
        }
        GamePhase::Paused => {
            if !input.pause {
                return;
            }
            state.clock.resume();
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Resumed);
            log::info!("Resumed after {:.1}s paused in total", state.clock.paused_total);
        }
        GamePhase::Running => {
            if input.pause {
                state.clock.pause();
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused at {:.1}s", state.elapsed());
                return;
            }
        }
    }

    state.clock.tick_play(dt);
    state.time_ticks += 1;
    let elapsed = state.elapsed();

    let autopiloted;
    let input = if input.idle_mode {
        autopiloted = autopilot(state, input);
        &autopiloted
    } else {
        input
    };

    update_player(state, input, elapsed);

    if let Some(enemy) = move_enemies(state) {
        state.events.push(GameEvent::EnemyReached { enemy });
        end_round(state, Outcome::Lost);
        return;
    }

    move_projectiles(state);

    let hits = resolve_hits(
        &mut state.projectiles,
        &mut state.enemies,
        state.tuning.hit_policy,
        state.tuning.on_hit,
        state.tuning.contact_radius,
    );
    for hit in hits {
        state.enemies_destroyed += 1;
        state.events.push(GameEvent::EnemyDestroyed {
            enemy: hit.enemy,
            projectile: hit.projectile,
            pos: hit.point,
        });
        log::debug!(
            "Enemy {} destroyed by bolt {} ({} total)",
            hit.enemy,
            hit.projectile,
            state.enemies_destroyed
        );
    }

    let picked = resolve_pickups(
        &mut state.projectiles,
        &state.player,
        state.tuning.pickup_radius,
    );
    for projectile in picked {
        state.player.add_bolt(state.tuning.max_bolts);
        state.events.push(GameEvent::BoltPickedUp { projectile });
        log::debug!("Bolt {} picked up, {} available", projectile, state.player.bolts);
    }

    state.compact();

    let stage = stage_for(elapsed, &state.tuning);
    if stage > state.stage {
        state.stage = stage;
        state.events.push(GameEvent::StageAdvanced { stage });
        log::info!("Stage {} at {:.1}s", stage, elapsed);
    }

    let spawns = state.stage_profile().spawns;
    if !spawns && state.enemies.is_empty() {
        end_round(state, Outcome::Won);
        return;
    }

    if spawns && elapsed - state.spawn_time >= state.tuning.spawn_interval as f64 {
        spawn_enemy(state);
        state.spawn_time = elapsed;
    }
}

/// Aim, move, fire and resupply
fn update_player(state: &mut GameState, input: &TickInput, elapsed: f64) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    if let Some(angle) = input.aim {
        player.rotation = wrap_rotation(angle);
    } else if input.turn != 0.0 {
        player.turn(input.turn.clamp(-1.0, 1.0) * tuning.rotation_speed);
    }

    let step = input.movement.clamp_length_max(1.0) * tuning.player_speed;
    let field = Vec2::new(tuning.screen_width, tuning.screen_height);
    player.pos = (player.pos + step).clamp(Vec2::ZERO, field);

    let pressed = input.fire;
    let debounced = player
        .shot_time
        .is_none_or(|last| elapsed - last >= tuning.fire_debounce as f64);
    let shoot = pressed && !player.bolt_shot_before && debounced && player.take_bolt();
    player.bolt_shot_before = pressed;

    if elapsed - player.load_time >= tuning.resupply_interval as f64 {
        player.add_bolt(tuning.max_bolts);
        player.load_time = elapsed;
    }

    if shoot {
        state.player.shot_time = Some(elapsed);
        let id = state.next_entity_id();
        let projectile = Projectile::fired(
            id,
            state.player.pos,
            state.player.rotation,
            state.tuning.projectile_speed,
        );
        state.projectiles.push(projectile);
        state.events.push(GameEvent::Fired { projectile: id });
    }
}

/// Home every enemy toward the target. Returns the id of an enemy that
/// caught the player, if any.
fn move_enemies(state: &mut GameState) -> Option<u32> {
    let target = state.enemy_target();
    let tuning = &state.tuning;
    let max_distance = corner_distance(target, tuning.screen_width, tuning.screen_height);
    let mut caught = None;

    for enemy in &mut state.enemies {
        if enemy.reached {
            continue;
        }
        let motion = enemy.motion(tuning.min_enemy_speed, max_distance);
        if home_toward(&mut enemy.pos, target, enemy.reach, &motion) == HomingStep::Contact {
            match tuning.target {
                TargetMode::Player => {
                    caught.get_or_insert(enemy.id);
                }
                TargetMode::ScreenCenter => {
                    enemy.reached = true;
                    state.events.push(GameEvent::EnemyReached { enemy: enemy.id });
                }
            }
        }
    }

    caught
}

/// Integrate projectile motion and cull anything that left the play field
fn move_projectiles(state: &mut GameState) {
    let (width, height) = (state.tuning.screen_width, state.tuning.screen_height);
    for projectile in &mut state.projectiles {
        projectile.advance();
        if !projectile.in_bounds(width, height) {
            projectile.destroyed = true;
        }
    }
}

fn spawn_enemy(state: &mut GameState) {
    let pos = random_spawn_point(&mut state.rng, &state.tuning);
    let id = state.next_entity_id();
    let enemy = Enemy::new(id, pos, state.stage_profile());
    state.enemies.push(enemy);
    state.events.push(GameEvent::EnemySpawned { enemy: id, pos });
    log::debug!("Enemy {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
}

fn end_round(state: &mut GameState, outcome: Outcome) {
    state.phase = GamePhase::GameOver;
    state.outcome = Some(outcome);
    state.events.push(GameEvent::RoundOver(outcome));
    log::info!(
        "Round over ({:?}) at {:.1}s, stage {}, {} enemies destroyed",
        outcome,
        state.elapsed(),
        state.stage,
        state.enemies_destroyed
    );
}

/// Attract-mode driver: shoot the nearest on-screen enemy, wander onto
/// landed bolts while nothing is close
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let player = state.player.pos;
    let field = Vec2::new(state.tuning.screen_width, state.tuning.screen_height);
    let on_screen = |p: Vec2| p.cmpge(Vec2::ZERO).all() && p.cmple(field).all();

    let nearest = state
        .live_enemies()
        .filter(|e| on_screen(e.pos))
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .total_cmp(&b.pos.distance_squared(player))
        });

    let mut threat_close = false;
    if let Some(enemy) = nearest {
        let h = heading(player, enemy.pos);
        if let Some(direction) = h.direction {
            input.aim = Some(direction.to_angle());
            // Alternate press/release so every other tick is a fresh press
            input.fire = !state.player.bolt_shot_before;
        }
        threat_close = h.distance < 150.0;
    }

    if !threat_close {
        let bolt = state
            .projectiles
            .iter()
            .filter(|p| !p.active && p.is_live())
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .total_cmp(&b.pos.distance_squared(player))
            });
        if let Some(direction) = bolt.and_then(|b| heading(player, b.pos).direction) {
            input.movement = direction;
        }
    }

    input
}
