//! Stage progression and spawn placement

use glam::Vec2;
use rand::Rng;

use crate::tuning::Tuning;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];
}

/// Stage number for the given play time: one stage per `stage_duration`,
/// capped at the final stage
pub fn stage_for(elapsed: f64, tuning: &Tuning) -> u32 {
    let completed = (elapsed / tuning.stage_duration as f64).floor().max(0.0) as u32;
    completed.saturating_add(1).min(tuning.final_stage())
}

/// Point on `edge`, `t ∈ [0, 1)` along it, pushed `margin` outside the screen
pub fn edge_point(edge: Edge, t: f32, width: f32, height: f32, margin: f32) -> Vec2 {
    match edge {
        Edge::Left => Vec2::new(-margin, t * height),
        Edge::Top => Vec2::new(t * width, -margin),
        Edge::Right => Vec2::new(width + margin, t * height),
        Edge::Bottom => Vec2::new(t * width, height + margin),
    }
}

/// Uniform edge, then uniform position along it
pub fn random_spawn_point(rng: &mut impl Rng, tuning: &Tuning) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let t: f32 = rng.random();
    edge_point(
        edge,
        t,
        tuning.screen_width,
        tuning.screen_height,
        tuning.spawn_margin,
    )
}
