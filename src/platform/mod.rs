//! Platform abstraction layer
//!
//! The simulation never talks to a window, gamepad or GPU directly. Hosts
//! implement these seams:
//! - `InputSource`: polled once per frame for a `TickInput`
//! - `RenderSink`: receives one `SpriteDraw` per visible entity
//!
//! `FrameStepper` converts variable frame times into fixed simulation ticks.

use glam::Vec2;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::format_elapsed;
use crate::sim::{GameState, Outcome, TickInput, tick};

/// Polled input device (keyboard, gamepad, script)
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Which sprite sheet an entity is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    /// Column in the monster sheet, chosen by stage
    Enemy(u32),
    Bolt,
}

/// One draw call for the render sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub kind: SpriteKind,
    /// Center position
    pub pos: Vec2,
    pub rotation: f32,
    /// Flip horizontally
    pub mirrored: bool,
}

/// Anything that can put sprites on screen
pub trait RenderSink {
    fn draw(&mut self, sprite: &SpriteDraw);
}

/// Emit draws back-to-front: enemies, bolts, then the player on top
pub fn render_frame(state: &GameState, sink: &mut impl RenderSink) {
    for enemy in state.live_enemies() {
        sink.draw(&SpriteDraw {
            kind: SpriteKind::Enemy(enemy.sprite),
            pos: enemy.pos,
            rotation: 0.0,
            mirrored: false,
        });
    }

    for bolt in state.projectiles.iter().filter(|p| p.is_live()) {
        sink.draw(&SpriteDraw {
            kind: SpriteKind::Bolt,
            pos: bolt.pos,
            rotation: bolt.rotation,
            mirrored: false,
        });
    }

    sink.draw(&SpriteDraw {
        kind: SpriteKind::Player,
        pos: state.player.pos,
        rotation: 0.0,
        mirrored: state.player.faces_right(),
    });
}

/// HUD overlay text
pub fn hud_text(state: &GameState) -> String {
    let mut text = format!(
        "Enemies destroyed: {}\nElapsed time: {}\nBolts available: {}\nStage: {}\n",
        state.enemies_destroyed,
        format_elapsed(state.elapsed() as f32),
        state.player.bolts,
        state.stage,
    );
    match state.outcome {
        Some(Outcome::Lost) => text.push_str("Game over! You've just got gobbled!\n"),
        Some(Outcome::Won) => text.push_str("You cleared the final stage!\n"),
        None if state.phase == crate::sim::GamePhase::Paused => text.push_str("Paused\n"),
        None => {}
    }
    text
}

/// Fixed-timestep accumulator between the host's frame clock and `tick`
#[derive(Debug, Clone, Default)]
pub struct FrameStepper {
    accumulator: f32,
    /// One-shot presses waiting for a tick to consume them
    pending_pause: bool,
    pending_restart: bool,
    pending_quit: bool,
}

impl FrameStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed ticks as `frame_dt` covers. One-shot controls
    /// (pause/restart/quit) are held across frames until a tick runs, then
    /// apply to that first substep only.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(0.1);

        self.pending_pause |= input.pause;
        self.pending_restart |= input.restart;
        self.pending_quit |= input.quit;

        let mut input = input.clone();
        input.pause = self.pending_pause;
        input.restart = self.pending_restart;
        input.quit = self.pending_quit;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.pause = false;
            input.restart = false;
            input.quit = false;
            self.pending_pause = false;
            self.pending_restart = false;
            self.pending_quit = false;
        }
        substeps
    }
}
