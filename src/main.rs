//! Shoot the Ghosts headless runner
//!
//! Drives the simulation with the attract-mode autopilot and logs each
//! round. Usage: `shoot-the-ghosts [TUNING_JSON] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use shoot_the_ghosts::Tuning;
    use shoot_the_ghosts::consts::SIM_DT;
    use shoot_the_ghosts::platform::{
        FrameStepper, InputSource, RenderSink, SpriteDraw, hud_text, render_frame,
    };
    use shoot_the_ghosts::sim::{GameEvent, GameState, TickInput};

    /// Ten minutes at the fixed tick rate
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const DEFAULT_SEED: u64 = 0x5EED;

    /// Autopilot that restarts a few rounds, then quits
    struct AttractInput {
        restarts_left: u32,
    }

    impl InputSource for AttractInput {
        fn poll(&mut self, state: &GameState) -> TickInput {
            let mut input = TickInput {
                idle_mode: true,
                ..Default::default()
            };
            if state.is_over() {
                if self.restarts_left > 0 {
                    self.restarts_left -= 1;
                    input.restart = true;
                } else {
                    input.quit = true;
                }
            }
            input
        }
    }

    /// Stand-in renderer: counts sprites instead of drawing them
    #[derive(Default)]
    struct DrawCounter {
        sprites: u64,
    }

    impl RenderSink for DrawCounter {
        fn draw(&mut self, _sprite: &SpriteDraw) {
            self.sprites += 1;
        }
    }

    pub fn run() -> ExitCode {
        let mut args = std::env::args().skip(1);

        let tuning = match args.next() {
            Some(path) => match Tuning::load(&path) {
                Ok(tuning) => tuning,
                Err(err) => {
                    log::error!("Cannot use tuning file {}: {}", path, err);
                    return ExitCode::FAILURE;
                }
            },
            None => Tuning::default(),
        };
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED);

        log::info!("Shoot the Ghosts (headless) starting with seed {}", seed);

        let mut state = match GameState::with_tuning(tuning, seed) {
            Ok(state) => state,
            Err(err) => {
                log::error!("Cannot start round: {}", err);
                return ExitCode::FAILURE;
            }
        };
        let mut input = AttractInput { restarts_left: 2 };
        let mut stepper = FrameStepper::new();
        let mut sink = DrawCounter::default();

        for _ in 0..MAX_FRAMES {
            let frame_input = input.poll(&state);
            stepper.advance(&mut state, &frame_input, SIM_DT);

            for event in &state.events {
                match event {
                    GameEvent::StageAdvanced { stage } => println!("-- stage {stage} --"),
                    GameEvent::RoundOver(_) => print!("{}", hud_text(&state)),
                    _ => {}
                }
            }

            render_frame(&state, &mut sink);
            if state.quit_requested {
                break;
            }
        }

        log::info!("Exiting after {} sprite draws", sink.sprites);
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet; the library is the wasm surface
}
