//! Lane Runner entry point
//!
//! Native builds run a headless demo: the autopilot plays for a fixed
//! number of frames, restarting after each game over, with the HUD going
//! to the log and the high score kept in a JSON file.
//!
//! Usage: `lane-runner [seed] [frames]`
//! - `LANE_RUNNER_DATA`: directory for saved files (default: current dir)
//! - `LANE_RUNNER_TUNING`: optional JSON tuning file

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::PathBuf;
    use std::{env, fs};

    use lane_runner::audio::{AudioManager, LogAudio};
    use lane_runner::game::{Collaborators, Game};
    use lane_runner::highscores::StoredHighScore;
    use lane_runner::persistence::FileStore;
    use lane_runner::platform::Intent;
    use lane_runner::renderer::LogRenderer;
    use lane_runner::{Settings, Tuning};

    /// Default demo length: one minute of play
    const DEFAULT_FRAMES: u64 = 60 * 60;
    /// HUD log interval
    const HUD_EVERY_FRAMES: u64 = 120;
    /// Frames spent on the game over screen before the demo restarts
    const GAME_OVER_HOLD_FRAMES: u64 = 90;

    fn load_tuning() -> Result<Tuning, Box<dyn Error>> {
        match env::var_os("LANE_RUNNER_TUNING") {
            Some(path) => {
                let json = fs::read_to_string(&path)?;
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning from {}", PathBuf::from(path).display());
                Ok(tuning)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => rand::random(),
        };
        let frames = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => DEFAULT_FRAMES,
        };

        let data_dir = env::var_os("LANE_RUNNER_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let store = FileStore::new(data_dir);
        log::info!("Saving to {}", store.dir().display());
        let settings = Settings::load(&store);

        let mut audio = AudioManager::new(LogAudio);
        audio.apply_settings(&settings);

        let collaborators = Collaborators {
            audio: Box::new(audio),
            high_scores: Box::new(StoredHighScore::new(store)),
            renderer: Box::new(LogRenderer::new(HUD_EVERY_FRAMES).with_settings(&settings)),
        };

        let mut game = Game::new(load_tuning()?, seed, collaborators)?;
        log::info!("Lane Runner (headless) seed {} for {} frames", seed, frames);

        game.set_autopilot(true);
        game.handle(Intent::Restart);

        let mut runs = 1u32;
        let mut game_over_frames = 0u64;
        for _ in 0..frames {
            game.frame();

            if game.state().is_game_over() {
                game_over_frames += 1;
                if game_over_frames >= GAME_OVER_HOLD_FRAMES {
                    game.handle(Intent::Restart);
                    game_over_frames = 0;
                    runs += 1;
                }
            }
        }

        let state = game.state();
        log::info!(
            "Demo finished after {} run(s): last score {}, best {}",
            runs,
            state.score,
            state.high_score
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Game` from their own frame callback
}
