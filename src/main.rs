//! Abyss Strike entry point
//!
//! Headless demo driver: runs the simulation at a fixed timestep with a
//! scripted pilot and logs the HUD. There is no renderer in this crate;
//! this binary exists to exercise the core end-to-end and to show how an
//! embedder is expected to drive it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use abyss_strike::consts::*;
use abyss_strike::input::{InputState, Key};
use abyss_strike::sim::{GamePhase, GameState, tick};
use abyss_strike::tuning::Tuning;

/// Fixed-timestep frame driver owning the loop and its shutdown flag
struct Driver {
    state: GameState,
    input: InputState,
    /// Milliseconds of real time not yet consumed by fixed steps
    accumulator: f32,
    /// Cooperative cancellation: set to false for clean shutdown
    running: Arc<AtomicBool>,
}

impl Driver {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            input: InputState::new(),
            accumulator: 0.0,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Handle to request shutdown from another thread or a signal hook
    fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Consume a real-time frame delta (ms), running as many fixed steps
    /// as fit. The clamp keeps a suspended process from feeding the sim a
    /// giant jump that would trip every timer at once.
    fn update(&mut self, frame_ms: f32) {
        self.accumulator += frame_ms.min(MAX_FRAME_MS);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input, SIM_DT_MS);
            for event in self.state.take_events() {
                log::debug!("audio cue: {event:?}");
            }
            self.accumulator -= SIM_DT_MS;
            substeps += 1;
        }
    }

    /// Scripted pilot: chase the nearest enemy's altitude, fire on a
    /// steady cadence. Good enough to exercise every combat path.
    fn drive_inputs(&mut self) {
        let player_center = self.state.player.body.center();
        let target = self
            .state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.body
                    .pos
                    .x
                    .partial_cmp(&b.body.pos.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|enemy| enemy.body.center());

        match target {
            Some(t) if t.y < player_center.y - 20.0 => {
                self.input.key_down(Key::Up);
                self.input.key_up(Key::Down);
            }
            Some(t) if t.y > player_center.y + 20.0 => {
                self.input.key_down(Key::Down);
                self.input.key_up(Key::Up);
            }
            _ => {
                self.input.key_up(Key::Up);
                self.input.key_up(Key::Down);
            }
        }

        // Tap fire: release between presses so the one-shot latch re-arms
        self.input.key_up(Key::Fire);
        if self.state.ammo > 0 && target.is_some() {
            self.input.key_down(Key::Fire);
        }
    }

    fn run(&mut self) {
        let mut last = Instant::now();
        let mut next_hud = Duration::from_secs(1);
        let started = Instant::now();

        while self.running.load(Ordering::Relaxed) {
            let now = Instant::now();
            let frame_ms = now.duration_since(last).as_secs_f32() * 1000.0;
            last = now;

            self.drive_inputs();
            self.update(frame_ms);

            if started.elapsed() >= next_hud {
                next_hud += Duration::from_secs(1);
                let frame = self.state.draw_frame();
                log::info!(
                    "t={:5.1}s score={:3} ammo={:3} enemies={:2} drawables={}",
                    frame.game_time / 1000.0,
                    frame.score,
                    frame.ammo,
                    self.state.enemies.len(),
                    frame.drawables.len(),
                );
            }

            if self.state.phase == GamePhase::GameOver {
                // Let the debris animate out before quitting
                if self.state.explosions.is_empty() && self.state.particles.is_empty() {
                    break;
                }
            }

            std::thread::sleep(Duration::from_millis(SIM_DT_MS as u64));
        }

        let frame = self.state.draw_frame();
        log::info!(
            "final: score {} after {:.1}s -> {:?}",
            frame.score,
            frame.game_time / 1000.0,
            frame.outcome
        );
    }
}

fn load_tuning() -> Tuning {
    match std::env::var("ABYSS_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {path}");
                    tuning
                }
                Err(err) => {
                    log::warn!("bad tuning file {path}: {err}; using defaults");
                    Tuning::default()
                }
            },
            Err(err) => {
                log::warn!("cannot read tuning file {path}: {err}; using defaults");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::var("ABYSS_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EAF00D);
    let tuning = load_tuning();
    log::info!("starting run with seed {seed}");

    let mut driver = Driver::new(seed, tuning);

    // Clean shutdown: Enter stops the loop between ticks
    let cancel = driver.cancel_handle();
    std::thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_ok() {
            cancel.store(false, Ordering::Relaxed);
        }
    });
    log::info!("press Enter to stop");

    driver.run();
}
