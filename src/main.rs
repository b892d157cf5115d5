//! Flappy Core entry point
//!
//! Headless host: feeds the state machine input events and fixed ticks, the way a
//! windowed front end would, and logs each run. Usage: `flappy-core [settings.json]`

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use flappy_core::consts::SIM_DT;
use flappy_core::sim::{Flow, GamePhase, GameStateMachine, InputEvent, Stepper};
use flappy_core::{HighScores, Settings};

fn main() {
    env_logger::init();
    log::info!("Flappy Core (headless) starting...");

    let path = std::env::args().nth(1);
    let settings = Settings::load(path.as_deref());
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut machine = GameStateMachine::new(seed)
        .with_autopilot(settings.autopilot)
        .with_high_scores(HighScores::with_capacity(settings.high_score_slots));

    run(&mut machine, &settings);

    for (i, entry) in machine.high_scores().entries.iter().enumerate() {
        log::info!(
            "#{} score {} (run {}, {:.1}s)",
            i + 1,
            entry.score,
            entry.run,
            entry.ticks as f32 * SIM_DT
        );
    }

    if settings.print_scene {
        match serde_json::to_string_pretty(&machine.scene()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize scene: {}", e),
        }
    }
}

/// Play the configured runs, then quit
fn run(machine: &mut GameStateMachine, settings: &Settings) {
    let mut stepper = Stepper::new();

    for _ in 0..settings.runs {
        if machine.frame(&[InputEvent::Start], 0) == Flow::Exit {
            return;
        }

        let run_start = stepper.total_ticks;
        let mut last_frame = Instant::now();

        while machine.phase() == GamePhase::Playing {
            let ticks = if settings.realtime {
                // Cap the frame rate to the tick rate
                let frame = Duration::from_secs_f32(SIM_DT);
                let elapsed = last_frame.elapsed();
                if elapsed < frame {
                    std::thread::sleep(frame - elapsed);
                }
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;
                stepper.advance(dt)
            } else {
                stepper.advance(SIM_DT)
            };

            machine.frame(&[], ticks);

            if stepper.total_ticks - run_start >= settings.max_ticks_per_run
                && machine.phase() == GamePhase::Playing
            {
                log::info!("Tick budget reached, abandoning run");
                machine.frame(&[InputEvent::Back], 0);
            }
        }
    }

    machine.frame(&[InputEvent::Quit], 0);
}

/// Seed from the wall clock when none is configured
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
