//! Neon Runner entry point
//!
//! Native builds run a headless demo: the autopilot plays through the stages
//! with a fixed seed and the outcome is logged. The browser build is driven by
//! `WebRunner` from the library instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_runner::effects::LogSink;
    use neon_runner::sim::{Outcome, Plan, RunPhase, SimulationClock, StageNumber, plan};
    use neon_runner::{Settings, Viewport};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("usage: neon-runner [seed] [max_ticks] ({e})");
            std::process::exit(2);
        }
        None => 2024,
    };
    let max_ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("usage: neon-runner [seed] [max_ticks] ({e})");
            std::process::exit(2);
        }
        None => 60 * 60 * 10,
    };

    let settings = Settings::load();
    log::info!("Neon Runner (native) starting, seed {}", seed);
    let mut clock = SimulationClock::with_settings(seed, Viewport::default(), LogSink, &settings);
    clock.start(StageNumber::FIRST);

    while clock.state().time_ticks < max_ticks {
        match clock.phase() {
            RunPhase::Running => {
                match plan(clock.state()) {
                    Plan::Jump => {
                        clock.jump();
                    }
                    Plan::Slide => {
                        clock.slide();
                    }
                    Plan::Idle => {}
                }
                clock.frame();
            }
            RunPhase::StageClear => {
                clock.advance();
            }
            RunPhase::Idle | RunPhase::GameOver(_) => break,
        }
    }

    let run = &clock.state().run;
    match run.phase {
        RunPhase::GameOver(Outcome::Win) => println!("MISSION COMPLETE - score {}", run.score),
        RunPhase::GameOver(Outcome::Loss) => {
            println!("SYSTEM FAILURE on stage {} - score {}", run.stage, run.score)
        }
        _ => println!(
            "Stopped after {} ticks on stage {} - score {}",
            clock.state().time_ticks,
            run.stage,
            run.score
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is neon_runner::web::init, this is just to satisfy the compiler
}
