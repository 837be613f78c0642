// runner.rs - Drive a simulation from tokio timers
//
// Sleeps until the scheduler's next deadline, then polls it. Everything
// runs on the calling task; nothing is spawned.

use std::time::Instant;

use conway::Simulation;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Play continuously until this many generations have run.
    Continuous { generations: u64 },
    /// Run a finite step chain; the count is read like a step input field.
    Stepped { count: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub generation: u64,
    pub population: usize,
    /// Playback ended before the target, e.g. because the board repeated.
    pub stopped_early: bool,
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Instant) {
    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
}

pub async fn run(sim: &mut Simulation, mode: &RunMode) -> RunReport {
    let mut stopped_early = false;
    match mode {
        RunMode::Continuous { generations } => {
            let target = sim.generation() + generations;
            if *generations > 0 {
                sim.start(now());
            }
            while sim.generation() < target {
                if !sim.is_running() {
                    stopped_early = true;
                    break;
                }
                let Some(deadline) = sim.next_deadline() else {
                    break;
                };
                sleep_until(deadline).await;
                let ran = sim.poll(now());
                debug!(ran, generation = sim.generation(), "tick");
            }
            sim.stop();
        }
        RunMode::Stepped { count } => {
            sim.advance_steps_from_input(count, now());
            while let Some(deadline) = sim.next_deadline() {
                sleep_until(deadline).await;
                sim.poll(now());
            }
        }
    }

    let stats = sim.stats();
    info!(
        generation = stats.generation,
        population = stats.population,
        "run finished"
    );
    RunReport {
        generation: stats.generation,
        population: stats.population,
        stopped_early,
    }
}
