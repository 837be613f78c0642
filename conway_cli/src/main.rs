// main.rs - Headless Conway's Game of Life runner

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use conway::{SimConfig, Simulation, patterns};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod runner;

use runner::{RunMode, RunReport};

#[derive(Parser, Debug)]
#[command(name = "conway_cli", version, about = "Run Conway's Game of Life without a window")]
struct Cli {
    #[command(flatten)]
    board: BoardArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play continuously for a number of generations.
    Run {
        #[arg(long, default_value_t = 100)]
        generations: u64,

        /// Delay between generations, overrides the config file.
        #[arg(long)]
        speed_ms: Option<u64>,

        /// Stop as soon as the board repeats a recent generation.
        #[arg(long)]
        stop_on_cycle: bool,
    },
    /// Run a finite step chain. Non-numeric counts run one step.
    Step {
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        count: String,
    },
}

#[derive(Args, Debug)]
struct BoardArgs {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    width: Option<usize>,

    #[arg(long, global = true)]
    height: Option<usize>,

    /// Starting pattern, e.g. "glider" or "gosper glider gun".
    #[arg(long, global = true)]
    pattern: Option<String>,

    /// Seed a random board instead of a pattern.
    #[arg(long, global = true, conflicts_with = "pattern")]
    seed: Option<u64>,

    /// Alive fraction for random boards.
    #[arg(long, global = true, default_value_t = 0.33)]
    density: f64,

    /// Print the final board.
    #[arg(long, global = true)]
    print: bool,
}

fn build_simulation(args: &BoardArgs, cmd: &Command) -> anyhow::Result<Simulation> {
    let mut config = SimConfig::load(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }
    if let Command::Run {
        speed_ms,
        stop_on_cycle,
        ..
    } = cmd
    {
        if let Some(speed_ms) = speed_ms {
            config.playback.speed_ms = *speed_ms;
        }
        config.playback.stop_on_cycle |= *stop_on_cycle;
    }

    let mut sim = Simulation::new(&config)?;
    if let Some(name) = &args.pattern {
        let pattern = patterns::find(name).with_context(|| {
            let known: Vec<_> = patterns::PATTERNS.iter().map(|p| p.name).collect();
            format!("unknown pattern {name:?}, expected one of {known:?}")
        })?;
        sim.load_pattern(pattern);
    } else if let Some(seed) = args.seed {
        sim.randomize(seed, args.density);
    }
    Ok(sim)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let mut sim = build_simulation(&cli.board, &cli.cmd)?;
    let stats = sim.stats();
    info!(
        width = sim.grid().width(),
        height = sim.grid().height(),
        population = stats.population,
        "board ready"
    );

    let mode = match &cli.cmd {
        Command::Run { generations, .. } => RunMode::Continuous {
            generations: *generations,
        },
        Command::Step { count } => RunMode::Stepped {
            count: count.clone(),
        },
    };

    let finished = tokio::select! {
        report = runner::run(&mut sim, &mode) => Some(report),
        _ = tokio::signal::ctrl_c() => None,
    };
    let report = match finished {
        Some(report) => report,
        None => {
            info!("interrupted");
            sim.stop();
            sim.cancel_steps();
            let stats = sim.stats();
            RunReport {
                generation: stats.generation,
                population: stats.population,
                stopped_early: true,
            }
        }
    };

    if cli.board.print {
        print!("{}", sim.grid());
    }
    println!(
        "generation {} population {}{}",
        report.generation,
        report.population,
        if report.stopped_early { " (stopped early)" } else { "" }
    );
    Ok(())
}
