// main.rs - Interactive Conway's Game of Life viewer

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use conway::{InputController, SimConfig, Simulation};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod surface;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "grid_display", version, about = "Pan, zoom and edit a Game of Life board")]
struct Cli {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pattern to load on startup.
    #[arg(long)]
    pattern: Option<String>,
}

pub struct ViewerApp {
    sim: Simulation,
    input: InputController,
    step_input: String,
    selected_pattern: usize,
    random_seed: u64,
    frame: Option<surface::CachedFrame>,
}

impl ViewerApp {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            input: InputController::new(),
            step_input: String::from("1"),
            selected_pattern: 0,
            random_seed: 0,
            frame: None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = SimConfig::load(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;
    let mut sim = Simulation::new(&config)?;
    if let Some(name) = &cli.pattern {
        let pattern = conway::patterns::find(name)
            .with_context(|| format!("unknown pattern {name:?}"))?;
        sim.load_pattern(pattern);
    }
    info!(
        width = config.grid.width,
        height = config.grid.height,
        "starting viewer"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 700.0]),
        ..Default::default()
    };

    let app = ViewerApp::new(sim);
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))
}
