// simulation.rs - One self-contained simulation: board, view and playback
//
// Mutations only mark the simulation dirty; drawing happens when the host
// calls `render` with its surface.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::engine;
use crate::error::ConwayResult;
use crate::grid::Grid;
use crate::history::CycleHistory;
use crate::patterns::{self, Pattern};
use crate::render::{Palette, Renderer, Surface};
use crate::scheduler::{PlaybackScheduler, PlaybackState, parse_step_count};
use crate::viewport::{Viewport, ZoomDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub generation: u64,
    pub population: usize,
    pub cells: usize,
}

impl Stats {
    pub fn population_percent(&self) -> f32 {
        self.population as f32 / self.cells as f32 * 100.0
    }
}

#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    viewport: Viewport,
    scheduler: PlaybackScheduler,
    renderer: Renderer,
    history: CycleHistory,
    generation: u64,
    stop_on_cycle: bool,
    needs_redraw: bool,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> ConwayResult<Self> {
        let grid = Grid::new(config.grid.width, config.grid.height)?;
        Self::with_grid(grid, config)
    }

    /// Start from an existing board; the rest comes from `config`, which is
    /// validated like in [`Self::new`] but whose grid size is ignored.
    pub fn with_grid(grid: Grid, config: &SimConfig) -> ConwayResult<Self> {
        config.validate()?;
        Ok(Self {
            grid,
            viewport: Viewport::from_config(&config.viewport),
            scheduler: PlaybackScheduler::from_config(&config.playback),
            renderer: Renderer::new(config.palette),
            history: CycleHistory::default(),
            generation: 0,
            stop_on_cycle: config.playback.stop_on_cycle,
            needs_redraw: true,
        })
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            generation: self.generation,
            population: self.grid.population(),
            cells: self.grid.cell_count(),
        }
    }

    pub fn set_stop_on_cycle(&mut self, enabled: bool) {
        self.stop_on_cycle = enabled;
    }

    /// Replace the board with its successor.
    fn advance(&mut self) {
        self.grid = engine::step(&self.grid);
        self.generation += 1;
        self.needs_redraw = true;
        debug!(generation = self.generation, "generation advanced");

        if self.history.observe(&self.grid) && self.stop_on_cycle && self.scheduler.stop() {
            warn!(generation = self.generation, "board repeats, playback stopped");
        }
    }

    /// Begin continuous playback. The first generation is computed at once.
    pub fn start(&mut self, now: Instant) -> bool {
        let started = self.scheduler.start(now);
        if started {
            self.advance();
        }
        started
    }

    pub fn stop(&mut self) -> bool {
        self.scheduler.stop()
    }

    /// Clear the board. Playback state is untouched, so a running
    /// simulation keeps ticking on the empty board.
    pub fn reset(&mut self) {
        self.grid = self.grid.blank_like();
        self.generation = 0;
        self.history.clear();
        self.needs_redraw = true;
        info!("board reset");
    }

    pub fn set_speed(&mut self, speed_ms: u64) {
        self.scheduler.set_speed(Duration::from_millis(speed_ms));
    }

    /// Run `n` generations one step delay apart. `n <= 0` does nothing.
    pub fn advance_steps(&mut self, n: i64, now: Instant) {
        if self.scheduler.advance_steps(n, now) {
            self.advance();
        }
    }

    /// Like [`Self::advance_steps`], reading the count from a text field.
    pub fn advance_steps_from_input(&mut self, input: &str, now: Instant) {
        self.advance_steps(parse_step_count(input), now);
    }

    pub fn cancel_steps(&mut self) -> u32 {
        self.scheduler.cancel_steps()
    }

    /// Perform whatever generations are due. Returns how many ran.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let due = self.scheduler.poll(now).transitions();
        for _ in 0..due {
            self.advance();
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn toggle(&mut self, col: i64, row: i64) -> bool {
        let toggled = self.grid.toggle(col, row);
        if toggled {
            self.needs_redraw = true;
            debug!(col, row, "cell toggled");
        }
        toggled
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.viewport.pan(dx, dy);
        self.needs_redraw = true;
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        let changed = self.viewport.zoom(direction);
        self.needs_redraw |= changed;
        changed
    }

    /// Replace the board with a centred pattern and restart the count.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> usize {
        let landed = patterns::apply_pattern(&mut self.grid, pattern);
        self.generation = 0;
        self.history.clear();
        self.needs_redraw = true;
        info!(pattern = pattern.name, cells = landed, "pattern loaded");
        landed
    }

    /// Fill the board at random, reproducibly for a given seed.
    pub fn randomize(&mut self, seed: u64, density: f64) {
        self.grid.randomize(&mut StdRng::seed_from_u64(seed), density);
        self.generation = 0;
        self.history.clear();
        self.needs_redraw = true;
        info!(seed, density, "board randomized");
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.renderer.set_palette(palette);
        self.needs_redraw = true;
    }

    pub const fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.renderer.render(&self.grid, &self.viewport, surface);
        self.needs_redraw = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::patterns::GLIDER;
    use crate::render::tests::RecordingSurface;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn small() -> Simulation {
        let mut config = SimConfig::default();
        config.grid.width = 12;
        config.grid.height = 10;
        Simulation::new(&config).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.grid.height = 0;
        assert!(Simulation::new(&config).is_err());
    }

    #[test]
    fn existing_board_still_checks_the_config() {
        let mut config = SimConfig::default();
        config.viewport.min_cell_size = 40.0;
        config.viewport.max_cell_size = 10.0;
        let grid = Grid::new(3, 3).unwrap();
        assert!(Simulation::with_grid(grid.clone(), &config).is_err());

        config.viewport.min_cell_size = f32::NAN;
        assert!(Simulation::with_grid(grid.clone(), &config).is_err());

        let sim = Simulation::with_grid(grid, &SimConfig::default()).unwrap();
        assert_eq!(sim.grid().width(), 3);
    }

    #[test]
    fn start_advances_once_immediately() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.load_pattern(&GLIDER);
        assert!(sim.start(t0));
        assert_eq!(sim.generation(), 1);
        assert!(!sim.start(t0));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn double_start_leaves_one_chain_to_cancel() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.start(t0);
        sim.start(t0 + ms(1));
        assert_eq!(sim.poll(t0 + ms(100)), 1);
        assert!(sim.stop());
        assert!(!sim.stop());
        assert_eq!(sim.poll(t0 + ms(1_000)), 0);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn reset_keeps_running_state() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.load_pattern(&GLIDER);
        sim.start(t0);
        sim.reset();
        assert_eq!(sim.grid().population(), 0);
        assert_eq!(sim.grid().width(), 12);
        assert_eq!(sim.grid().height(), 10);
        assert_eq!(sim.generation(), 0);
        assert!(sim.is_running());
        assert_eq!(sim.poll(t0 + ms(100)), 1);
        assert_eq!(sim.grid().population(), 0);
    }

    #[test]
    fn steps_on_empty_board_stay_empty() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.advance_steps(3, t0);
        sim.poll(t0 + ms(100));
        sim.poll(t0 + ms(200));
        assert_eq!(sim.generation(), 3);
        assert_eq!(sim.grid().population(), 0);
    }

    #[test]
    fn non_positive_steps_leave_board_unchanged() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.load_pattern(&GLIDER);
        let before = sim.grid().clone();
        sim.advance_steps(0, t0);
        sim.advance_steps(-5, t0);
        sim.advance_steps_from_input("-5", t0);
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.next_deadline(), None);
    }

    #[test]
    fn malformed_step_input_runs_one_step() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.advance_steps_from_input("lots", t0);
        assert_eq!(sim.generation(), 1);
        assert!(!sim.scheduler().is_stepping());
    }

    #[test]
    fn render_clears_the_dirty_flag() {
        let mut sim = small();
        assert!(sim.needs_redraw());
        let mut surface = RecordingSurface::new(640.0, 480.0);
        sim.render(&mut surface);
        assert!(!sim.needs_redraw());
        assert_eq!(surface.clears(), 1);

        assert!(!sim.toggle(-1, 3));
        assert!(!sim.needs_redraw());
        assert!(sim.toggle(2, 3));
        assert!(sim.needs_redraw());
        assert_eq!(sim.grid().get(2, 3), Some(Cell::Alive));
    }

    #[test]
    fn cycle_stops_playback_when_enabled() {
        let t0 = Instant::now();
        let mut sim = small();
        sim.set_stop_on_cycle(true);
        for (c, r) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            sim.toggle(c, r);
        }
        sim.start(t0);
        assert!(sim.is_running());
        sim.poll(t0 + ms(100));
        assert!(!sim.is_running());
    }

    #[test]
    fn stats_report_population() {
        let mut sim = small();
        sim.load_pattern(&GLIDER);
        let stats = sim.stats();
        assert_eq!(stats.population, 5);
        assert_eq!(stats.cells, 120);
        assert_eq!(stats.generation, 0);
    }

    #[test]
    fn randomize_is_seeded() {
        let mut a = small();
        let mut b = small();
        a.randomize(42, 0.5);
        b.randomize(42, 0.5);
        assert_eq!(a.grid(), b.grid());
    }
}
