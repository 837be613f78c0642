use std::time::{Duration, Instant};

use conway::{Color, InputController, InputEffect, SimConfig, Simulation, Surface};

#[derive(Default)]
struct CountingSurface {
    clears: usize,
    fills: usize,
    strokes: usize,
}

impl Surface for CountingSurface {
    fn size(&self) -> (f32, f32) {
        (800.0, 600.0)
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.clears += 1;
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {
        self.fills += 1;
    }

    fn stroke_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {
        self.strokes += 1;
    }
}

fn config() -> SimConfig {
    SimConfig::parse(
        "grid: { width: 40, height: 30 }\nplayback: { speed_ms: 50, step_delay_ms: 100 }\n",
    )
    .unwrap()
}

fn click_cell(
    input: &mut InputController,
    sim: &mut Simulation,
    col: i64,
    row: i64,
) -> InputEffect {
    let (x, y) = sim.viewport().grid_to_screen(col, row);
    input.pointer_down(x + 1.0, y + 1.0);
    input.pointer_up(sim, x + 1.0, y + 1.0)
}

#[test]
fn clicked_glider_travels_while_running() {
    let mut sim = Simulation::new(&config()).unwrap();
    let mut input = InputController::new();

    // Pan first so the clicks go through a non-trivial transform.
    input.pointer_down(100.0, 100.0);
    input.pointer_move(&mut sim, 137.0, 81.0);
    input.pointer_up(&mut sim, 137.0, 81.0);
    assert_eq!(sim.grid().population(), 0);

    for (col, row) in [(6, 5), (7, 6), (5, 7), (6, 7), (7, 7)] {
        assert_eq!(
            click_cell(&mut input, &mut sim, col, row),
            InputEffect::Toggled { col, row }
        );
    }
    assert_eq!(sim.grid().population(), 5);

    let t0 = Instant::now();
    assert!(sim.start(t0));
    let mut now = t0;
    while sim.generation() < 8 {
        now = sim.next_deadline().unwrap();
        sim.poll(now);
    }
    assert!(sim.stop());
    assert_eq!(sim.poll(now + Duration::from_secs(5)), 0);

    let mut cells: Vec<_> = sim.grid().live_cells().collect();
    cells.sort_unstable();
    assert_eq!(cells, vec![(7, 9), (8, 7), (8, 9), (9, 8), (9, 9)]);

    let mut surface = CountingSurface::default();
    sim.render(&mut surface);
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.fills, 40 * 30);
    assert_eq!(surface.strokes, 40 * 30);
}

#[test]
fn step_chain_keeps_going_after_stop() {
    let mut sim = Simulation::new(&config()).unwrap();
    let t0 = Instant::now();
    sim.start(t0);
    sim.advance_steps_from_input("4", t0);
    assert_eq!(sim.generation(), 2);

    assert!(sim.stop());
    let mut now = t0;
    while let Some(deadline) = sim.next_deadline() {
        now = deadline;
        sim.poll(now);
    }
    assert_eq!(sim.generation(), 5);
    assert_eq!(now, t0 + Duration::from_millis(300));
}

#[test]
fn cancelled_step_chain_stops_short() {
    let mut sim = Simulation::new(&config()).unwrap();
    let t0 = Instant::now();
    sim.advance_steps(10, t0);
    sim.poll(t0 + Duration::from_millis(100));
    assert_eq!(sim.cancel_steps(), 8);
    assert_eq!(sim.next_deadline(), None);
    assert_eq!(sim.generation(), 2);
}
