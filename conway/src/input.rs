// input.rs - Pointer, drag and wheel handling
//
// A press followed by a release with no movement in between is a click and
// toggles the cell under the pointer. Any movement while pressed turns the
// gesture into a pan, and its release toggles nothing.

use crate::simulation::Simulation;
use crate::viewport::ZoomDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    None,
    /// The view moved or scaled.
    Redraw,
    /// A cell flipped. Hosts play their click cue on this.
    Toggled { col: i64, row: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    last: (f32, f32),
    moved: bool,
}

#[derive(Debug, Default)]
pub struct InputController {
    anchor: Option<Anchor>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some_and(|a| a.moved)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.anchor = Some(Anchor {
            last: (x, y),
            moved: false,
        });
    }

    /// Pans by the distance since the previous pointer position.
    pub fn pointer_move(&mut self, sim: &mut Simulation, x: f32, y: f32) -> InputEffect {
        let Some(anchor) = self.anchor.as_mut() else {
            return InputEffect::None;
        };
        let (dx, dy) = (x - anchor.last.0, y - anchor.last.1);
        if dx == 0.0 && dy == 0.0 {
            return InputEffect::None;
        }
        anchor.last = (x, y);
        anchor.moved = true;
        sim.pan(dx, dy);
        InputEffect::Redraw
    }

    pub fn pointer_up(&mut self, sim: &mut Simulation, x: f32, y: f32) -> InputEffect {
        match self.anchor.take() {
            Some(anchor) if !anchor.moved => self.click(sim, x, y),
            _ => InputEffect::None,
        }
    }

    /// Clicks outside the board are ignored.
    pub fn click(&self, sim: &mut Simulation, x: f32, y: f32) -> InputEffect {
        let (col, row) = sim.viewport().screen_to_grid(x, y);
        if sim.toggle(col, row) {
            InputEffect::Toggled { col, row }
        } else {
            InputEffect::None
        }
    }

    /// Zoom by the sign of the wheel delta.
    pub fn wheel(&mut self, sim: &mut Simulation, delta_y: f32) -> InputEffect {
        match ZoomDirection::from_wheel(delta_y) {
            Some(direction) if sim.zoom(direction) => InputEffect::Redraw,
            _ => InputEffect::None,
        }
    }
}
