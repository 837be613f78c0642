// viewport.rs - Pan/zoom transform between grid and screen coordinates

use tracing::debug;

use crate::config::ViewportConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: scrolling up (negative delta) zooms in.
    pub fn from_wheel(delta_y: f32) -> Option<Self> {
        if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// Offset and cell size used both to draw the grid and to map pointer
/// positions back onto it.
///
/// Zoom is anchored at the screen origin: changing the cell size keeps the
/// offset, so content under the pointer shifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    offset_x: f32,
    offset_y: f32,
    cell_size: f32,
    min_cell_size: f32,
    max_cell_size: f32,
    zoom_step: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl Viewport {
    /// Bounds that are inverted or NaN fall back to the defaults, since
    /// every later zoom clamps against them.
    pub fn from_config(config: &ViewportConfig) -> Self {
        let (min_cell_size, max_cell_size) = if config.min_cell_size <= config.max_cell_size {
            (config.min_cell_size, config.max_cell_size)
        } else {
            let fallback = ViewportConfig::default();
            (fallback.min_cell_size, fallback.max_cell_size)
        };
        let mut viewport = Self {
            offset_x: 0.0,
            offset_y: 0.0,
            cell_size: min_cell_size,
            min_cell_size,
            max_cell_size,
            zoom_step: config.zoom_step,
        };
        viewport.set_cell_size(config.cell_size);
        viewport
    }

    pub const fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size.clamp(self.min_cell_size, self.max_cell_size);
    }

    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Top-left screen corner of a cell.
    pub fn grid_to_screen(&self, col: i64, row: i64) -> (f32, f32) {
        (
            col as f32 * self.cell_size + self.offset_x,
            row as f32 * self.cell_size + self.offset_y,
        )
    }

    /// Cell whose on-screen square contains the point. The result may lie
    /// off the board; callers bounds-check.
    pub fn screen_to_grid(&self, x: f32, y: f32) -> (i64, i64) {
        let col = self.axis_to_grid(x, self.offset_x);
        let row = self.axis_to_grid(y, self.offset_y);
        (col, row)
    }

    fn axis_to_grid(&self, pos: f32, offset: f32) -> i64 {
        let mut cell = ((pos - offset) / self.cell_size).floor() as i64;
        // Division can land a hair on the wrong side of a cell boundary;
        // settle against the same edges grid_to_screen draws.
        let edge = |c: i64| c as f32 * self.cell_size + offset;
        if edge(cell) > pos {
            cell -= 1;
        } else if edge(cell + 1) <= pos {
            cell += 1;
        }
        cell
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Grow or shrink the cell size by one step, clamped to the configured
    /// range. Returns whether the size changed.
    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        let before = self.cell_size;
        let target = match direction {
            ZoomDirection::In => before + self.zoom_step,
            ZoomDirection::Out => before - self.zoom_step,
        };
        self.set_cell_size(target);
        let changed = self.cell_size != before;
        if changed {
            debug!(cell_size = self.cell_size, "zoomed");
        }
        changed
    }
}
