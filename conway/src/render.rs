// render.rs - Draw a grid through a viewport onto an abstract surface

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::{default_alive, default_dead, default_outline};
use crate::grid::{Cell, Grid};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| format!("expected a #rrggbb colour, got {s:?}"))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("invalid hex digits in colour {s:?}"))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Palette {
    #[serde(default = "default_alive")]
    pub alive: Color,
    #[serde(default = "default_dead")]
    pub dead: Color,
    #[serde(default = "default_outline")]
    pub outline: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: default_alive(),
            dead: default_dead(),
            outline: default_outline(),
        }
    }
}

impl Palette {
    pub const fn fill(&self, cell: Cell) -> Color {
        match cell {
            Cell::Alive => self.alive,
            Cell::Dead => self.dead,
        }
    }
}

/// Minimal 2D drawing target. Coordinates are surface-relative pixels.
pub trait Surface {
    /// Drawable width and height.
    fn size(&self) -> (f32, f32);
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Clear the surface, then draw every cell as a filled square with an
    /// outline. Cells are independent, so draw order is irrelevant.
    pub fn render(&self, grid: &Grid, viewport: &Viewport, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        surface.clear(width, height);

        let size = viewport.cell_size();
        for (col, row, cell) in grid.iter() {
            let (x, y) = viewport.grid_to_screen(col as i64, row as i64);
            surface.fill_rect(x, y, size, size, self.palette.fill(cell));
            surface.stroke_rect(x, y, size, size, self.palette.outline);
        }
    }
}
