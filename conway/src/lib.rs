// lib.rs - Conway's Game of Life on a fixed board with a pan/zoom view
//
// Leaves first: `grid` holds cell state, `engine` computes generations,
// `viewport` maps between grid and screen, `render` draws through it,
// `scheduler` times playback, `input` turns pointer events into edits, and
// `simulation` ties one of each together.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod input;
pub mod patterns;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod viewport;

pub use config::{ConfigError, SimConfig};
pub use error::{ConwayError, ConwayResult};
pub use grid::{Cell, Grid};
pub use input::{InputController, InputEffect};
pub use render::{Color, Palette, Renderer, Surface};
pub use scheduler::{PlaybackScheduler, PlaybackState, parse_step_count};
pub use simulation::{Simulation, Stats};
pub use viewport::{Viewport, ZoomDirection};
