// grid.rs - Grid types for Conway's Game of Life

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::error::{ConwayError, ConwayResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    pub const fn flipped(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Fixed-size board addressed by `(col, row)`, stored row-major.
///
/// The dimensions are set once by [`Grid::new`] and never change; every
/// position in `[0, width) x [0, height)` always holds a defined [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build an all-dead grid.
    pub fn new(width: usize, height: usize) -> ConwayResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConwayError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// An all-dead grid with the same dimensions as `self`.
    pub fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![Cell::Dead; self.cells.len()],
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, `width * height`.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub const fn contains(&self, col: i64, row: i64) -> bool {
        col >= 0
            && row >= 0
            && (col as u64) < self.width as u64
            && (row as u64) < self.height as u64
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Alive check that treats anything off the board as dead.
    pub fn is_alive(&self, col: i64, row: i64) -> bool {
        self.contains(col, row) && self.cells[row as usize * self.width + col as usize].is_alive()
    }

    /// Returns `false` when the position is off the board.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Flip one cell. Off-board positions are ignored and report `false`.
    pub fn toggle(&mut self, col: i64, row: i64) -> bool {
        if !self.contains(col, row) {
            return false;
        }
        let i = row as usize * self.width + col as usize;
        self.cells[i] = self.cells[i].flipped();
        true
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate `(col, row, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(col, row, _)| (col, row))
    }

    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let cells: Vec<Cell> = rows.into_iter().flatten().collect();
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Hash of the cell contents, used to spot repeating generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Replace every cell with a random state, alive with probability `density`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for cell in &mut self.cells {
            *cell = Cell::from(rng.random_bool(density));
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for cell in self.row(row) {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
