// engine.rs - Generation transition for Conway's Game of Life
//
// Hard edges: positions off the board count as dead neighbours, the board
// does not wrap.

use crate::grid::{Cell, Grid};

#[rustfmt::skip]
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Number of alive cells among the in-bounds Moore neighbours of `(col, row)`.
pub fn live_neighbors(grid: &Grid, col: usize, row: usize) -> u8 {
    let (col, row) = (col as i64, row as i64);
    let mut count = 0;
    for &(dc, dr) in &NEIGHBORS {
        if grid.is_alive(col + dc, row + dr) {
            count += 1;
        }
    }
    count
}

/// B3/S23.
pub const fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Dead, 3) => Cell::Alive,                     // Birth
        _ => Cell::Dead,                                    // Death or stays dead
    }
}

/// Compute one row of the next generation from the previous one.
pub fn next_row(grid: &Grid, row: usize) -> Vec<Cell> {
    grid.row(row)
        .iter()
        .enumerate()
        .map(|(col, &cell)| next_state(cell, live_neighbors(grid, col, row)))
        .collect()
}

/// Build the successor generation. `grid` is only read, so the result does
/// not depend on the order cells are visited in.
pub fn step(grid: &Grid) -> Grid {
    let rows = (0..grid.height()).map(|row| next_row(grid, row)).collect();
    Grid::from_rows(grid.width(), rows)
}

/// Apply [`step`] `n` times.
pub fn step_n(grid: &Grid, n: usize) -> Grid {
    let mut current = grid.clone();
    for _ in 0..n {
        current = step(&current);
    }
    current
}
