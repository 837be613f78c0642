use conway::engine::step;
use conway::patterns::{GLIDER, stamp};
use conway::Grid;

fn live(grid: &Grid) -> Vec<(usize, usize)> {
    let mut cells: Vec<_> = grid.live_cells().collect();
    cells.sort_unstable();
    cells
}

fn shifted(cells: &[(usize, usize)], by: usize) -> Vec<(usize, usize)> {
    let mut out: Vec<_> = cells.iter().map(|&(c, r)| (c + by, r + by)).collect();
    out.sort_unstable();
    out
}

#[test]
fn glider_moves_one_cell_diagonally_every_four_generations() {
    let mut grid = Grid::new(30, 30).unwrap();
    stamp(&mut grid, &GLIDER, (0, 0));
    let start = live(&grid);
    assert_eq!(start, vec![(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);

    for period in 1..=10 {
        for _ in 0..4 {
            grid = step(&grid);
            assert_eq!(grid.population(), 5);
        }
        assert_eq!(live(&grid), shifted(&start, period), "after {} generations", period * 4);
    }
}

#[test]
fn glider_dies_into_a_block_at_the_hard_corner() {
    // With no wrap the glider cannot leave the board; it piles up in the
    // bottom-right corner and settles as a 2x2 block.
    let mut grid = Grid::new(8, 8).unwrap();
    stamp(&mut grid, &GLIDER, (0, 0));
    for _ in 0..40 {
        grid = step(&grid);
    }
    let settled = step(&grid);
    assert_eq!(settled, grid);
    assert_eq!(live(&grid), vec![(6, 6), (6, 7), (7, 6), (7, 7)]);
}
