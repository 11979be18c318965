// rules.rs - Toroidal neighbour counting and the B3/S23 transition

use crate::grid::{CellState, Grid};

#[rustfmt::skip]
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Wraps a possibly negative coordinate into `0..n`.
#[inline]
pub fn wrap(c: isize, n: usize) -> usize {
    c.rem_euclid(n as isize) as usize
}

/// Live neighbours of `(x, y)`, each axis wrapped independently.
pub fn count_neighbours(grid: &Grid, x: usize, y: usize) -> u8 {
    let (width, height) = grid.dimensions();
    OFFSETS
        .iter()
        .map(|&(dx, dy)| {
            let nx = wrap(x as isize + dx, width);
            let ny = wrap(y as isize + dy, height);
            grid.at(nx, ny).weight()
        })
        .sum()
}

/// Next state of a cell given its live neighbour count.
///
/// With `fade` set, a live cell that dies becomes `JustDied` instead of `Dead`.
pub fn next_state(cell: CellState, neighbours: u8, fade: bool) -> CellState {
    match (cell, neighbours) {
        (CellState::Alive, 2 | 3) => CellState::Alive,                 // Survival
        (CellState::Alive, _) if fade => CellState::JustDied,          // Death, faded
        (CellState::Alive, _) => CellState::Dead,                      // Death
        (CellState::Dead | CellState::JustDied, 3) => CellState::Alive, // Birth
        (CellState::Dead | CellState::JustDied, _) => CellState::Dead,  // Stays dead
    }
}

/// Computes row `y` of the next generation into `out`.
pub(crate) fn compute_row(grid: &Grid, y: usize, fade: bool, out: &mut [CellState]) {
    assert_eq!(out.len(), grid.width(), "row buffer width mismatch");
    for (x, slot) in out.iter_mut().enumerate() {
        *slot = next_state(grid.at(x, y), count_neighbours(grid, x, y), fade);
    }
}
