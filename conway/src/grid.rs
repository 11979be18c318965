// grid.rs - Cell buffers and the double-buffered grid store

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LifeError, Result};

/// State of a single cell.
///
/// `JustDied` only appears when dying cells are faded; it reads as not alive
/// and is drawn for a single frame before reverting to `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
    JustDied = 2,
}

impl CellState {
    #[inline]
    pub const fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    /// Neighbour weight used by the transition rule.
    #[inline]
    pub(crate) const fn weight(self) -> u8 {
        self.is_alive() as u8
    }
}

/// One `width x height` buffer, row-major.
///
/// Readers only ever get `&Grid`; writes go through [`GridStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

/// Number of cells in a `width x height` grid.
///
/// Zero sides and products that overflow are `InvalidDimension`.
pub fn cell_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .filter(|&count| count > 0 && count <= isize::MAX as usize)
        .ok_or(LifeError::InvalidDimension { width, height })
}

impl Grid {
    pub(crate) fn new(width: usize, height: usize) -> Result<Self> {
        let count = cell_count(width, height)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|_| LifeError::InvalidDimension { width, height })?;
        cells.resize(count, CellState::Dead);
        Ok(Self { width, height, cells })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reads a cell. Does not wrap.
    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        self.index_of(x, y).map(|idx| self.cells[idx])
    }

    /// All cells, row by row.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(self.width)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Unchecked read for in-range coordinates, used by the transition pass.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> CellState {
        self.cells[y * self.width + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [CellState] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    pub(crate) fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

/// Owns the readable `current` generation and the `scratch` buffer the next
/// generation is written into.
///
/// Only `current` is ever handed out for reading. `scratch` holds whatever the
/// last pass left in it until every cell has been written again, so it must
/// not be committed without a full pass.
#[derive(Debug, Clone)]
pub struct GridStore {
    current: Grid,
    scratch: Grid,
}

impl GridStore {
    /// Allocates both buffers, every cell `Dead`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            current: Grid::new(width, height)?,
            scratch: Grid::new(width, height)?,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.current.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.current.height
    }

    /// The stable, readable generation.
    #[must_use]
    pub const fn current(&self) -> &Grid {
        &self.current
    }

    #[must_use]
    pub const fn scratch_dimensions(&self) -> (usize, usize) {
        self.scratch.dimensions()
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        self.current.get(x, y)
    }

    /// Writes straight into `current`; visible on the next read.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        self.current.set(x, y, state)
    }

    /// Flips a cell between alive and dead, returning the new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<CellState> {
        let next = match self.current.get(x, y)? {
            CellState::Alive => CellState::Dead,
            CellState::Dead | CellState::JustDied => CellState::Alive,
        };
        self.current.set(x, y, next)?;
        Ok(next)
    }

    pub fn write_scratch(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        self.scratch.set(x, y, state)
    }

    pub(crate) fn scratch_row_mut(&mut self, y: usize) -> &mut [CellState] {
        self.scratch.row_mut(y)
    }

    /// Read `current` while writing `scratch`, for one synchronous pass.
    pub(crate) fn split(&mut self) -> (&Grid, &mut Grid) {
        (&self.current, &mut self.scratch)
    }

    /// Promotes `scratch` to `current`. The old `current` becomes scratch.
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);
    }

    /// Sets every cell of `current` alive with `probability`, else dead.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        for cell in &mut self.current.cells {
            *cell = if rng.random_bool(probability) {
                CellState::Alive
            } else {
                CellState::Dead
            };
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current.fill(CellState::Dead);
    }

    /// Turns every `JustDied` cell of `current` into `Dead`.
    pub fn resolve_fading(&mut self) {
        for cell in &mut self.current.cells {
            if *cell == CellState::JustDied {
                *cell = CellState::Dead;
            }
        }
    }

    /// Reallocates both buffers at the new size. All prior cells are lost.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        let current = Grid::new(width, height)?;
        let scratch = Grid::new(width, height)?;
        info!(
            old_width = self.width(),
            old_height = self.height(),
            width,
            height,
            "Resized grid store"
        );
        self.scratch = scratch;
        self.current = current;
        Ok(())
    }
}
