// engine.rs - Drives generations on a frame cadence over a GridStore

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, trace, warn};

use crate::cadence::{Cadence, CadenceGate};
use crate::config::{LifeConfig, PassMode};
use crate::error::Result;
use crate::grid::{CellState, Grid, GridStore};
use crate::rows::RowTasks;
use crate::rules;

/// Conway's Game of Life on a toroidal grid, advanced from a render loop.
///
/// Call [`tick`](Self::tick) once per display frame. Interactive edits go
/// straight to the current generation and are seen by the next pass.
#[derive(Debug)]
pub struct LifeEngine {
    store: GridStore,
    gate: CadenceGate,
    paused: bool,
    fade_dying: bool,
    fade: FadeMark,
    generation: u64,
    rng: SmallRng,
    row_tasks: Option<RowTasks>,
    history: CycleHistory,
}

impl LifeEngine {
    pub fn new(config: LifeConfig) -> Result<Self> {
        config.validate()?;

        let mut store = GridStore::new(config.width, config.height)?;
        let mut rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        if let Some(probability) = config.initial_alive_probability {
            store.fill_random(probability, &mut rng)?;
        }
        let row_tasks = match config.pass_mode {
            PassMode::Sequential => None,
            PassMode::RowTasks => Some(RowTasks::new()?),
        };

        info!(
            width = config.width,
            height = config.height,
            cadence = ?config.cadence,
            pass_mode = ?config.pass_mode,
            fade_dying = config.fade_dying,
            "Created life engine"
        );

        Ok(Self {
            store,
            gate: CadenceGate::new(config.cadence)?,
            paused: false,
            fade_dying: config.fade_dying,
            fade: FadeMark::Settled,
            generation: 0,
            rng,
            row_tasks,
            history: CycleHistory::new(config.cycle_history),
        })
    }

    /// Counts one frame, advancing a generation when the cadence admits it,
    /// and returns the stable generation to draw.
    ///
    /// `JustDied` cells are returned by exactly one tick and are `Dead` on
    /// the next one.
    pub fn tick(&mut self, elapsed: Duration) -> &Grid {
        if self.fade == FadeMark::Shown {
            self.store.resolve_fading();
            self.fade = FadeMark::Settled;
        }
        // The gate is not consulted while paused, so its phase is frozen.
        if !self.paused && self.gate.admit(elapsed) {
            self.step();
        }
        if self.fade == FadeMark::Fresh {
            self.fade = FadeMark::Shown;
        }
        self.store.current()
    }

    /// One full transition-and-commit pass, ignoring cadence and pause.
    pub fn step(&mut self) {
        assert_eq!(
            self.store.current().dimensions(),
            self.store.scratch_dimensions(),
            "current and scratch buffers disagree on dimensions"
        );

        match &self.row_tasks {
            Some(tasks) => tasks.fill_scratch(&mut self.store, self.fade_dying),
            None => fill_scratch(&mut self.store, self.fade_dying),
        }
        self.store.commit();
        self.generation += 1;
        if self.fade_dying {
            self.fade = FadeMark::Fresh;
        }

        trace!(
            generation = self.generation,
            live = self.store.current().live_count(),
            "Committed generation"
        );

        if self.history.record(self.store.current()) {
            warn!(generation = self.generation, "Generation repeats a recent one; pausing");
            self.paused = true;
        }
    }

    /// The stable, readable generation.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        self.store.current()
    }

    #[must_use]
    pub const fn store(&self) -> &GridStore {
        &self.store
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, generation = self.generation, "Pause changed");
        }
        self.paused = paused;
    }

    #[must_use]
    pub const fn cadence(&self) -> Cadence {
        self.gate.cadence()
    }

    pub fn set_cadence(&mut self, cadence: Cadence) -> Result<()> {
        self.gate.set_cadence(cadence)
    }

    #[must_use]
    pub const fn fade_dying(&self) -> bool {
        self.fade_dying
    }

    pub fn set_fade_dying(&mut self, fade: bool) {
        self.fade_dying = fade;
    }

    /// Flips a cell between alive and dead.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<CellState> {
        let state = self.store.toggle(x, y)?;
        self.history.reset();
        Ok(state)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        self.store.set(x, y, state)?;
        self.history.reset();
        Ok(())
    }

    /// Reseeds the grid, each cell alive with `probability`.
    pub fn randomize(&mut self, probability: f64) -> Result<()> {
        self.store.fill_random(probability, &mut self.rng)?;
        self.generation = 0;
        self.history.reset();
        info!(probability, live = self.store.current().live_count(), "Randomized grid");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.generation = 0;
        self.history.reset();
        info!("Cleared grid");
    }

    /// Rebuilds both buffers at the new size, every cell dead.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.store.resize(width, height)?;
        self.generation = 0;
        self.gate.reset();
        self.history.reset();
        Ok(())
    }
}

/// Where the `JustDied` cells of the current generation are in their one
/// drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadeMark {
    Settled,
    /// Committed, not yet returned by `tick`.
    Fresh,
    /// Returned once; cleared on the next tick.
    Shown,
}

/// Sequential pass: every cell of `scratch` from `current`. Does not commit.
fn fill_scratch(store: &mut GridStore, fade: bool) {
    let (current, scratch) = store.split();
    for y in 0..current.height() {
        rules::compute_row(current, y, fade, scratch.row_mut(y));
    }
}

/// Ring of recent generation hashes.
#[derive(Debug)]
struct CycleHistory {
    hashes: VecDeque<u64>,
    capacity: usize,
}

impl CycleHistory {
    fn new(capacity: usize) -> Self {
        Self {
            hashes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn reset(&mut self) {
        self.hashes.clear();
    }

    /// Records a generation, returning `true` if it was already in the ring.
    fn record(&mut self, grid: &Grid) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let hash = hash_grid(grid);
        if self.hashes.contains(&hash) {
            return true;
        }
        if self.hashes.len() == self.capacity {
            self.hashes.pop_front();
        }
        self.hashes.push_back(hash);
        false
    }
}

/// Hash of which cells are alive; fading cells hash as dead.
fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.dimensions().hash(&mut hasher);
    for cell in grid.cells() {
        cell.is_alive().hash(&mut hasher);
    }
    hasher.finish()
}
