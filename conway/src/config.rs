// config.rs - Engine configuration

use serde::{Deserialize, Serialize};

use crate::cadence::Cadence;
use crate::error::{LifeError, Result};
use crate::grid::cell_count;

/// How a generation pass is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassMode {
    /// One synchronous loop over every cell.
    #[default]
    Sequential,
    /// One cooperative tokio task per row over a snapshot of the generation.
    RowTasks,
}

/// Static configuration for a [`LifeEngine`](crate::LifeEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// When generations advance relative to `tick` calls.
    pub cadence: Cadence,
    /// Write dying cells as `JustDied` for one generation.
    pub fade_dying: bool,
    pub pass_mode: PassMode,
    /// Optional RNG seed for reproducible randomization.
    pub rng_seed: Option<u64>,
    /// Density used to seed the grid at construction; `None` starts empty.
    pub initial_alive_probability: Option<f64>,
    /// Number of recent generation hashes kept for cycle detection; 0 disables.
    pub cycle_history: usize,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            cadence: Cadence::default(),
            fade_dying: false,
            pass_mode: PassMode::Sequential,
            rng_seed: None,
            initial_alive_probability: None,
            cycle_history: 0,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<()> {
        cell_count(self.width, self.height)?;
        self.cadence.validate()?;
        if let Some(probability) = self.initial_alive_probability {
            if !(0.0..=1.0).contains(&probability) {
                return Err(LifeError::InvalidProbability(probability));
            }
        }
        Ok(())
    }
}
