// cadence.rs - Decides which render frames also advance the simulation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};

/// How often the simulation advances relative to `tick` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Advance on every k-th tick, regardless of elapsed time.
    EveryNthFrame(u32),
    /// Advance once the accumulated elapsed time reaches the interval.
    Interval(Duration),
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence::EveryNthFrame(4)
    }
}

impl Cadence {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Cadence::EveryNthFrame(0) => Err(LifeError::InvalidConfig(
                "frame divisor must be at least 1",
            )),
            Cadence::Interval(interval) if interval.is_zero() => Err(LifeError::InvalidConfig(
                "update interval must be non-zero",
            )),
            _ => Ok(()),
        }
    }
}

/// Running state for a [`Cadence`].
#[derive(Debug, Clone)]
pub struct CadenceGate {
    cadence: Cadence,
    frame: u32,
    accumulated: Duration,
}

impl CadenceGate {
    pub fn new(cadence: Cadence) -> Result<Self> {
        cadence.validate()?;
        Ok(Self {
            cadence,
            frame: 0,
            accumulated: Duration::ZERO,
        })
    }

    #[must_use]
    pub const fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Switches cadence and restarts the phase.
    pub fn set_cadence(&mut self, cadence: Cadence) -> Result<()> {
        cadence.validate()?;
        self.cadence = cadence;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.accumulated = Duration::ZERO;
    }

    /// Counts one frame and reports whether a generation is due.
    ///
    /// At most one generation is admitted per call; for `Interval` the carried
    /// remainder never exceeds one interval.
    pub fn admit(&mut self, elapsed: Duration) -> bool {
        match self.cadence {
            Cadence::EveryNthFrame(divisor) => {
                self.frame = (self.frame + 1) % divisor;
                self.frame == 0
            }
            Cadence::Interval(interval) => {
                self.accumulated = self.accumulated.saturating_add(elapsed);
                if self.accumulated < interval {
                    return false;
                }
                self.accumulated = (self.accumulated - interval).min(interval);
                true
            }
        }
    }
}
