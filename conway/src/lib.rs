//! Conway's Game of Life on a toroidal grid, built to be driven from a
//! render loop.
//!
//! [`GridStore`] keeps the readable generation and a scratch buffer apart;
//! [`LifeEngine`] computes each generation into scratch and commits it on the
//! frames its [`Cadence`] admits.

pub mod cadence;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rows;
pub mod rules;

pub use cadence::{Cadence, CadenceGate};
pub use config::{LifeConfig, PassMode};
pub use engine::LifeEngine;
pub use error::{LifeError, Result};
pub use grid::{CellState, Grid, GridStore};
