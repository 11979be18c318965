// rows.rs - Generation pass with one cooperative tokio task per row

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::error::Result;
use crate::grid::{CellState, Grid, GridStore};
use crate::rules;

/// Runs row coroutines over a frozen snapshot of the current generation.
pub struct RowTasks {
    runtime: Runtime,
}

impl std::fmt::Debug for RowTasks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowTasks").finish_non_exhaustive()
    }
}

/// Row coroutine: computes one row of the next generation.
async fn process_row(row_index: usize, snapshot: Arc<Grid>, fade: bool) -> (usize, Vec<CellState>) {
    let mut row = vec![CellState::Dead; snapshot.width()];
    rules::compute_row(&snapshot, row_index, fade, &mut row);
    tokio::task::yield_now().await;
    (row_index, row)
}

impl RowTasks {
    pub fn new() -> Result<Self> {
        Ok(Self {
            runtime: Runtime::new()?,
        })
    }

    /// Fills every row of `scratch` from a snapshot of `current`.
    ///
    /// The snapshot is taken once, so nothing that touches `current` while
    /// the tasks run can leak into this generation. Does not commit.
    pub fn fill_scratch(&self, store: &mut GridStore, fade: bool) {
        let snapshot = Arc::new(store.current().clone());
        let height = snapshot.height();

        let rows = self.runtime.block_on(async {
            let handles: Vec<_> = (0..height)
                .map(|row| tokio::spawn(process_row(row, Arc::clone(&snapshot), fade)))
                .collect();

            let mut rows = Vec::with_capacity(height);
            for handle in handles {
                match handle.await {
                    Ok(row) => rows.push(row),
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(err) => panic!("row task did not complete: {err}"),
                }
            }
            rows
        });

        assert_eq!(rows.len(), height, "row task count mismatch");
        for (row_index, completed_row) in rows {
            store.scratch_row_mut(row_index).copy_from_slice(&completed_row);
        }
    }
}
