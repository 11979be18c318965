use std::time::Duration;

use conway::{Cadence, CellState, Grid, GridStore, LifeConfig, LifeEngine, LifeError, PassMode};

fn engine_with(width: usize, height: usize, cadence: Cadence) -> LifeEngine {
    LifeEngine::new(LifeConfig {
        width,
        height,
        cadence,
        rng_seed: Some(0xC0FFEE),
        ..LifeConfig::default()
    })
    .expect("engine")
}

fn seed(engine: &mut LifeEngine, cells: &[(usize, usize)]) {
    for &(x, y) in cells {
        engine.set_cell(x, y, CellState::Alive).expect("seed cell");
    }
}

fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y).expect("in range").is_alive() {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn block_is_a_still_life() {
    let mut life = engine_with(6, 6, Cadence::EveryNthFrame(1));
    let block = [(2, 2), (3, 2), (2, 3), (3, 3)];
    seed(&mut life, &block);
    for _ in 0..25 {
        life.step();
        assert_eq!(live_cells(life.grid()), block);
    }
}

#[test]
fn block_at_the_seam_is_still_through_wraparound() {
    let mut life = engine_with(4, 4, Cadence::EveryNthFrame(1));
    let block = [(0, 0), (3, 0), (0, 3), (3, 3)];
    seed(&mut life, &block);
    for _ in 0..5 {
        life.step();
    }
    let mut expected = block.to_vec();
    expected.sort_by_key(|&(x, y)| (y, x));
    assert_eq!(live_cells(life.grid()), expected);
}

#[test]
fn blinker_oscillates_with_period_two() {
    let mut life = engine_with(5, 5, Cadence::EveryNthFrame(1));
    seed(&mut life, &[(1, 0), (1, 1), (1, 2)]);

    life.step();
    assert_eq!(live_cells(life.grid()), [(0, 1), (1, 1), (2, 1)]);

    life.step();
    assert_eq!(live_cells(life.grid()), [(1, 0), (1, 1), (1, 2)]);
}

#[test]
fn glider_crosses_the_seam_and_returns() {
    // A glider moves one cell diagonally every four generations, so after
    // 4 * 8 generations on an 8x8 torus it is back where it started.
    let mut life = engine_with(8, 8, Cadence::EveryNthFrame(1));
    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    seed(&mut life, &glider);
    let start = live_cells(life.grid());

    for _ in 0..32 {
        life.step();
        assert_eq!(life.grid().live_count(), 5);
    }
    assert_eq!(live_cells(life.grid()), start);
}

#[test]
fn birth_needs_exactly_three_neighbours() {
    for (count, born) in [(2, false), (3, true), (4, false)] {
        let mut life = engine_with(5, 5, Cadence::EveryNthFrame(1));
        let around = [(1, 1), (2, 1), (3, 1), (1, 3)];
        seed(&mut life, &around[..count]);
        life.step();
        assert_eq!(
            life.grid().get(2, 2).expect("centre").is_alive(),
            born,
            "dead centre with {count} neighbours"
        );
    }
}

#[test]
fn survival_needs_two_or_three_neighbours() {
    for (count, survives) in [(1, false), (2, true), (3, true), (4, false)] {
        let mut life = engine_with(5, 5, Cadence::EveryNthFrame(1));
        let around = [(1, 1), (3, 1), (1, 3), (3, 3)];
        seed(&mut life, &[(2, 2)]);
        seed(&mut life, &around[..count]);
        life.step();
        assert_eq!(
            life.grid().get(2, 2).expect("centre").is_alive(),
            survives,
            "live centre with {count} neighbours"
        );
    }
}

#[test]
fn commit_publishes_exactly_what_scratch_received() {
    let mut store = GridStore::new(5, 4).expect("store");
    store.set(0, 0, CellState::Alive).expect("set");
    store.set(4, 3, CellState::Alive).expect("set");

    let pattern = |x: usize, y: usize| {
        if (x * 3 + y) % 4 == 1 { CellState::Alive } else { CellState::Dead }
    };
    for y in 0..4 {
        for x in 0..5 {
            store.write_scratch(x, y, pattern(x, y)).expect("write");
        }
    }
    // Nothing from scratch is visible yet.
    assert_eq!(live_cells(store.current()), [(0, 0), (4, 3)]);

    store.commit();
    for y in 0..4 {
        for x in 0..5 {
            assert_eq!(store.get(x, y).expect("get"), pattern(x, y), "cell ({x}, {y})");
        }
    }
}

#[test]
fn k_minus_one_ticks_change_nothing_and_the_kth_advances_once() {
    let k = 4;
    let mut life = engine_with(5, 5, Cadence::EveryNthFrame(k));
    seed(&mut life, &[(1, 0), (1, 1), (1, 2)]);
    let before = life.grid().clone();

    for _ in 0..k - 1 {
        assert_eq!(life.tick(Duration::from_millis(16)), &before);
    }
    assert_eq!(life.generation(), 0);

    let after = live_cells(life.tick(Duration::from_millis(16)));
    assert_eq!(after, [(0, 1), (1, 1), (2, 1)]);
    assert_eq!(life.generation(), 1);
}

#[test]
fn paused_engine_keeps_grid_and_accepts_edits() {
    let mut life = engine_with(6, 6, Cadence::EveryNthFrame(1));
    seed(&mut life, &[(1, 0), (1, 1), (1, 2)]);
    life.set_paused(true);

    let before = life.grid().clone();
    for _ in 0..20 {
        assert_eq!(life.tick(Duration::from_millis(16)), &before);
    }

    assert_eq!(life.toggle_cell(4, 4).expect("toggle"), CellState::Alive);
    assert!(life.tick(Duration::ZERO).get(4, 4).expect("get").is_alive());
    assert_eq!(life.generation(), 0);
}

#[test]
fn edits_are_seen_by_the_next_pass() {
    let mut life = engine_with(5, 5, Cadence::EveryNthFrame(2));
    life.tick(Duration::ZERO);
    seed(&mut life, &[(1, 2), (2, 2), (3, 2)]);
    let grid = life.tick(Duration::ZERO);
    assert_eq!(live_cells(grid), [(2, 1), (2, 2), (2, 3)]);
}

#[test]
fn resize_resets_both_buffers() {
    let mut life = engine_with(5, 5, Cadence::EveryNthFrame(1));
    seed(&mut life, &[(1, 1), (2, 2)]);
    life.step();

    life.resize(9, 3).expect("resize");
    assert_eq!(life.grid().dimensions(), (9, 3));
    assert_eq!(life.store().scratch_dimensions(), (9, 3));
    assert_eq!(life.grid().live_count(), 0);
    assert_eq!(life.generation(), 0);

    // Stepping a dead grid keeps it dead, so scratch held nothing stale.
    life.step();
    assert_eq!(life.grid().live_count(), 0);

    assert!(matches!(life.resize(0, 3), Err(LifeError::InvalidDimension { .. })));
}

#[test]
fn randomize_extremes() {
    let mut life = engine_with(12, 7, Cadence::EveryNthFrame(1));
    life.randomize(1.0).expect("randomize");
    assert!(life.grid().cells().iter().all(|&c| c == CellState::Alive));
    life.randomize(0.0).expect("randomize");
    assert!(life.grid().cells().iter().all(|&c| c == CellState::Dead));
}

#[test]
fn seeded_randomize_is_reproducible() {
    let mut a = engine_with(20, 20, Cadence::EveryNthFrame(1));
    let mut b = engine_with(20, 20, Cadence::EveryNthFrame(1));
    a.randomize(0.35).expect("randomize");
    b.randomize(0.35).expect("randomize");
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn toggle_outside_the_grid_is_an_error() {
    let mut life = engine_with(4, 3, Cadence::EveryNthFrame(1));
    assert!(matches!(
        life.toggle_cell(4, 0),
        Err(LifeError::OutOfBounds { x: 4, y: 0, width: 4, height: 3 })
    ));
    assert!(matches!(life.toggle_cell(0, 3), Err(LifeError::OutOfBounds { .. })));
}

#[test]
fn fading_cells_show_for_one_generation() {
    let mut life = LifeEngine::new(LifeConfig {
        width: 5,
        height: 5,
        cadence: Cadence::EveryNthFrame(1),
        fade_dying: true,
        ..LifeConfig::default()
    })
    .expect("engine");
    seed(&mut life, &[(2, 2)]);

    life.step();
    assert_eq!(life.grid().get(2, 2).expect("get"), CellState::JustDied);
    assert_eq!(life.grid().live_count(), 0);

    life.step();
    assert_eq!(life.grid().get(2, 2).expect("get"), CellState::Dead);
}

#[test]
fn fading_cell_is_drawn_on_exactly_one_frame() {
    let mut life = LifeEngine::new(LifeConfig {
        width: 5,
        height: 5,
        cadence: Cadence::EveryNthFrame(4),
        fade_dying: true,
        ..LifeConfig::default()
    })
    .expect("engine");
    seed(&mut life, &[(2, 2)]);

    let frames: Vec<CellState> = (0..8)
        .map(|_| life.tick(Duration::from_millis(16)).get(2, 2).expect("centre"))
        .collect();
    assert_eq!(
        frames,
        [
            CellState::Alive,
            CellState::Alive,
            CellState::Alive,
            CellState::JustDied,
            CellState::Dead,
            CellState::Dead,
            CellState::Dead,
            CellState::Dead,
        ]
    );
}

#[test]
fn fading_clears_between_generations_at_every_frame_cadence() {
    let mut life = LifeEngine::new(LifeConfig {
        width: 6,
        height: 6,
        cadence: Cadence::EveryNthFrame(1),
        fade_dying: true,
        ..LifeConfig::default()
    })
    .expect("engine");
    seed(&mut life, &[(1, 2), (2, 2), (3, 2)]);

    // Blinker ends of the previous phase fade for one frame each generation.
    for _ in 0..6 {
        let grid = life.tick(Duration::ZERO);
        let fading = grid.cells().iter().filter(|&&c| c == CellState::JustDied).count();
        assert_eq!(fading, 2);
        assert_eq!(grid.live_count(), 3);
    }
}

#[test]
fn oversized_resize_is_rejected_without_panicking() {
    let mut life = engine_with(4, 4, Cadence::EveryNthFrame(1));
    assert!(matches!(
        life.resize(usize::MAX / 2, 4),
        Err(LifeError::InvalidDimension { .. })
    ));
    assert_eq!(life.grid().dimensions(), (4, 4));
    assert!(
        LifeEngine::new(LifeConfig {
            width: usize::MAX,
            height: 2,
            ..LifeConfig::default()
        })
        .is_err()
    );
}

#[test]
fn row_tasks_pass_matches_sequential_pass() {
    let config = LifeConfig {
        width: 16,
        height: 12,
        cadence: Cadence::EveryNthFrame(1),
        rng_seed: Some(42),
        initial_alive_probability: Some(0.4),
        ..LifeConfig::default()
    };
    let mut sequential = LifeEngine::new(config.clone()).expect("sequential");
    let mut rows = LifeEngine::new(LifeConfig {
        pass_mode: PassMode::RowTasks,
        ..config
    })
    .expect("row tasks");
    assert_eq!(sequential.grid(), rows.grid());

    for _ in 0..10 {
        sequential.step();
        rows.step();
        assert_eq!(sequential.grid(), rows.grid());
    }
}
