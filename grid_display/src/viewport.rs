// viewport.rs - Mapping between screen points and grid cells

use egui::{Pos2, Vec2};

/// How many whole cells of `pitch` points fit in `available`, at least 1x1.
pub fn grid_dimensions(available: Vec2, pitch: f32) -> (usize, usize) {
    let fit = |extent: f32| ((extent / pitch).floor().max(1.0)) as usize;
    (fit(available.x), fit(available.y))
}

/// Top-left corner of cell `(x, y)`.
pub fn cell_origin(origin: Pos2, pitch: f32, x: usize, y: usize) -> Pos2 {
    origin + Vec2::new(x as f32 * pitch, y as f32 * pitch)
}

/// The cell under `pointer`, or `None` when it falls outside the grid.
pub fn cell_at(pointer: Pos2, origin: Pos2, pitch: f32, dims: (usize, usize)) -> Option<(usize, usize)> {
    let offset = pointer - origin;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let x = (offset.x / pitch) as usize;
    let y = (offset.y / pitch) as usize;
    (x < dims.0 && y < dims.1).then_some((x, y))
}
