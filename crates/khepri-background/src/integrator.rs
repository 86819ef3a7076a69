//! Per-frame relaxation of displayed intensity toward the scene target.

use crate::grid::Cell;

/// Fraction of the remaining distance to target covered each frame.
pub const SMOOTHING_FACTOR: f32 = 0.12;

/// Multiplier applied to the target after each frame so unlit shapes fade.
pub const DECAY_FACTOR: f32 = 0.98;

/// Move `intensity` toward `target_intensity`, then decay the target.
pub fn relax(cell: &mut Cell) {
    cell.intensity += (cell.target_intensity - cell.intensity) * SMOOTHING_FACTOR;
    cell.target_intensity *= DECAY_FACTOR;
}

/// Relax every cell.
pub fn relax_all(cells: &mut [Cell]) {
    for cell in cells {
        relax(cell);
    }
}
