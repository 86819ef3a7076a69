//! Procedural scene generation.
//!
//! A scene is a list of independent shape functions. Each shape looks at one
//! cell and optionally proposes a brightness; the cell's target becomes the
//! brightest proposal, never darker than its ambient floor.

mod desert;
mod tableau;

use khepri_core::SceneMode;
use rand::Rng;

use crate::grid::Grid;

pub use desert::{phase_local_x, scene_phase, star_noise};

/// Frame-wide inputs shared by every shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneContext {
    /// Grid column count.
    pub columns: f32,
    /// Grid row count.
    pub rows: f32,
    /// Scene time in seconds, already scaled for the scene.
    pub time: f64,
    /// Accumulated world scroll.
    pub scroll_offset: f64,
}

impl SceneContext {
    /// World x coordinate of a column for scrolling shapes.
    pub fn world_x(&self, col: f32) -> f64 {
        f64::from(col) + self.scroll_offset * 0.1
    }

    /// `sin(time * rate + offset)`, with the time term kept in `f64`.
    pub fn shimmer(&self, rate: f64, offset: f32) -> f32 {
        (self.time * rate + f64::from(offset)).sin() as f32
    }

    /// Row where the desert floor sits.
    pub fn ground_level(&self) -> f32 {
        self.rows * 0.85
    }
}

/// A shape test: proposes a brightness for the cell at (column, row).
pub type Shape = fn(&SceneContext, f32, f32) -> Option<f32>;

/// Fold shape proposals over `floor`, keeping the brightest.
pub fn composite(shapes: &[Shape], ctx: &SceneContext, col: f32, row: f32, floor: f32) -> f32 {
    shapes
        .iter()
        .filter_map(|shape| shape(ctx, col, row))
        .fold(floor, f32::max)
}

/// Shapes that make up a scene, in evaluation order.
pub fn shapes_for(mode: SceneMode) -> &'static [Shape] {
    match mode {
        SceneMode::SideScroller => desert::SHAPES,
        SceneMode::Pyramids => tableau::PYRAMID_SHAPES,
        SceneMode::Pharaoh => tableau::PHARAOH_SHAPES,
    }
}

/// Overwrite every cell's target intensity for this frame.
///
/// Scrolling scenes advance `scroll_offset` by `scroll_speed` first.
pub fn update_scene<R: Rng + ?Sized>(
    grid: &mut Grid,
    mode: SceneMode,
    elapsed_seconds: f64,
    scroll_offset: &mut f64,
    scroll_speed: f32,
    rng: &mut R,
) {
    if mode.scrolls() {
        *scroll_offset += f64::from(scroll_speed);
    }

    let ctx = SceneContext {
        columns: grid.columns() as f32,
        rows: grid.rows() as f32,
        time: elapsed_seconds * f64::from(mode.time_scale()),
        scroll_offset: *scroll_offset,
    };
    let shapes = shapes_for(mode);
    let ambient = mode.ambient_factor();

    for (col, row, cell) in grid.cells_with_coords_mut() {
        let (col, row) = (col as f32, row as f32);
        let mut target = composite(shapes, &ctx, col, row, cell.base_intensity * ambient);

        // Sparkles draw from the RNG, so they sit outside the pure shape list.
        if mode == SceneMode::Pyramids {
            target = target.max(tableau::sky_sparkle(&ctx, row, rng).unwrap_or(0.0));
        }

        cell.target_intensity = target;
    }
}
