//! Static tableau scenes: pyramids with a sphinx, and a pharaoh mask.

use rand::Rng;

use super::{SceneContext, Shape};

pub(super) const PYRAMID_SHAPES: &[Shape] = &[great_pyramid, small_pyramid, sphinx, dune_band];

pub(super) const PHARAOH_SHAPES: &[Shape] = &[face, nemes, eyes, collar, hieroglyph_panels];

/// Chance per sky cell per frame of a sparkle.
const SPARKLE_CHANCE: f64 = 0.001;

/// Random short-lived sparkle in the upper sky.
pub(super) fn sky_sparkle<R: Rng + ?Sized>(
    ctx: &SceneContext,
    row: f32,
    rng: &mut R,
) -> Option<f32> {
    (row < ctx.rows * 0.3 && rng.gen_bool(SPARKLE_CHANCE)).then_some(0.9)
}

/// Solid triangle standing on `base_y`, narrowing linearly to its apex.
fn inside_triangle(
    col: f32,
    row: f32,
    center_x: f32,
    base_y: f32,
    height: f32,
    width: f32,
) -> bool {
    let above_base = base_y - row;
    let half_width_here = (width / 2.0) * (1.0 - above_base / height);
    above_base > 0.0 && above_base < height && (col - center_x).abs() < half_width_here
}

fn great_pyramid(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let inside = inside_triangle(
        col,
        row,
        ctx.columns * 0.3,
        ctx.rows * 0.8,
        ctx.rows * 0.4,
        ctx.columns * 0.2,
    );
    inside.then(|| 0.8 + ctx.shimmer(3.0, row * 0.1) * 0.2)
}

fn small_pyramid(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let inside = inside_triangle(
        col,
        row,
        ctx.columns * 0.6,
        ctx.rows * 0.8,
        ctx.rows * 0.3,
        ctx.columns * 0.15,
    );
    inside.then(|| 0.7 + ctx.shimmer(2.5, row * 0.1) * 0.2)
}

fn sphinx(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let inside = (col - ctx.columns * 0.8).abs() < ctx.columns * 0.1
        && (row - ctx.rows * 0.7).abs() < ctx.rows * 0.15;
    inside.then(|| 0.6 + ctx.shimmer(4.0, col * 0.1) * 0.3)
}

fn dune_band(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let crest = ctx.shimmer(2.0, col * 0.02) * 8.0 + ctx.rows * 0.85 - 10.0;
    (row > crest && row < ctx.rows * 0.9).then_some(0.3)
}

fn face(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let dx = (col - ctx.columns * 0.5) / (ctx.columns * 0.15);
    let dy = (row - ctx.rows * 0.4) / (ctx.rows * 0.25);
    (dx * dx + dy * dy < 1.0).then(|| 0.8 + ctx.shimmer(2.0, row * 0.1) * 0.2)
}

/// Striped headdress rising above the face.
fn nemes(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let inside = inside_triangle(
        col,
        row,
        ctx.columns * 0.5,
        ctx.rows * 0.25,
        ctx.rows * 0.2,
        ctx.columns * 0.2,
    );
    inside.then(|| 0.9 + ctx.shimmer(3.0, col * 0.1) * 0.1)
}

fn eyes(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let eye_y = ctx.rows * 0.38;
    let size = ctx.columns * 0.02;
    let near = |eye_x: f32| (col - eye_x).abs() < size && (row - eye_y).abs() < size;
    (near(ctx.columns * 0.45) || near(ctx.columns * 0.55)).then_some(1.0)
}

fn collar(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let inside = (row - ctx.rows * 0.55).abs() < 3.0
        && (col - ctx.columns * 0.5).abs() < ctx.columns * 0.2;
    inside.then(|| 0.7 + ctx.shimmer(4.0, col * 0.2) * 0.3)
}

fn hieroglyph_panels(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let in_side_panel = col < ctx.columns * 0.2 || col > ctx.columns * 0.8;
    let in_band = row > ctx.rows * 0.2 && row < ctx.rows * 0.8;
    if !(in_side_panel && in_band) {
        return None;
    }
    let drift = (f64::from(col * 0.2) + ctx.time * 1.5).cos() as f32;
    let pattern = ctx.shimmer(1.0, row * 0.3) * drift;
    (pattern > 0.3).then(|| 0.4 + pattern * 0.3)
}
