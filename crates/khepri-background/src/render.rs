//! Painting the grid onto a surface.

use khepri_core::{BACKGROUND, PIXEL_SIZE, Palette};

use crate::color::{Rgba, intensity_to_color};
use crate::grid::Grid;
use crate::host::Surface;

/// Clear the surface to the background color and draw every visible cell.
pub fn render<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, palette: Palette) {
    let (width, height) = surface.size();
    let (width, height) = (width as f32, height as f32);

    surface.clear_rect(0.0, 0.0, width, height);
    surface.fill_rect(0.0, 0.0, width, height, Rgba::opaque(BACKGROUND));

    let size = PIXEL_SIZE as f32;
    let half = size / 2.0;
    for cell in grid.cells() {
        if let Some(color) = intensity_to_color(cell.intensity, palette) {
            surface.fill_rect(cell.x - half, cell.y - half, size, size, color);
        }
    }
}
