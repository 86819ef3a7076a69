//! LED grid model.

use khepri_core::{GRID_STEP, PIXEL_SIZE};
use rand::Rng;

/// A single LED on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Center x in surface pixels.
    pub x: f32,
    /// Center y in surface pixels.
    pub y: f32,
    /// Currently displayed brightness.
    pub intensity: f32,
    /// Brightness the cell is animating toward this frame.
    pub target_intensity: f32,
    /// Idle brightness floor chosen at build time.
    pub base_intensity: f32,
}

/// Surface size and the grid shape derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
    pub columns: usize,
    pub rows: usize,
}

impl GridDimensions {
    /// Derive grid columns and rows for a surface of the given pixel size.
    pub fn for_surface(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            columns: (width / GRID_STEP) as usize,
            rows: (height / GRID_STEP) as usize,
        }
    }
}

/// Row-major collection of cells.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: Vec<Cell>,
    dimensions: GridDimensions,
}

impl Grid {
    /// Build a fresh grid for a surface of `width` x `height` pixels.
    ///
    /// Starting and target intensities are drawn from `[0.1, 0.4)` and the
    /// base intensity from `[0.1, 0.3)`. Zero-sized surfaces give an empty grid.
    pub fn build<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let dimensions = GridDimensions::for_surface(width, height);
        let half = PIXEL_SIZE as f32 / 2.0;

        let mut cells = Vec::with_capacity(dimensions.columns * dimensions.rows);
        for row in 0..dimensions.rows {
            for col in 0..dimensions.columns {
                cells.push(Cell {
                    x: (col as u32 * GRID_STEP) as f32 + half,
                    y: (row as u32 * GRID_STEP) as f32 + half,
                    intensity: rng.gen_range(0.1..0.4),
                    target_intensity: rng.gen_range(0.1..0.4),
                    base_intensity: rng.gen_range(0.1..0.3),
                });
            }
        }

        Self { cells, dimensions }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn columns(&self) -> usize {
        self.dimensions.columns
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Look up the cell at `col`, `row`.
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.columns() || row >= self.rows() {
            return None;
        }
        self.cells.get(row * self.columns() + col)
    }

    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col >= self.columns() || row >= self.rows() {
            return None;
        }
        let columns = self.columns();
        self.cells.get_mut(row * columns + col)
    }

    /// Iterate mutably over cells together with their (column, row).
    pub fn cells_with_coords_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Cell)> {
        let columns = self.dimensions.columns.max(1);
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(index, cell)| (index % columns, index / columns, cell))
    }
}
