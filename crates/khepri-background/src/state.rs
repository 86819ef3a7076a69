//! Animation state and frame loop lifecycle.

use khepri_core::{DEFAULT_SCROLL_SPEED, Palette, SceneMode};
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::grid::Grid;
use crate::host::{FrameHandle, Host, ListenerId, Surface};
use crate::integrator::relax_all;
use crate::render::render;
use crate::scene::update_scene;

/// Where the frame loop is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopPhase {
    #[default]
    Uninitialized,
    Running,
    Stopped,
}

/// Tunables for a background instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundSettings {
    pub scene: SceneMode,
    pub palette: Palette,
    /// World scroll added each frame by scrolling scenes.
    pub scroll_speed: f32,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            scene: SceneMode::default(),
            palette: Palette::default(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }
}

/// An animated LED background bound to a host surface.
///
/// The host drives it: [`start`](Self::start) once, [`frame`](Self::frame) whenever a
/// requested frame is due, [`resize`](Self::resize) on viewport changes and
/// [`teardown`](Self::teardown) when done.
#[derive(Debug)]
pub struct LedBackground {
    /// Current LED grid, rebuilt on resize.
    grid: Grid,
    /// Accumulated world scroll. Survives grid rebuilds.
    scroll_offset: f64,
    phase: LoopPhase,
    settings: BackgroundSettings,
    /// Frame requested from the host and not yet run.
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerId>,
    /// Host time when the loop started, in seconds.
    started_at: f64,
    rng: StdRng,
}

impl LedBackground {
    /// Create a background seeded from OS entropy.
    pub fn new(settings: BackgroundSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Create a background with reproducible randomness.
    pub fn with_seed(settings: BackgroundSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: BackgroundSettings, rng: StdRng) -> Self {
        Self {
            grid: Grid::default(),
            scroll_offset: 0.0,
            phase: LoopPhase::Uninitialized,
            settings,
            pending_frame: None,
            resize_listener: None,
            started_at: 0.0,
            rng,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn settings(&self) -> BackgroundSettings {
        self.settings
    }

    /// Switch scenes without rebuilding the grid.
    pub fn set_scene(&mut self, scene: SceneMode) {
        self.settings.scene = scene;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.settings.palette = palette;
    }

    /// Build the grid, subscribe to resizes and request the first frame.
    ///
    /// Does nothing if the host surface is not available yet or the loop has
    /// already been started.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.phase != LoopPhase::Uninitialized || !self.rebuild_grid(host) {
            return;
        }

        self.started_at = host.now_seconds();
        self.resize_listener = Some(host.subscribe_resize());
        self.pending_frame = Some(host.request_frame());
        self.phase = LoopPhase::Running;

        let dims = self.grid.dimensions();
        info!(
            "LED background started: {}x{} px, {}x{} cells, scene {}",
            dims.width,
            dims.height,
            dims.columns,
            dims.rows,
            self.settings.scene.label()
        );
    }

    /// Run one frame: scene, integrate, render, then request the next frame.
    ///
    /// If the surface is unavailable the frame is skipped but the next one is
    /// still requested.
    pub fn frame<H: Host>(&mut self, host: &mut H) {
        if self.phase != LoopPhase::Running {
            return;
        }
        self.pending_frame = None;

        let elapsed = host.now_seconds() - self.started_at;
        if let Some(surface) = host.surface() {
            update_scene(
                &mut self.grid,
                self.settings.scene,
                elapsed,
                &mut self.scroll_offset,
                self.settings.scroll_speed,
                &mut self.rng,
            );
            relax_all(self.grid.cells_mut());
            render(surface, &self.grid, self.settings.palette);
        } else {
            debug!("surface unavailable, skipping frame");
        }

        self.pending_frame = Some(host.request_frame());
    }

    /// Rebuild the grid for the new viewport. Scroll offset is kept.
    pub fn resize<H: Host>(&mut self, host: &mut H) {
        if self.phase != LoopPhase::Running {
            return;
        }
        self.rebuild_grid(host);
    }

    /// Cancel the pending frame and unsubscribe from resizes.
    pub fn teardown<H: Host>(&mut self, host: &mut H) {
        if self.phase == LoopPhase::Stopped {
            return;
        }
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        if let Some(id) = self.resize_listener.take() {
            host.unsubscribe_resize(id);
        }
        self.phase = LoopPhase::Stopped;
        info!("LED background stopped");
    }

    /// Size the surface to the viewport and build a fresh grid.
    /// Returns `false` if the surface is unavailable.
    fn rebuild_grid<H: Host>(&mut self, host: &mut H) -> bool {
        let (width, height) = host.viewport();
        let Some(surface) = host.surface() else {
            debug!("surface unavailable, grid not rebuilt");
            return false;
        };
        surface.set_size(width, height);
        self.grid = Grid::build(width, height, &mut self.rng);

        let dims = self.grid.dimensions();
        debug!(
            "grid rebuilt for {}x{} px: {}x{} cells",
            width, height, dims.columns, dims.rows
        );
        true
    }
}
