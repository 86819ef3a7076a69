//! LED-grid background animation engine for khepri.
//!
//! A grid of LED cells is re-targeted every frame by a procedural scene,
//! relaxed toward that target, and painted onto a host-provided surface.
//! The host owns the surface, the frame timer and resize notifications;
//! [`LedBackground`] owns everything else.

mod color;
mod grid;
mod host;
mod integrator;
mod render;
mod scene;
mod state;

pub use color::{Rgba, VISIBILITY_THRESHOLD, band_for, intensity_to_color};
pub use grid::{Cell, Grid, GridDimensions};
pub use host::{FrameHandle, Host, ListenerId, Surface};
pub use integrator::{DECAY_FACTOR, SMOOTHING_FACTOR, relax, relax_all};
pub use render::render;
pub use scene::{
    SceneContext, Shape, composite, phase_local_x, scene_phase, shapes_for, star_noise,
    update_scene,
};
pub use state::{BackgroundSettings, LedBackground, LoopPhase};
