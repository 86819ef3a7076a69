//! Terminal implementation of the background host.

use std::time::{Duration, Instant};

use khepri_background::{FrameHandle, Host, ListenerId};
use khepri_core::GRID_STEP;

use crate::canvas::PixelCanvas;

/// Hosts the LED background inside a terminal window.
#[derive(Debug)]
pub struct TerminalHost {
    canvas: PixelCanvas,
    /// Terminal size in cells.
    cols: u16,
    rows: u16,
    /// Clock origin.
    epoch: Instant,
    frame_interval: Duration,
    next_handle: u64,
    /// Requested frame and when it is due.
    pending: Option<(FrameHandle, Instant)>,
    resize_listener: Option<ListenerId>,
}

impl TerminalHost {
    pub fn new(cols: u16, rows: u16, frame_rate: u32) -> Self {
        Self {
            canvas: PixelCanvas::default(),
            cols,
            rows,
            epoch: Instant::now(),
            frame_interval: Duration::from_secs(1) / frame_rate.max(1),
            next_handle: 0,
            pending: None,
            resize_listener: None,
        }
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Record a new terminal size. Returns whether a resize listener is subscribed.
    pub fn set_terminal_size(&mut self, cols: u16, rows: u16) -> bool {
        self.cols = cols;
        self.rows = rows;
        self.resize_listener.is_some()
    }

    /// Take the pending frame if it is due.
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, due)) if due <= Instant::now() => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// How long input polling may block before the next frame is due.
    pub fn time_until_frame(&self) -> Duration {
        match self.pending {
            Some((_, due)) => due.saturating_duration_since(Instant::now()),
            None => self.frame_interval,
        }
    }
}

impl Host for TerminalHost {
    type Surface = PixelCanvas;

    fn surface(&mut self) -> Option<&mut PixelCanvas> {
        (self.cols > 0 && self.rows > 0).then_some(&mut self.canvas)
    }

    /// Two canvas pixels per terminal row, one grid step each.
    fn viewport(&self) -> (u32, u32) {
        (
            u32::from(self.cols) * GRID_STEP,
            u32::from(self.rows) * 2 * GRID_STEP,
        )
    }

    fn now_seconds(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some((handle, Instant::now() + self.frame_interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(1);
        self.resize_listener = Some(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        if self.resize_listener == Some(id) {
            self.resize_listener = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khepri_background::{BackgroundSettings, LedBackground, LoopPhase, Surface};

    #[test]
    fn test_viewport_maps_cells_to_pixels() {
        let host = TerminalHost::new(80, 24, 30);
        assert_eq!(host.viewport(), (480, 288));
    }

    #[test]
    fn test_zero_sized_terminal_has_no_surface() {
        let mut host = TerminalHost::new(0, 24, 30);
        assert!(host.surface().is_none());
    }

    #[test]
    fn test_background_fills_canvas() {
        let mut host = TerminalHost::new(40, 10, 30);
        let mut background = LedBackground::with_seed(BackgroundSettings::default(), 5);
        background.start(&mut host);
        assert_eq!(background.phase(), LoopPhase::Running);
        assert_eq!(host.canvas().size(), (240, 120));
        assert_eq!(host.canvas().columns(), background.grid().columns());
        assert_eq!(host.canvas().rows(), background.grid().rows());
    }

    #[test]
    fn test_frame_is_not_due_immediately() {
        let mut host = TerminalHost::new(10, 10, 1);
        host.request_frame();
        assert!(host.take_due_frame().is_none());
        assert!(host.time_until_frame() > Duration::ZERO);
    }

    #[test]
    fn test_cancel_frame() {
        let mut host = TerminalHost::new(10, 10, 1000);
        let handle = host.request_frame();
        host.cancel_frame(handle);
        std::thread::sleep(Duration::from_millis(5));
        assert!(host.take_due_frame().is_none());
    }

    #[test]
    fn test_resize_forwarding_requires_subscription() {
        let mut host = TerminalHost::new(10, 10, 30);
        assert!(!host.set_terminal_size(20, 20));
        let id = host.subscribe_resize();
        assert!(host.set_terminal_size(30, 20));
        host.unsubscribe_resize(id);
        assert!(!host.set_terminal_size(40, 20));
        assert_eq!(host.viewport(), (240, 240));
    }
}
