use khepri_background::{
    BackgroundSettings, FrameHandle, Host, LedBackground, ListenerId, LoopPhase, Rgba, Surface,
};
use khepri_core::{Palette, SceneMode};

#[derive(Debug, Default)]
struct FakeSurface {
    size: (u32, u32),
    fills: usize,
}

impl Surface for FakeSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Rgba) {
        self.fills += 1;
    }
}

#[derive(Debug)]
struct FakeHost {
    surface: FakeSurface,
    surface_available: bool,
    viewport: (u32, u32),
    now: f64,
    next_handle: u64,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
    listeners: Vec<ListenerId>,
    unsubscribed: Vec<ListenerId>,
}

impl FakeHost {
    fn new(width: u32, height: u32) -> Self {
        Self {
            surface: FakeSurface::default(),
            surface_available: true,
            viewport: (width, height),
            now: 0.0,
            next_handle: 0,
            pending: None,
            requested: 0,
            cancelled: Vec::new(),
            listeners: Vec::new(),
            unsubscribed: Vec::new(),
        }
    }

    /// Fire the pending frame, if any.
    fn run_frame(&mut self, background: &mut LedBackground) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        background.frame(self);
        true
    }
}

impl Host for FakeHost {
    type Surface = FakeSurface;

    fn surface(&mut self) -> Option<&mut FakeSurface> {
        self.surface_available.then_some(&mut self.surface)
    }

    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn now_seconds(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.listeners.len() as u64 + 1);
        self.listeners.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.unsubscribed.push(id);
    }
}

fn background() -> LedBackground {
    LedBackground::with_seed(BackgroundSettings::default(), 2024)
}

#[test]
fn test_start_builds_grid_and_schedules_first_frame() {
    let mut host = FakeHost::new(500, 500);
    let mut bg = background();

    bg.start(&mut host);

    assert_eq!(bg.phase(), LoopPhase::Running);
    assert_eq!(bg.grid().len(), 83 * 83);
    assert_eq!(host.surface.size, (500, 500));
    assert_eq!(host.requested, 1);
    assert_eq!(host.listeners.len(), 1);
    assert_eq!(bg.scroll_offset(), 0.0);
}

#[test]
fn test_one_frame_then_teardown() {
    let mut host = FakeHost::new(500, 500);
    let mut bg = background();
    bg.start(&mut host);

    assert!(host.run_frame(&mut bg));
    assert_eq!(bg.scroll_offset(), 0.5);
    assert!(host.surface.fills > 0);
    assert!(host.pending.is_some());

    bg.teardown(&mut host);
    assert_eq!(bg.phase(), LoopPhase::Stopped);
    assert_eq!(host.cancelled.len(), 1);
    assert_eq!(host.unsubscribed, host.listeners);
    assert!(host.pending.is_none());

    let snapshot = bg.grid().cells().to_vec();
    let fills = host.surface.fills;

    // A stray callback after teardown must not touch anything.
    host.now = 1.0;
    bg.frame(&mut host);
    assert_eq!(bg.grid().cells(), snapshot.as_slice());
    assert_eq!(bg.scroll_offset(), 0.5);
    assert_eq!(host.surface.fills, fills);
    assert!(host.pending.is_none());

    bg.teardown(&mut host);
    assert_eq!(host.cancelled.len(), 1);
}

#[test]
fn test_frames_accumulate_scroll() {
    let mut host = FakeHost::new(300, 300);
    let mut bg = background();
    bg.start(&mut host);

    for i in 0..10 {
        host.now = i as f64 / 60.0;
        assert!(host.run_frame(&mut bg));
    }
    assert!((bg.scroll_offset() - 5.0).abs() < 1e-5);
    assert_eq!(host.requested, 11);
}

#[test]
fn test_resize_rebuilds_grid_but_keeps_scroll() {
    let mut host = FakeHost::new(300, 300);
    let mut bg = background();
    bg.start(&mut host);
    host.run_frame(&mut bg);
    host.run_frame(&mut bg);
    let scroll = bg.scroll_offset();

    host.viewport = (120, 60);
    bg.resize(&mut host);

    assert_eq!(bg.grid().columns(), 20);
    assert_eq!(bg.grid().rows(), 10);
    assert_eq!(host.surface.size, (120, 60));
    assert_eq!(bg.scroll_offset(), scroll);
    assert_eq!(bg.phase(), LoopPhase::Running);
}

#[test]
fn test_start_without_surface_is_noop() {
    let mut host = FakeHost::new(500, 500);
    host.surface_available = false;
    let mut bg = background();

    bg.start(&mut host);
    assert_eq!(bg.phase(), LoopPhase::Uninitialized);
    assert_eq!(host.requested, 0);
    assert!(host.listeners.is_empty());

    host.surface_available = true;
    bg.start(&mut host);
    assert_eq!(bg.phase(), LoopPhase::Running);
}

#[test]
fn test_missing_surface_skips_frame_but_keeps_loop_alive() {
    let mut host = FakeHost::new(300, 300);
    let mut bg = background();
    bg.start(&mut host);

    host.surface_available = false;
    assert!(host.run_frame(&mut bg));
    assert_eq!(bg.scroll_offset(), 0.0);
    assert!(host.pending.is_some());

    host.surface_available = true;
    assert!(host.run_frame(&mut bg));
    assert_eq!(bg.scroll_offset(), 0.5);
}

#[test]
fn test_static_scene_does_not_scroll() {
    let mut host = FakeHost::new(300, 300);
    let settings = BackgroundSettings {
        scene: SceneMode::Pharaoh,
        palette: Palette::Emerald,
        ..Default::default()
    };
    let mut bg = LedBackground::with_seed(settings, 9);
    bg.start(&mut host);
    host.run_frame(&mut bg);
    assert_eq!(bg.scroll_offset(), 0.0);
}

#[test]
fn test_teardown_before_start() {
    let mut host = FakeHost::new(300, 300);
    let mut bg = background();
    bg.teardown(&mut host);
    assert_eq!(bg.phase(), LoopPhase::Stopped);
    assert!(host.cancelled.is_empty());

    bg.start(&mut host);
    assert_eq!(bg.phase(), LoopPhase::Stopped);
}
