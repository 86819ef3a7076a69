//! Interfaces the embedding environment provides to the animation.

use crate::color::Rgba;

/// A 2D surface that can be cleared and filled with colored rectangles.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface, discarding its contents.
    fn set_size(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);
}

/// Handle for a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for a resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The window or terminal that owns the drawing surface.
///
/// The host calls [`LedBackground::frame`](crate::LedBackground::frame) once a
/// requested frame is due and [`LedBackground::resize`](crate::LedBackground::resize)
/// when a subscribed resize fires. Both are invoked from the same thread.
pub trait Host {
    type Surface: Surface;

    /// The drawing surface, or `None` while it is not available.
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    /// Viewport size in pixels.
    fn viewport(&self) -> (u32, u32);

    /// Wall-clock time in seconds.
    fn now_seconds(&self) -> f64;

    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    fn subscribe_resize(&mut self) -> ListenerId;

    fn unsubscribe_resize(&mut self, id: ListenerId);
}
