use crate::coords::Viewport;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// The implementor is the application context: it owns simulation and
/// rendering state and receives `&mut self` in every callback.
pub trait App {
    /// Called once the window exists and after every resize, with the
    /// drawable area in logical pixels.
    fn on_resize(&mut self, size: Viewport) {
        let _ = size;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the event loop is exiting, before GPU resources drop.
    fn on_shutdown(&mut self) {}
}
