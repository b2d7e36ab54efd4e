//! Window and runtime loop.
//!
//! Owns the `winit` event loop and the window, and wires them to the GPU layer.

mod display;
mod runtime;

pub use display::{select_display_mode, DisplayMode, WindowMode};
pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
