//! Shape renderers.
//!
//! Each renderer queues instances for its command type during a frame,
//! uploads them once, then draws instance ranges on demand so that
//! [`SceneRenderer`](crate::render::SceneRenderer) can interleave kinds in
//! paint order.

mod common;

pub mod line;
pub mod rect;
pub mod text;

pub use line::LineRenderer;
pub use rect::RectRenderer;
pub use text::TextRenderer;
