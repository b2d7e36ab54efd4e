//! Coordinate and geometry types.
//!
//! Two spaces are in play:
//! - world space: simulation units, origin bottom-left, +Y up
//! - screen space: logical pixels (DPI-aware), origin top-left, +Y down
//!
//! `OrthoCamera` maps the first onto the second; the draw list and renderers
//! only ever see screen space.

mod camera;
mod rect;
mod vec2;
mod viewport;

pub use camera::OrthoCamera;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{ExtendViewport, Viewport};
