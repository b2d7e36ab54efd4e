//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! CPU geometry is in logical pixels (top-left origin, +Y down); vertex
//! shaders convert to NDC using a viewport uniform.

mod atlas;
mod ctx;
mod scene_renderer;

pub mod shapes;

pub use atlas::ShelfPacker;
pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
