use crate::scene::shapes::polyline::PolylineCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command, in logical pixels with a top-left origin.
///
/// Each variant has a push helper under `scene::shapes` and a matching
/// renderer under `render::shapes`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Polyline(PolylineCmd),
    Text(TextCmd),
}
