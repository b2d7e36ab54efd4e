pub mod polyline;
pub mod rect;
pub mod text;

pub use polyline::PolylineCmd;
pub use rect::RectCmd;
pub use text::TextCmd;
