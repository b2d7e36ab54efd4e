//! Draw stream types.
//!
//! Frames record renderer-agnostic commands into a [`DrawList`]; ordering is
//! deterministic (z layer, then insertion order).

mod cmd;
mod list;
mod order;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
