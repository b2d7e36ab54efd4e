//! Input subsystem.
//!
//! Public API is platform-agnostic; `platform` translates window-system events
//! into `InputEvent`s. Apps only see the per-frame `InputSnapshot`.

mod frame;
pub mod platform;
mod snapshot;
mod state;
mod types;

pub use frame::InputFrame;
pub use snapshot::InputSnapshot;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
