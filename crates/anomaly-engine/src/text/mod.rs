//! Font loading and measurement.

mod font_system;

pub use font_system::{discover_system_font, FontId, FontLoadError, FontSystem};
