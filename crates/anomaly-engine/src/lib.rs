//! Anomaly engine crate.
//!
//! Fixed-timestep simulation driving, plus the platform and GPU runtime
//! pieces (window, input, 2D shape rendering) used by the demo.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
