//! Fixed-timestep 2D physics sample built on `anomaly-engine`.
//!
//! A kinematic box spins at the world center while a keyboard-driven
//! triangle moves around it, over a banded background with an FPS overlay.

pub mod app;
pub mod background;
pub mod config;
pub mod controls;
pub mod overlay;
pub mod physics;
pub mod stage;
pub mod visual;

pub use app::DemoApp;
pub use config::{Cli, DemoConfig};
