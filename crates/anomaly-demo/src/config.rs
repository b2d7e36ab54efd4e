use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use winit::dpi::LogicalSize;

use anomaly_engine::coords::Vec2;
use anomaly_engine::device::GpuInit;
use anomaly_engine::logging::LoggingConfig;
use anomaly_engine::window::{RuntimeConfig, WindowMode};

/// Which sample runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Background, outlines and overlay only.
    Shapes,
    /// Adds the rapier world with the player and the spinning anomaly.
    Physics,
}

/// How the background is painted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BackgroundMode {
    /// One rect per world row (the fill-rate stress case).
    Banded,
    /// A single gradient rect.
    Gradient,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub time_step: Duration,
    pub velocity_iterations: u32,
    /// Kept for parity with Box2D-style configs; rapier has a single solver loop.
    pub position_iterations: u32,
    pub gravity: Vec2,
    /// Steps per frame before surplus time is dropped; `None` is unbounded.
    pub max_catch_up: Option<u32>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            time_step: Duration::from_nanos(1_000_000_000 / 60),
            velocity_iterations: 6,
            position_iterations: 2,
            gravity: Vec2::zero(),
            max_catch_up: Some(8),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Units per second while a direction key is held.
    pub speed: f32,
    /// Collider vertices around the body origin.
    pub vertices: Vec<Vec2>,
    /// Rotation origin of the visual polygon, relative to its first vertex.
    pub visual_origin: Vec2,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 250.0,
            vertices: vec![Vec2::new(-15.0, -10.0), Vec2::new(15.0, 0.0), Vec2::new(-15.0, 10.0)],
            visual_origin: Vec2::new(15.0, 10.0),
            density: 1.0,
            friction: 0.5,
            restitution: 0.3,
            linear_damping: 2.5,
            angular_damping: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyConfig {
    pub half_extent: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Spin applied every frame, degrees per second.
    pub spin_deg_per_sec: f32,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { half_extent: 50.0, friction: 0.4, restitution: 0.1, spin_deg_per_sec: 90.0 }
    }
}

/// Full demo configuration. CLI flags are folded onto [`DemoConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub scene: SceneKind,
    pub background: BackgroundMode,
    pub vsync: bool,
    /// Try exclusive fullscreen at `fullscreen_mode` before falling back to windowed.
    pub fullscreen: bool,
    pub fullscreen_mode: (u32, u32, u32),
    pub windowed_size: (u32, u32),
    /// Minimum visible world size for the extend viewport.
    pub world_min: Vec2,
    pub font: Option<PathBuf>,
    pub debug_draw: bool,
    pub log_filter: Option<String>,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub anomaly: AnomalyConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Anomaly".to_string(),
            scene: SceneKind::Physics,
            background: BackgroundMode::Banded,
            vsync: false,
            fullscreen: true,
            fullscreen_mode: (3840, 2160, 60),
            windowed_size: (1920, 1080),
            world_min: Vec2::new(1000.0, 1000.0),
            font: None,
            debug_draw: true,
            log_filter: None,
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            anomaly: AnomalyConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        let (w, h) = self.windowed_size;
        let (fw, fh, hz) = self.fullscreen_mode;
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(w as f64, h as f64),
            mode: if self.fullscreen {
                WindowMode::Fullscreen { width: fw, height: fh, refresh_hz: hz }
            } else {
                WindowMode::Windowed
            },
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default().with_vsync(self.vsync)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log_filter {
            Some(filter) => LoggingConfig::default().with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }
}

/// Command-line flags for the demo binary.
#[derive(Debug, Parser)]
#[command(name = "anomaly-demo", about = "Fixed-timestep 2D physics sample")]
pub struct Cli {
    /// Sample to run
    #[arg(long, value_enum, default_value_t = SceneKind::Physics)]
    pub scene: SceneKind,

    /// Background painting strategy
    #[arg(long, value_enum, default_value_t = BackgroundMode::Banded)]
    pub background: BackgroundMode,

    /// Enable vertical sync
    #[arg(long)]
    pub vsync: bool,

    /// Skip the fullscreen attempt and open a window
    #[arg(long)]
    pub windowed: bool,

    /// Maximum physics steps per frame (0 = unbounded)
    #[arg(long, default_value_t = 8)]
    pub max_catch_up: u32,

    /// TrueType/OpenType font for the overlay (default: first system font found)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Start with collider debug drawing off (F1 toggles)
    #[arg(long)]
    pub no_debug_draw: bool,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> DemoConfig {
        let mut config = DemoConfig::default();
        config.scene = self.scene;
        config.background = self.background;
        config.vsync = self.vsync;
        config.fullscreen = !self.windowed;
        config.physics.max_catch_up = (self.max_catch_up > 0).then_some(self.max_catch_up);
        config.font = self.font;
        config.debug_draw = !self.no_debug_draw;
        config.log_filter = self.log;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DemoConfig {
        let mut argv = vec!["anomaly-demo"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().into_config()
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn no_flags_match_default_config() {
        assert_eq!(parse(&[]), DemoConfig::default());
    }

    #[test]
    fn defaults_mirror_the_performance_sample() {
        let c = DemoConfig::default();
        assert!(!c.vsync);
        assert_eq!(c.physics.velocity_iterations, 6);
        assert_eq!(c.physics.position_iterations, 2);
        assert_eq!(c.physics.gravity, Vec2::zero());
        assert_eq!(c.player.speed, 250.0);
        assert_eq!(c.anomaly.half_extent, 50.0);
        assert_eq!(
            c.runtime_config().mode,
            WindowMode::Fullscreen { width: 3840, height: 2160, refresh_hz: 60 }
        );
    }

    // ── flags ─────────────────────────────────────────────────────────────

    #[test]
    fn flags_override_defaults() {
        let c = parse(&[
            "--scene",
            "shapes",
            "--background",
            "gradient",
            "--vsync",
            "--windowed",
            "--max-catch-up",
            "0",
            "--no-debug-draw",
            "--log",
            "debug",
        ]);
        assert_eq!(c.scene, SceneKind::Shapes);
        assert_eq!(c.background, BackgroundMode::Gradient);
        assert!(c.vsync);
        assert_eq!(c.runtime_config().mode, WindowMode::Windowed);
        assert_eq!(c.physics.max_catch_up, None);
        assert!(!c.debug_draw);
        assert_eq!(c.log_filter.as_deref(), Some("debug"));
        assert!(c.gpu_init().vsync);
    }

    #[test]
    fn unknown_scene_is_rejected() {
        assert!(Cli::try_parse_from(["anomaly-demo", "--scene", "teapot"]).is_err());
    }
}
