use anyhow::Context;

use anomaly_engine::coords::{ExtendViewport, OrthoCamera, Viewport};
use anomaly_engine::core::{App, AppControl, FrameCtx};
use anomaly_engine::input::Key;
use anomaly_engine::paint::Color;
use anomaly_engine::render::SceneRenderer;
use anomaly_engine::scene::DrawList;
use anomaly_engine::text::{discover_system_font, FontId, FontSystem};
use anomaly_engine::time::{FixedStepper, FpsCounter};

use crate::background::push_background;
use crate::config::DemoConfig;
use crate::overlay::push_overlay;
use crate::stage::Stage;

/// Application context: owns the simulation, the camera and the renderers.
pub struct DemoApp {
    config: DemoConfig,
    stage: Stage,
    stepper: FixedStepper,
    viewport: ExtendViewport,
    camera: OrthoCamera,
    fps: FpsCounter,
    fonts: FontSystem,
    font: Option<FontId>,
    renderer: SceneRenderer,
    draw_list: DrawList,
    debug_draw: bool,
}

impl DemoApp {
    pub fn new(config: DemoConfig) -> anyhow::Result<Self> {
        let min = config.world_min;
        let stage = Stage::new(&config, min).context("failed to set up the stage")?;
        let stepper = FixedStepper::new(config.physics.time_step).with_max_catch_up(config.physics.max_catch_up);

        let mut fonts = FontSystem::new();
        let font = match config.font.clone().or_else(discover_system_font) {
            Some(path) => match fonts.load_font_file(&path) {
                Ok(id) => Some(id),
                Err(err) => {
                    log::warn!("overlay disabled: {err}");
                    None
                }
            },
            None => {
                log::warn!("overlay disabled: no font given and no system font found");
                None
            }
        };

        let debug_draw = config.debug_draw;
        Ok(Self {
            config,
            stage,
            stepper,
            viewport: ExtendViewport::new(min.x, min.y),
            camera: OrthoCamera::new(min.x, min.y),
            fps: FpsCounter::new(),
            fonts,
            font,
            renderer: SceneRenderer::new(),
            draw_list: DrawList::new(),
            debug_draw,
        })
    }

    fn build_frame(&mut self, physical: (u32, u32)) {
        self.draw_list.clear();

        push_background(&mut self.draw_list, &self.camera, self.viewport.world_size(), self.config.background);
        self.stage.push_world(&mut self.draw_list, &self.camera, self.debug_draw);
        if let Some(font) = self.font {
            push_overlay(&mut self.draw_list, font, self.fps.fps(), physical);
        }
    }
}

impl App for DemoApp {
    fn on_resize(&mut self, size: Viewport) {
        self.viewport.update(size);
        self.viewport.apply(&mut self.camera, true);
        let world = self.viewport.world_size();
        log::debug!("resize: {}x{} px, world {}x{}", size.width, size.height, world.x, world.y);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.is_down(Key::Escape) {
            log::info!("escape held, exiting");
            return AppControl::Exit;
        }
        if ctx.input.just_pressed(Key::F1) {
            self.debug_draw = !self.debug_draw;
            log::info!("debug draw {}", if self.debug_draw { "on" } else { "off" });
        }

        self.fps.record_frame(ctx.time.delta);

        self.stage.apply_controls(ctx.input);
        self.stepper.advance(ctx.time.delta, &mut self.stage);
        self.stage.sync_visuals();

        self.build_frame(ctx.window.physical_size());

        let Self { renderer, draw_list, fonts, .. } = self;
        ctx.render(Color::BLACK, |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        })
    }

    fn on_shutdown(&mut self) {
        log::info!(
            "shutting down after {} physics steps ({} scene)",
            self.stepper.total_steps(),
            if self.stage.has_physics() { "physics" } else { "shapes" }
        );
    }
}
