use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

use super::display::{select_display_mode, DisplayMode, WindowMode};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Windowed size; also used when fullscreen is unavailable.
    pub initial_size: LogicalSize<f64>,
    pub mode: WindowMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "anomaly".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            mode: WindowMode::Windowed,
        }
    }
}

/// Requests from the app to the runtime, applied after the callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit_requested: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until exit. Returns after the app's
    /// `on_shutdown` hook has run and GPU resources are released.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    shut_down: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            shut_down: false,
            startup_error: None,
        }
    }

    fn window_attributes(&self, event_loop: &ActiveEventLoop) -> WindowAttributes {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let WindowMode::Fullscreen { width, height, refresh_hz } = self.config.mode else {
            return attrs;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());

        match monitor.and_then(|m| find_video_mode(&m, width, height, refresh_hz)) {
            Some(mode) => {
                log::info!("fullscreen {width}x{height}@{refresh_hz}Hz");
                attrs.with_fullscreen(Some(Fullscreen::Exclusive(mode)))
            }
            None => {
                log::info!(
                    "display mode {width}x{height}@{refresh_hz}Hz unavailable; opening windowed"
                );
                attrs
            }
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = self.window_attributes(event_loop);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let size = window.inner_size();
        log::info!("window created ({}x{} physical)", size.width, size.height);

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let logical = entry.with_window(|w| WindowCtx { window: w }.logical_size());
        self.app.on_resize(logical);
        entry.with_window(|w| w.request_redraw());

        self.window = Some(entry);
        Ok(())
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn handle_resize(&mut self) {
        let Some(entry) = self.window.as_mut() else { return };
        let size = entry.with_window(|w| w.inner_size());
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        let logical = entry.with_window(|w| WindowCtx { window: w }.logical_size());
        self.app.on_resize(logical);
        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let app = &mut self.app;
        let Some(entry) = self.window.as_mut() else { return };

        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let input = fields.input_state.snapshot(fields.input_frame);

            {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    input: &input,
                    time,
                    runtime: &mut runtime_ctx,
                };
                control = app.on_frame(&mut ctx);
            }

            fields.input_frame.clear();
        });

        if control == AppControl::Exit || runtime_ctx.exit_requested() {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw: the simulation advances every frame.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            return;
        }

        let Some(entry) = self.window.as_mut() else { return };

        if let Some(ev) = translate_window_event(&event) {
            entry.with_mut(|fields| fields.input_state.apply_event(fields.input_frame, ev));
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.request_exit(event_loop);
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.handle_resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.app.on_shutdown();
        // GPU objects borrow the window; the entry drops both in order.
        if self.window.take().is_some() {
            log::info!("window and GPU resources released");
        }
    }
}

fn find_video_mode(
    monitor: &MonitorHandle,
    width: u32,
    height: u32,
    refresh_hz: u32,
) -> Option<winit::monitor::VideoModeHandle> {
    let handles: Vec<_> = monitor.video_modes().collect();
    let modes: Vec<DisplayMode> = handles
        .iter()
        .map(|h| DisplayMode {
            width: h.size().width,
            height: h.size().height,
            refresh_millihertz: h.refresh_rate_millihertz(),
            bit_depth: h.bit_depth(),
        })
        .collect();

    let index = select_display_mode(&modes, width, height, refresh_hz)?;
    handles.into_iter().nth(index)
}
