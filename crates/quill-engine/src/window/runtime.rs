use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, error, info};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::canvas::{Canvas, CanvasConfig, FrameOutcome};
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::{translate_window_event, InputState};
use crate::render::{PolygonBatch, PolygonRenderer, RenderCtx, RenderTarget};
use crate::time::{FrameClock, FramePacer, DEFAULT_TICK_RATE};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Frames per second the loop is held to.
    pub tick_rate: f64,
    pub canvas: CanvasConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "quill".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            tick_rate: DEFAULT_TICK_RATE,
            canvas: CanvasConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    ///
    /// Window or GPU initialisation failures abort startup and are returned.
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
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
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

    canvas: Canvas,
    input: InputState,
    clock: FrameClock,
    pacer: FramePacer,
    batch: PolygonBatch,
    renderer: PolygonRenderer,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            canvas: Canvas::new(config.canvas.clone()),
            pacer: FramePacer::new(config.tick_rate),
            config,
            gpu_init,
            app,
            input: InputState::new(),
            clock: FrameClock::new(),
            batch: PolygonBatch::new(),
            renderer: PolygonRenderer::new(),
            entry: None,
            exit_requested: false,
            startup_error: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };

        let now = Instant::now();
        self.pacer.frame_started(now);
        let time = self.clock.tick_at(now);

        let size = entry.borrow_gpu().size();
        let control = {
            let mut ctx = FrameCtx {
                canvas: &mut self.canvas,
                input: &mut self.input,
                time,
                window_size: (size.width, size.height),
            };
            self.app.on_frame(&mut ctx)
        };

        if control == AppControl::Exit {
            info!("app requested exit");
            self.request_exit(event_loop);
            return;
        }

        if !entry.borrow_gpu().is_drawable() {
            // Minimised: redraw once a real size comes back.
            self.canvas.invalidate();
            return;
        }

        if let FrameOutcome::Retained = self.canvas.present(&mut self.batch) {
            return;
        }

        let (renderer, batch) = (&mut self.renderer, &self.batch);
        let result = entry.with_mut(|fields| draw_batch(fields.window, fields.gpu, renderer, batch));

        if let Err(action) = result {
            // The frame never reached the screen.
            self.canvas.invalidate();
            if action == SurfaceErrorAction::Fatal {
                error!("fatal surface error; exiting");
                self.request_exit(event_loop);
            }
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                info!("window \"{}\" created", self.config.title);
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(e) => {
                error!("failed to create window: {e:#}");
                self.startup_error = Some(e);
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.entry.as_ref() else { return };

        let now = Instant::now();
        if self.pacer.is_due(now) {
            entry.with_window(|w| w.request_redraw());
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline(now)));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            self.input.apply_event(&ev);
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                debug!("close requested");
                self.entry = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    debug!("resized to {}x{}", new_size.width, new_size.height);
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
                self.canvas.invalidate();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
                self.canvas.invalidate();
            }

            WindowEvent::RedrawRequested => self.run_frame(event_loop),

            _ => {}
        }
    }
}

/// Acquires a surface frame, draws `batch` into it and presents it.
fn draw_batch(
    window: &Window,
    gpu: &mut Gpu<'_>,
    renderer: &mut PolygonRenderer,
    batch: &PolygonBatch,
) -> std::result::Result<(), SurfaceErrorAction> {
    let mut frame = match gpu.begin_frame() {
        Ok(f) => f,
        Err(err) => return Err(gpu.handle_surface_error(err)),
    };

    // RenderTarget borrows the frame; dropped before submit() takes it.
    {
        let rctx = RenderCtx::from_gpu(gpu);
        let mut target = RenderTarget::from_frame(&mut frame);
        renderer.render(&rctx, &mut target, batch);
    }

    window.pre_present_notify();
    gpu.submit(frame);
    Ok(())
}
