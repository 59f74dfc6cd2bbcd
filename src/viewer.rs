//! Standalone window playing the animation, backed by winit.
//!
//! ```no_run
//! # use duoball::Viewer;
//! Viewer::builder()
//!     .with_title("Loading")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Keys: `Space` toggles the animation, `R` restarts it, `Escape` quits.

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    error::EventLoopError,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::DuoballError;
use crate::gpu::{BallRenderer, RenderContext};
use crate::options::Options;
use crate::render::paint;
use crate::util::density::Density;
use crate::view::LoadingView;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
    autostart: bool,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: None,
            autostart: true,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title (defaults to the options' title).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the animation starts as soon as the window opens.
    #[must_use]
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.viewer.title = title;
        }
        Viewer {
            options,
            autostart: self.autostart,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that plays the loading animation.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    autostart: bool,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`DuoballError::Gpu`] if the GPU cannot be brought up, and
    /// [`DuoballError::Viewer`] if the window or event loop fails.
    pub fn run(self) -> Result<(), DuoballError> {
        let event_loop = EventLoop::new()
            .map_err(|e| DuoballError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            renderer: None,
            view: LoadingView::with_options(&self.options),
            options: self.options,
            autostart: self.autostart,
            startup_error: None,
        };

        let result = event_loop.run_app(&mut app);
        finish(result, app.startup_error.take())
    }
}

/// Combine the event loop outcome with a failure that ended start-up.
fn finish(
    result: Result<(), EventLoopError>,
    startup_error: Option<DuoballError>,
) -> Result<(), DuoballError> {
    if let Some(e) = startup_error {
        return Err(e);
    }
    result.map_err(|e| DuoballError::Viewer(e.to_string()))
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    renderer: Option<BallRenderer>,
    view: LoadingView,
    options: Options,
    autostart: bool,
    startup_error: Option<DuoballError>,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Follow the window's scale factor unless the options pin a density.
    fn sync_density(&mut self, scale_factor: f64) {
        if self.options.viewer.density.is_none() {
            self.view.set_density(Density::new(scale_factor as f32));
        }
    }

    fn toggle(&mut self) {
        if self.view.is_running() {
            self.view.stop();
        } else {
            self.view.start();
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(renderer)) =
            (&self.window, &mut self.renderer)
        else {
            return;
        };

        let _ = self.view.on_frame(Instant::now());
        let invalidation = self.view.take_invalidation();
        if invalidation.needs_layout() {
            let (w, h) = self.view.preferred_size();
            window.set_min_inner_size(Some(PhysicalSize::new(w, h)));
        }

        match paint(&self.view, renderer) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (w, h) = viewport_size(window.inner_size());
                renderer.resize(w, h);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        // Keep ticking while the clock runs (pauses included)
        if self.view.is_running() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let viewer = &self.options.viewer;
        let attrs = Window::default_attributes()
            .with_title(&viewer.title)
            .with_inner_size(LogicalSize::new(
                viewer.window_width,
                viewer.window_height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.startup_error = Some(DuoballError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (vp_w, vp_h),
        )) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to initialize GPU: {e}");
                self.startup_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        let renderer = BallRenderer::new(context, viewer.background);

        self.sync_density(window.scale_factor());
        self.view.on_attach();
        if self.autostart {
            self.view.start();
        }
        log::info!(
            "viewer started at {vp_w}x{vp_h}, density {}",
            self.view.density().factor()
        );

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.view.on_detach();
            event_loop.exit();
            return;
        }

        // Guard: both window and renderer must be initialised.
        if self.window.is_none() || self.renderer.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(w, h);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.sync_density(scale_factor);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match code {
                    KeyCode::Space => self.toggle(),
                    KeyCode::KeyR => self.view.start(),
                    KeyCode::Escape => {
                        self.view.on_detach();
                        event_loop.exit();
                        return;
                    }
                    _ => return,
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}
