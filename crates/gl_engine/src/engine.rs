//! Core engine implementation
//!
//! Initialization builds the window, the GL device and the scene
//! resources; [`Engine::run`] then draws until the window is asked to
//! close. Everything happens on the calling thread.

use crate::core::config::{ApplicationConfig, ConfigError};
use crate::events::AppEvent;
use crate::render::opengl::device::InfoString;
use crate::render::window::centered_position;
use crate::render::{
    GlfwWindow, GlowDevice, GraphicsDevice, RenderError, SceneResources, WindowBackend, WindowError,
};
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window or context could not be created
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// GPU resources could not be created
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Driver strings read right after the context becomes current
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    /// `GL_VENDOR`
    pub vendor: String,
    /// `GL_RENDERER`
    pub renderer: String,
    /// `GL_VERSION`
    pub version: String,
}

impl ContextInfo {
    /// Query the driver strings
    pub fn query(device: &impl GraphicsDevice) -> Self {
        Self {
            vendor: device.info_string(InfoString::Vendor),
            renderer: device.info_string(InfoString::Renderer),
            version: device.info_string(InfoString::Version),
        }
    }
}

/// Render loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Drawing frames
    Running,
    /// A close was requested; the loop exits at the next check
    Closing,
}

/// What the render loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Frames drawn and presented
    pub frames: u64,
}

/// Main engine struct
///
/// Owns the window, the GL device and the scene resources. Fields drop in
/// declaration order, so the window (and its context) goes last.
pub struct Engine<W: WindowBackend = GlfwWindow, D: GraphicsDevice = GlowDevice> {
    scene: SceneResources,
    device: D,
    window: W,
    config: ApplicationConfig,
    context_info: ContextInfo,
    state: LoopState,
}

impl Engine {
    /// Create the GLFW window and GL context, then initialize the scene
    pub fn new(config: ApplicationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let mut window = GlfwWindow::new(&config.window, &config.context)?;
        let device = GlowDevice::new(window.load_gl());
        Self::with_backends(window, device, config)
    }
}

impl<W: WindowBackend, D: GraphicsDevice> Engine<W, D> {
    /// Initialize the scene on an existing window and device
    ///
    /// The context must already be current. Order: read driver strings,
    /// center the window, build the shader program, upload the mesh, set
    /// the viewport, show the window.
    pub fn with_backends(mut window: W, device: D, config: ApplicationConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let context_info = ContextInfo::query(&device);
        log::debug!("Vendor: {}", context_info.vendor);
        log::debug!("Renderer: {}", context_info.renderer);
        log::info!("OpenGL version: {}", context_info.version);

        if config.window.center_on_primary_monitor {
            center_window(&mut window);
        }

        let scene = SceneResources::create(&device, config.renderer.shader_error_policy)?;

        let width = i32::try_from(config.window.width).unwrap_or(i32::MAX);
        let height = i32::try_from(config.window.height).unwrap_or(i32::MAX);
        device.viewport(0, 0, width, height);

        window.show();
        log::info!("Engine initialized");

        Ok(Self {
            scene,
            device,
            window,
            config,
            context_info,
            state: LoopState::Running,
        })
    }

    /// Driver strings queried during initialization
    pub fn context_info(&self) -> &ContextInfo {
        &self.context_info
    }

    /// Scene resources drawn each frame
    pub fn scene(&self) -> &SceneResources {
        &self.scene
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Draw frames until the window is asked to close
    pub fn run(&mut self) -> LoopSummary {
        self.device.clear_color(self.config.renderer.clear_color);

        log::info!("Starting main loop...");
        let mut frames = 0;
        while self.update_state() == LoopState::Running {
            self.render_frame();
            frames += 1;
        }

        let summary = LoopSummary { frames };
        log::info!("Main loop finished after {} frames", summary.frames);
        summary
    }

    /// Draw, present, then handle the events that arrived meanwhile
    pub fn render_frame(&mut self) {
        self.scene.draw_frame(&self.device);
        self.window.swap_buffers();

        for event in self.window.poll_events() {
            self.handle_event(event);
        }
        log::trace!("Frame presented");
    }

    /// Destroy the window and terminate the windowing system
    ///
    /// GPU objects are left to the context teardown unless
    /// `renderer.release_gpu_resources` is set.
    pub fn shutdown(self) {
        let Self {
            scene,
            device,
            window,
            config,
            ..
        } = self;

        if config.renderer.release_gpu_resources {
            scene.release(&device);
            log::debug!("Released shader program and triangle mesh");
        } else {
            log::debug!("Leaving shader program and triangle mesh to context teardown");
        }

        drop(device);
        drop(window);
        log::info!("Engine shutdown complete");
    }

    fn update_state(&mut self) -> LoopState {
        if self.window.should_close() {
            self.state = LoopState::Closing;
        }
        self.state
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => {
                log::info!("Window close requested");
            }
            AppEvent::KeyInput { .. } if event.is_quit_request() => {
                log::info!("Escape released, closing window");
                self.window.set_should_close(true);
            }
            AppEvent::WindowResized { width, height } | AppEvent::FramebufferResized { width, height } => {
                log::debug!("Resized to {}x{}, viewport unchanged", width, height);
            }
            AppEvent::KeyInput { .. } => {}
        }
    }
}

fn center_window(window: &mut impl WindowBackend) {
    match window.primary_monitor_size() {
        Some(monitor) => {
            let (x, y) = centered_position(monitor, window.get_size());
            window.set_position(x, y);
            log::debug!("Centered window at ({}, {})", x, y);
        }
        None => log::warn!("No primary monitor video mode; leaving window position unchanged"),
    }
}
