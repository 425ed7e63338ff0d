//! GLFW-based window management for OpenGL rendering
//!
//! Creates the window together with its OpenGL context, makes the context
//! current on the calling thread and exposes the GL function loader.
//! The window starts hidden; the engine shows it once the first GPU
//! resources exist.

use crate::core::config::{ContextConfig, WindowConfig};
use crate::events::AppEvent;
use crate::render::window::backend::WindowBackend;
use glfw::Context as _;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// `glfwInit` failed
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// `glfwCreateWindow` failed, usually because the context version is unavailable
    #[error("Window creation failed ({width}x{height}, OpenGL {major}.{minor})")]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested context major version
        major: u32,
        /// Requested context minor version
        minor: u32,
    },
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW error callback; env_logger sends it to stderr
#[allow(clippy::needless_pass_by_value)]
fn report_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {:?}: {}", error, description);
}

/// GLFW window wrapper with proper resource management
///
/// Field order matters: the window is dropped before the `Glfw` handle,
/// which terminates the library when the last handle goes away.
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Initialize GLFW, create a hidden window with a current OpenGL context
    /// and apply the swap interval
    pub fn new(window_config: &WindowConfig, context_config: &ContextConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(report_glfw_error).map_err(|e| {
            log::error!("glfwInit failed: {:?}", e);
            WindowError::InitializationFailed
        })?;

        glfw.default_window_hints();
        glfw.window_hint(glfw::WindowHint::Visible(false));
        glfw.window_hint(glfw::WindowHint::Resizable(window_config.resizable));
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        glfw.window_hint(glfw::WindowHint::ContextVersion(
            context_config.major,
            context_config.minor,
        ));
        if context_config.core_profile {
            glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
            // macOS only hands out core contexts that are forward compatible
            #[cfg(target_os = "macos")]
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        }

        let (mut window, events) = glfw
            .create_window(
                window_config.width,
                window_config.height,
                &window_config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed {
                width: window_config.width,
                height: window_config.height,
                major: context_config.major,
                minor: context_config.minor,
            })?;

        // Set up event polling
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);

        window.make_current();
        glfw.set_swap_interval(match window_config.swap_interval {
            0 => glfw::SwapInterval::None,
            n => glfw::SwapInterval::Sync(n),
        });

        log::info!(
            "Created {}x{} window \"{}\" with OpenGL {}.{} {} context",
            window_config.width,
            window_config.height,
            window_config.title,
            context_config.major,
            context_config.minor,
            if context_config.core_profile { "core" } else { "compat" }
        );

        Ok(Self {
            window,
            events,
            glfw,
        })
    }

    /// Load OpenGL function pointers through this window's context
    pub fn load_gl(&mut self) -> glow::Context {
        // SAFETY: the context was made current on this thread in `new` and
        // outlives the returned function table for as long as the window lives.
        unsafe { glow::Context::from_loader_function(|name| self.window.get_proc_address(name) as *const _) }
    }

    /// Version string of the linked GLFW library
    pub fn version_string() -> String {
        glfw::get_version_string()
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) -> Vec<AppEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| AppEvent::from_glfw(&event))
            .collect()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn get_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (u32::try_from(width).unwrap_or(0), u32::try_from(height).unwrap_or(0))
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_pos(x, y);
    }

    fn primary_monitor_size(&mut self) -> Option<(u32, u32)> {
        self.glfw.with_primary_monitor(|_, monitor| {
            monitor
                .and_then(|monitor| monitor.get_video_mode())
                .map(|mode| (mode.width, mode.height))
        })
    }

    fn show(&mut self) {
        self.window.show();
    }
}

impl Drop for GlfwWindow {
    fn drop(&mut self) {
        self.window.set_key_polling(false);
        self.window.set_close_polling(false);
        self.window.set_size_polling(false);
        self.window.set_framebuffer_size_polling(false);
        log::debug!("Destroying GLFW window");
    }
}
