//! # Application Configuration
//!
//! Every setting the engine reads lives here. The defaults reproduce the
//! fixed hello-triangle setup exactly: an 800x600 "OpenGL Test!" window, a
//! 3.3 core context with vsync, and a dark green clear colour. A config
//! file only needs to name the values it changes.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging
//! - **Window Config**: size, title, swap interval, placement
//! - **Context Config**: requested OpenGL version and profile
//! - **Renderer Config**: clear colour, shader error policy, shutdown cleanup

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use crate::config::{Config, ConfigError};

/// Lowest context version the embedded `#version 330 core` shaders accept
pub const MIN_CONTEXT_VERSION: (u32, u32) = (3, 3);

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, used when `RUST_LOG` is not set
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Client area width in screen coordinates
    pub width: u32,
    /// Client area height in screen coordinates
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Buffer swap interval; 1 syncs presentation to the display refresh
    pub swap_interval: u32,
    /// Center the window on the primary monitor before showing it
    pub center_on_primary_monitor: bool,
}

impl WindowConfig {
    /// Create a window configuration with the given title and size
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            resizable: true,
            swap_interval: 1,
            center_on_primary_monitor: true,
        }
    }

    /// Validate the window settings
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Window title cannot be empty".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(format!("Window size {}x{} is too large", self.width, self.height));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("OpenGL Test!", 800, 600)
    }
}

/// # OpenGL Context Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Requested major version
    pub major: u32,
    /// Requested minor version
    pub minor: u32,
    /// Request a core profile instead of a compatibility profile
    pub core_profile: bool,
}

impl ContextConfig {
    /// Validate the requested context version
    pub fn validate(&self) -> Result<(), String> {
        if (self.major, self.minor) < MIN_CONTEXT_VERSION {
            return Err(format!(
                "OpenGL {}.{} is below the required {}.{}",
                self.major, self.minor, MIN_CONTEXT_VERSION.0, MIN_CONTEXT_VERSION.1
            ));
        }
        Ok(())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: MIN_CONTEXT_VERSION.0,
            minor: MIN_CONTEXT_VERSION.1,
            core_profile: true,
        }
    }
}

/// What to do when a shader stage fails to compile or the program fails to link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderErrorPolicy {
    /// Log the info log and keep going with whatever program resulted
    #[default]
    Lenient,
    /// Fail initialization
    Strict,
}

/// # Renderer Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// RGBA colour the framebuffer is cleared to every frame
    pub clear_color: [f32; 4],
    /// Shader failure handling
    pub shader_error_policy: ShaderErrorPolicy,
    /// Delete the program, vertex array and buffer at shutdown.
    /// Off by default; the context teardown reclaims them.
    pub release_gpu_resources: bool,
}

impl RendererConfig {
    /// Set the clear colour
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Set the shader error policy
    pub fn with_shader_error_policy(mut self, policy: ShaderErrorPolicy) -> Self {
        self.shader_error_policy = policy;
        self
    }

    /// Validate the renderer settings
    pub fn validate(&self) -> Result<(), String> {
        if self.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(format!(
                "Clear colour components must be within [0, 1], got {:?}",
                self.clear_color
            ));
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.05, 0.12, 0.05, 0.0],
            shader_error_policy: ShaderErrorPolicy::Lenient,
            release_gpu_resources: false,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Window configuration
    pub window: WindowConfig,
    /// OpenGL context configuration
    pub context: ContextConfig,
    /// Rendering configuration
    pub renderer: RendererConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate().map_err(ConfigError::Invalid)?;
        self.context.validate().map_err(ConfigError::Invalid)?;
        self.renderer.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults if it is
    /// missing, unreadable or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        Self::from_load_result(path, Self::load(path))
    }

    /// Report the outcome of [`load`](Self::load) and fall back to defaults
    /// on error
    ///
    /// Lets a caller read the file before a logger exists and report the
    /// result once logging is up.
    pub fn from_load_result(path: &Path, result: Result<Self, ConfigError>) -> Self {
        match result {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Failed to load {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

impl Config for ApplicationConfig {}
