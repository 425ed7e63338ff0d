//! # GL Engine
//!
//! A deliberately small OpenGL engine: one GLFW window, one shader
//! program, one triangle, drawn until the window closes.
//!
//! ## Features
//!
//! - **GLFW Windowing**: hidden-until-ready window, core-profile context, vsync
//! - **Shader Pipeline**: compile/link with info-log diagnostics
//! - **Static Geometry**: one vertex array backed by one static buffer
//! - **Config Files**: optional TOML/RON overrides of every constant
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::load_or_default("triangle.toml");
//!     let mut engine = Engine::new(config)?;
//!     engine.run();
//!     engine.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod input;
pub mod render;

mod engine;

pub use engine::{ContextInfo, Engine, EngineError, LoopState, LoopSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{
            ApplicationConfig, Config, ContextConfig, EngineConfig, RendererConfig,
            ShaderErrorPolicy, WindowConfig,
        },
        events::AppEvent,
        foundation::logging,
        input::{KeyAction, KeyCode},
        render::{GlfwWindow, GraphicsDevice, SceneResources, WindowBackend},
        ContextInfo, Engine, EngineError, LoopState, LoopSummary,
    };
}
