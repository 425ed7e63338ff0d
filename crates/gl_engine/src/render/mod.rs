//! # Rendering System
//!
//! OpenGL rendering for a single static triangle.
//!
//! - **window**: the [`WindowBackend`] trait the engine drives
//! - **opengl**: GLFW window/context, the [`GraphicsDevice`] seam, shader
//!   program and mesh upload
//! - **scene**: the program + mesh pair the render loop draws

pub mod opengl;
pub mod scene;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use opengl::{
    GlfwWindow, GlowDevice, GraphicsDevice, RenderError, RenderResult, ShaderProgram,
    TriangleMesh, Vertex, WindowError,
};
pub use scene::SceneResources;
pub use window::WindowBackend;
