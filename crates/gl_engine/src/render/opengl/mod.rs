//! OpenGL backend
//!
//! GLFW window/context creation, the GL device seam, and the two pieces of
//! GPU setup the engine performs: one shader program and one mesh.

pub mod device;
pub mod geometry;
pub mod shader;
pub mod window;

pub use device::{
    BufferHandle, GlowDevice, GraphicsDevice, InfoString, ProgramHandle, ShaderHandle,
    ShaderStage, Topology, VertexArrayHandle, VertexAttribute,
};
pub use geometry::{TriangleMesh, Vertex, TRIANGLE_VERTICES};
pub use shader::{ShaderDiagnostic, ShaderProgram, ShaderTarget, INFO_LOG_LIMIT};
pub use window::{GlfwWindow, WindowError, WindowResult};

use thiserror::Error;

/// OpenGL rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The driver refused to create an object
    #[error("Failed to create {kind}: {reason}")]
    ObjectCreation {
        /// Object type, e.g. "shader"
        kind: &'static str,
        /// Driver message
        reason: String,
    },

    /// A shader stage failed to compile under the strict policy
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompilation {
        /// Stage that failed
        stage: ShaderStage,
        /// Truncated info log
        log: String,
    },

    /// The program failed to link under the strict policy
    #[error("Shader program failed to link: {log}")]
    ProgramLink {
        /// Truncated info log
        log: String,
    },

    /// Geometry upload was given no vertices
    #[error("Cannot upload a mesh with no vertices")]
    EmptyGeometry,
}

/// Result alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
