//! GPU objects shared by initialization and the render loop

use crate::core::config::ShaderErrorPolicy;
use crate::render::opengl::{GraphicsDevice, RenderResult, ShaderProgram, TriangleMesh};

/// The one program and the one mesh drawn every frame
#[derive(Debug)]
pub struct SceneResources {
    program: ShaderProgram,
    mesh: TriangleMesh,
}

impl SceneResources {
    /// Build the triangle program, then upload the triangle mesh
    pub fn create(device: &impl GraphicsDevice, policy: ShaderErrorPolicy) -> RenderResult<Self> {
        let program = ShaderProgram::triangle(device, policy)?;
        let mesh = match TriangleMesh::triangle(device) {
            Ok(mesh) => mesh,
            Err(e) => {
                program.destroy(device);
                return Err(e);
            }
        };
        Ok(Self { program, mesh })
    }

    /// Shader program
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Triangle mesh
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Clear, bind and issue the frame's single draw call
    pub fn draw_frame(&self, device: &impl GraphicsDevice) {
        device.clear_color_and_depth();
        self.program.bind(device);
        self.mesh.draw(device);
    }

    /// Delete the program, vertex array and buffer
    pub fn release(self, device: &impl GraphicsDevice) {
        self.program.destroy(device);
        self.mesh.destroy(device);
    }
}
