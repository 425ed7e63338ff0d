//! Shader compilation and program linking
//!
//! Compiles a vertex and a fragment stage from source text and links them
//! into one program. Failures are reported through the info log and, under
//! the default [`ShaderErrorPolicy::Lenient`], do not stop initialization:
//! the program handle is returned either way and the render loop simply
//! draws with it.

use crate::core::config::ShaderErrorPolicy;
use crate::render::opengl::device::{GraphicsDevice, ProgramHandle, ShaderHandle, ShaderStage};
use crate::render::opengl::{RenderError, RenderResult};

/// Maximum number of info log bytes kept per stage or program
pub const INFO_LOG_LIMIT: usize = 512;

/// Pass-through vertex stage: attribute 0 is the clip-space position
pub const TRIANGLE_VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
  gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Solid orange fragment stage
pub const TRIANGLE_FRAGMENT_SHADER: &str = "#version 330 core
out vec4 FragColor;
void main()
{
  FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// What a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderTarget {
    /// A single compiled stage
    Stage(ShaderStage),
    /// The link step
    Program,
}

impl std::fmt::Display for ShaderTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stage(stage) => write!(f, "{stage} shader"),
            Self::Program => f.write_str("shader program"),
        }
    }
}

/// Outcome of one compile or link step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    /// Stage or program
    pub target: ShaderTarget,
    /// `GL_COMPILE_STATUS` / `GL_LINK_STATUS`
    pub success: bool,
    /// Info log, empty on success, at most [`INFO_LOG_LIMIT`] bytes
    pub log: String,
}

/// Linked shader program plus the diagnostics gathered while building it
#[derive(Debug)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    diagnostics: Vec<ShaderDiagnostic>,
}

impl ShaderProgram {
    /// Build the triangle program from the embedded sources
    pub fn triangle(device: &impl GraphicsDevice, policy: ShaderErrorPolicy) -> RenderResult<Self> {
        Self::build(device, TRIANGLE_VERTEX_SHADER, TRIANGLE_FRAGMENT_SHADER, policy)
    }

    /// Compile both stages and link them
    ///
    /// The intermediate stage objects are deleted once the program is linked.
    pub fn build(
        device: &impl GraphicsDevice,
        vertex_source: &str,
        fragment_source: &str,
        policy: ShaderErrorPolicy,
    ) -> RenderResult<Self> {
        let (vertex, vertex_diag) = compile_stage(device, ShaderStage::Vertex, vertex_source)?;
        if let Err(e) = enforce(policy, &vertex_diag) {
            device.delete_shader(vertex);
            return Err(e);
        }

        let (fragment, fragment_diag) = match compile_stage(device, ShaderStage::Fragment, fragment_source) {
            Ok(compiled) => compiled,
            Err(e) => {
                device.delete_shader(vertex);
                return Err(e);
            }
        };
        if let Err(e) = enforce(policy, &fragment_diag) {
            device.delete_shader(vertex);
            device.delete_shader(fragment);
            return Err(e);
        }

        let program = match device.create_program() {
            Ok(program) => program,
            Err(e) => {
                device.delete_shader(vertex);
                device.delete_shader(fragment);
                return Err(e);
            }
        };
        device.attach_shader(program, vertex);
        device.attach_shader(program, fragment);
        device.link_program(program);

        let link_diag = if device.program_link_status(program) {
            ShaderDiagnostic {
                target: ShaderTarget::Program,
                success: true,
                log: String::new(),
            }
        } else {
            let log = truncate_info_log(&device.program_info_log(program), INFO_LOG_LIMIT);
            log::error!("Shader program link error: {}", log);
            ShaderDiagnostic {
                target: ShaderTarget::Program,
                success: false,
                log,
            }
        };

        device.delete_shader(vertex);
        device.delete_shader(fragment);

        if let Err(e) = enforce(policy, &link_diag) {
            device.delete_program(program);
            return Err(e);
        }

        let shader_program = Self {
            handle: program,
            diagnostics: vec![vertex_diag, fragment_diag, link_diag],
        };
        if shader_program.is_valid() {
            log::info!("Shader program linked");
        } else {
            log::warn!("Continuing with a shader program that failed to build");
        }
        Ok(shader_program)
    }

    /// Program object handle
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Vertex, fragment and link diagnostics, in that order
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        &self.diagnostics
    }

    /// True when both stages compiled and the program linked
    pub fn is_valid(&self) -> bool {
        self.diagnostics.iter().all(|d| d.success)
    }

    /// Total bytes of error log text across all steps
    pub fn error_log_len(&self) -> usize {
        self.diagnostics.iter().map(|d| d.log.len()).sum()
    }

    /// Bind for drawing
    pub fn bind(&self, device: &impl GraphicsDevice) {
        device.use_program(Some(self.handle));
    }

    /// Delete the program object
    pub fn destroy(self, device: &impl GraphicsDevice) {
        device.delete_program(self.handle);
    }
}

fn compile_stage(
    device: &impl GraphicsDevice,
    stage: ShaderStage,
    source: &str,
) -> RenderResult<(ShaderHandle, ShaderDiagnostic)> {
    let shader = device.create_shader(stage)?;
    device.shader_source(shader, source);
    device.compile_shader(shader);

    let diagnostic = if device.shader_compile_status(shader) {
        log::debug!("Compiled {} shader", stage);
        ShaderDiagnostic {
            target: ShaderTarget::Stage(stage),
            success: true,
            log: String::new(),
        }
    } else {
        let log = truncate_info_log(&device.shader_info_log(shader), INFO_LOG_LIMIT);
        log::error!("{} shader compile error: {}", stage, log);
        ShaderDiagnostic {
            target: ShaderTarget::Stage(stage),
            success: false,
            log,
        }
    };
    Ok((shader, diagnostic))
}

fn enforce(policy: ShaderErrorPolicy, diagnostic: &ShaderDiagnostic) -> RenderResult<()> {
    if diagnostic.success || policy == ShaderErrorPolicy::Lenient {
        return Ok(());
    }
    Err(match diagnostic.target {
        ShaderTarget::Stage(stage) => RenderError::ShaderCompilation {
            stage,
            log: diagnostic.log.clone(),
        },
        ShaderTarget::Program => RenderError::ProgramLink {
            log: diagnostic.log.clone(),
        },
    })
}

/// Trim trailing NULs and whitespace, then cut to at most `limit` bytes on
/// a character boundary
pub fn truncate_info_log(log: &str, limit: usize) -> String {
    let trimmed = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
    if trimmed.len() <= limit {
        return trimmed.to_string();
    }
    let mut end = limit;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
