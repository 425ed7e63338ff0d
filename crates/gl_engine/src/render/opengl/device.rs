//! OpenGL device seam
//!
//! [`GraphicsDevice`] is the narrow slice of OpenGL the engine uses. The
//! shader, geometry and frame code only see this trait, so they can be
//! exercised against a recording device in tests. [`GlowDevice`] is the
//! real implementation on top of `glow`.

use std::marker::PhantomData;
use std::num::NonZeroU32;

use glow::HasContext;

use crate::render::opengl::{RenderError, RenderResult};

/// Linked program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub NonZeroU32);

/// Shader stage object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub NonZeroU32);

/// Vertex array object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub NonZeroU32);

/// Buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub NonZeroU32);

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Runs once per vertex
    Vertex,
    /// Runs once per fragment
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Primitive topology for draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three vertices form a separate triangle
    Triangles,
}

impl Topology {
    fn gl_enum(self) -> u32 {
        match self {
            Self::Triangles => glow::TRIANGLES,
        }
    }
}

/// Driver information strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoString {
    /// `GL_VENDOR`
    Vendor,
    /// `GL_RENDERER`
    Renderer,
    /// `GL_VERSION`
    Version,
}

impl InfoString {
    fn gl_enum(self) -> u32 {
        match self {
            Self::Vendor => glow::VENDOR,
            Self::Renderer => glow::RENDERER,
            Self::Version => glow::VERSION,
        }
    }
}

/// Layout of one float vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader `location`
    pub index: u32,
    /// Number of `f32` components
    pub components: i32,
    /// Normalize fixed-point data
    pub normalized: bool,
    /// Bytes between consecutive vertices
    pub stride: i32,
    /// Byte offset of the first component
    pub offset: i32,
}

/// The OpenGL calls the engine makes
///
/// Implementations require the GL context to be current on the calling
/// thread for every method.
pub trait GraphicsDevice {
    /// Read a driver information string
    fn info_string(&self, which: InfoString) -> String;

    /// Create a shader object for `stage`
    fn create_shader(&self, stage: ShaderStage) -> RenderResult<ShaderHandle>;
    /// Replace the shader's source text
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    /// Compile the shader's current source
    fn compile_shader(&self, shader: ShaderHandle);
    /// `GL_COMPILE_STATUS`
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    /// Full shader info log
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    /// Flag the shader for deletion
    fn delete_shader(&self, shader: ShaderHandle);

    /// Create an empty program object
    fn create_program(&self) -> RenderResult<ProgramHandle>;
    /// Attach a shader stage to a program
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    /// Link the attached stages
    fn link_program(&self, program: ProgramHandle);
    /// `GL_LINK_STATUS`
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    /// Full program info log
    fn program_info_log(&self, program: ProgramHandle) -> String;
    /// Bind a program for drawing, or unbind with `None`
    fn use_program(&self, program: Option<ProgramHandle>);
    /// Delete a program object
    fn delete_program(&self, program: ProgramHandle);

    /// Create a vertex array object
    fn create_vertex_array(&self) -> RenderResult<VertexArrayHandle>;
    /// Bind a vertex array, or unbind with `None`
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>);
    /// Delete a vertex array object
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);

    /// Create a buffer object
    fn create_buffer(&self) -> RenderResult<BufferHandle>;
    /// Bind `GL_ARRAY_BUFFER`, or unbind with `None`
    fn bind_array_buffer(&self, buffer: Option<BufferHandle>);
    /// Fill the bound `GL_ARRAY_BUFFER` with `GL_STATIC_DRAW` data
    fn array_buffer_data_static(&self, data: &[u8]);
    /// Delete a buffer object
    fn delete_buffer(&self, buffer: BufferHandle);

    /// Describe a float attribute sourced from the bound array buffer
    fn vertex_attrib_pointer_f32(&self, attribute: &VertexAttribute);
    /// Enable an attribute array
    fn enable_vertex_attrib_array(&self, index: u32);

    /// Set the viewport rectangle
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Set the clear colour
    fn clear_color(&self, rgba: [f32; 4]);
    /// Clear the colour and depth buffers
    fn clear_color_and_depth(&self);
    /// Draw `count` vertices starting at `first`
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
}

/// [`GraphicsDevice`] backed by a `glow` function table
///
/// Not `Send`: GL calls must stay on the thread that owns the context.
pub struct GlowDevice {
    gl: glow::Context,
    _not_send: PhantomData<*const ()>,
}

impl GlowDevice {
    /// Wrap a loaded function table
    ///
    /// The context it was loaded from must stay current on this thread for
    /// the lifetime of the device.
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            _not_send: PhantomData,
        }
    }
}

fn object_error(kind: &'static str) -> impl FnOnce(String) -> RenderError {
    move |reason| RenderError::ObjectCreation { kind, reason }
}

// SAFETY (all blocks below): `GlowDevice::new` requires the context to be
// current on this thread, and `GlowDevice` is `!Send`. Handles only come
// from this device's own `create_*` calls.
impl GraphicsDevice for GlowDevice {
    fn info_string(&self, which: InfoString) -> String {
        unsafe { self.gl.get_parameter_string(which.gl_enum()) }
    }

    fn create_shader(&self, stage: ShaderStage) -> RenderResult<ShaderHandle> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }
            .map(|shader| ShaderHandle(shader.0))
            .map_err(object_error("shader"))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader.0)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn create_program(&self) -> RenderResult<ProgramHandle> {
        unsafe { self.gl.create_program() }
            .map(|program| ProgramHandle(program.0))
            .map_err(object_error("program"))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0));
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { self.gl.link_program(glow::NativeProgram(program.0)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program.0)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn create_vertex_array(&self) -> RenderResult<VertexArrayHandle> {
        unsafe { self.gl.create_vertex_array() }
            .map(|vao| VertexArrayHandle(vao.0))
            .map_err(object_error("vertex array"))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(|v| glow::NativeVertexArray(v.0)));
        }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(vertex_array.0)) }
    }

    fn create_buffer(&self) -> RenderResult<BufferHandle> {
        unsafe { self.gl.create_buffer() }
            .map(|buffer| BufferHandle(buffer.0))
            .map_err(object_error("buffer"))
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer.map(|b| glow::NativeBuffer(b.0)));
        }
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
    }

    fn vertex_attrib_pointer_f32(&self, attribute: &VertexAttribute) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attribute.index,
                attribute.components,
                glow::FLOAT,
                attribute.normalized,
                attribute.stride,
                attribute.offset,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_color_and_depth(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(topology.gl_enum(), first, count) }
    }
}
