//! Vertex data and GPU upload
//!
//! One vertex array object backed by one static vertex buffer. The buffer
//! is filled once and never touched again; draws only bind the vertex array.

use bytemuck::{Pod, Zeroable};

use crate::render::opengl::device::{
    BufferHandle, GraphicsDevice, Topology, VertexArrayHandle, VertexAttribute,
};
use crate::render::opengl::{RenderError, RenderResult};

/// Position-only vertex, tightly packed
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip-space position
    pub position: [f32; 3],
}

impl Vertex {
    /// Attribute 0: three floats at offset 0
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const POSITION_ATTRIBUTE: VertexAttribute = VertexAttribute {
        index: 0,
        components: 3,
        normalized: false,
        stride: std::mem::size_of::<Self>() as i32,
        offset: 0,
    };

    /// Create a vertex at `(x, y, z)`
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }
}

/// The hello-triangle vertices
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.05, -0.05, 0.0),
    Vertex::new(0.0, 0.05, 0.0),
];

/// Vertex array and its backing buffer
#[derive(Debug)]
pub struct TriangleMesh {
    vertex_array: VertexArrayHandle,
    vertex_buffer: BufferHandle,
    vertex_count: i32,
}

impl TriangleMesh {
    /// Upload [`TRIANGLE_VERTICES`]
    pub fn triangle(device: &impl GraphicsDevice) -> RenderResult<Self> {
        Self::upload(device, &TRIANGLE_VERTICES)
    }

    /// Create a vertex array and a static buffer holding `vertices`
    ///
    /// Both objects are unbound again before returning so later state
    /// changes cannot modify them by accident.
    pub fn upload(device: &impl GraphicsDevice, vertices: &[Vertex]) -> RenderResult<Self> {
        if vertices.is_empty() {
            return Err(RenderError::EmptyGeometry);
        }
        let vertex_count = i32::try_from(vertices.len()).map_err(|_| RenderError::ObjectCreation {
            kind: "vertex buffer",
            reason: format!("{} vertices exceed the draw call limit", vertices.len()),
        })?;

        let vertex_array = device.create_vertex_array()?;
        let vertex_buffer = match device.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                device.delete_vertex_array(vertex_array);
                return Err(e);
            }
        };

        device.bind_vertex_array(Some(vertex_array));
        device.bind_array_buffer(Some(vertex_buffer));
        device.array_buffer_data_static(bytemuck::cast_slice(vertices));

        device.vertex_attrib_pointer_f32(&Vertex::POSITION_ATTRIBUTE);
        device.enable_vertex_attrib_array(Vertex::POSITION_ATTRIBUTE.index);

        device.bind_array_buffer(None);
        device.bind_vertex_array(None);

        log::info!("Uploaded {} vertices", vertex_count);
        Ok(Self {
            vertex_array,
            vertex_buffer,
            vertex_count,
        })
    }

    /// Vertex array handle used for drawing
    pub fn vertex_array(&self) -> VertexArrayHandle {
        self.vertex_array
    }

    /// Backing buffer handle
    pub fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    /// Number of vertices in the buffer
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Bind the vertex array and draw every vertex as triangles
    pub fn draw(&self, device: &impl GraphicsDevice) {
        device.bind_vertex_array(Some(self.vertex_array));
        device.draw_arrays(Topology::Triangles, 0, self.vertex_count);
    }

    /// Delete the vertex array and buffer
    pub fn destroy(self, device: &impl GraphicsDevice) {
        device.delete_vertex_array(self.vertex_array);
        device.delete_buffer(self.vertex_buffer);
    }
}
