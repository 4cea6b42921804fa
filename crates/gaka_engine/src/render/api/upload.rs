//! CPU-side view of geometry handed to [`GraphicsDevice::create_mesh`]
//!
//! [`GraphicsDevice::create_mesh`]: crate::render::api::GraphicsDevice::create_mesh

use crate::render::api::DrawingMode;

/// Scalar type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// 32-bit floats
    Float,
    /// 32-bit signed integers
    Int,
}

/// Layout of one vertex attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute name in the vertex shader
    pub name: &'static str,
    /// Shader input location
    pub location: u32,
    /// Number of components (1 to 4)
    pub components: u32,
    /// Component scalar type
    pub kind: AttributeKind,
    /// Byte offset from the start of the vertex
    pub offset: usize,
}

/// Interleaved vertex bytes plus indices, ready for upload
#[derive(Debug, Clone, Copy)]
pub struct MeshUpload<'a> {
    /// Raw vertex bytes
    pub vertex_bytes: &'a [u8],
    /// Size of one vertex in bytes
    pub stride: usize,
    /// Attribute layout shared by every vertex
    pub attributes: &'static [VertexAttribute],
    /// Triangle (or other primitive) indices; empty for non-indexed drawing
    pub indices: &'a [u32],
    /// Primitive topology
    pub mode: DrawingMode,
}

impl MeshUpload<'_> {
    /// Number of vertices in the upload
    pub const fn vertex_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.vertex_bytes.len() / self.stride
        }
    }

    /// Number of elements a draw call consumes
    pub const fn element_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertex_count()
        } else {
            self.indices.len()
        }
    }
}
