//! Mesh representation for 3D models
//!
//! CPU-side geometry: interleaved vertices plus triangle indices. Vertex types
//! are plain `#[repr(C)]` structs that can be reinterpreted as bytes for upload.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

use crate::render::api::{AttributeKind, DrawingMode, MeshUpload, VertexAttribute};

/// Interleaved vertex layout known to the graphics device
pub trait VertexFormat: Pod {
    /// Attribute layout, locations matching the vertex shaders
    const ATTRIBUTES: &'static [VertexAttribute];
}

/// Vertex with position, normal and texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

impl VertexFormat for Vertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            name: "position",
            location: 0,
            components: 3,
            kind: AttributeKind::Float,
            offset: offset_of!(Vertex, position),
        },
        VertexAttribute {
            name: "normal",
            location: 1,
            components: 3,
            kind: AttributeKind::Float,
            offset: offset_of!(Vertex, normal),
        },
        VertexAttribute {
            name: "texCoords",
            location: 2,
            components: 2,
            kind: AttributeKind::Float,
            offset: offset_of!(Vertex, tex_coord),
        },
    ];
}

/// Maximum number of bones influencing one skinned vertex
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Vertex deformed by up to four skeleton bones
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SkinnedVertex {
    /// Position in bind pose
    pub position: [f32; 3],
    /// Normal vector in bind pose
    pub normal: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
    /// Number of valid entries in `bone_indices`
    pub bone_count: i32,
    /// Skeleton bone indices
    pub bone_indices: [i32; MAX_BONE_INFLUENCES],
    /// Blend weight of each bone, summing to 1
    pub bone_weights: [f32; MAX_BONE_INFLUENCES],
}

impl SkinnedVertex {
    /// Create a skinned vertex from a plain vertex and its bone influences
    ///
    /// Influences beyond [`MAX_BONE_INFLUENCES`] are dropped.
    pub fn new(vertex: Vertex, influences: &[(usize, f32)]) -> Self {
        let mut skinned = Self {
            position: vertex.position,
            normal: vertex.normal,
            tex_coord: vertex.tex_coord,
            ..Self::default()
        };
        for (slot, &(bone, weight)) in influences.iter().take(MAX_BONE_INFLUENCES).enumerate() {
            skinned.bone_indices[slot] = i32::try_from(bone).unwrap_or(0);
            skinned.bone_weights[slot] = weight;
            skinned.bone_count += 1;
        }
        skinned
    }
}

impl VertexFormat for SkinnedVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            name: "position",
            location: 0,
            components: 3,
            kind: AttributeKind::Float,
            offset: offset_of!(SkinnedVertex, position),
        },
        VertexAttribute {
            name: "normal",
            location: 1,
            components: 3,
            kind: AttributeKind::Float,
            offset: offset_of!(SkinnedVertex, normal),
        },
        VertexAttribute {
            name: "texCoords",
            location: 2,
            components: 2,
            kind: AttributeKind::Float,
            offset: offset_of!(SkinnedVertex, tex_coord),
        },
        VertexAttribute {
            name: "nbBones",
            location: 3,
            components: 1,
            kind: AttributeKind::Int,
            offset: offset_of!(SkinnedVertex, bone_count),
        },
        VertexAttribute {
            name: "bonesIndices",
            location: 4,
            components: 4,
            kind: AttributeKind::Int,
            offset: offset_of!(SkinnedVertex, bone_indices),
        },
        VertexAttribute {
            name: "bonesWeight",
            location: 5,
            components: 4,
            kind: AttributeKind::Float,
            offset: offset_of!(SkinnedVertex, bone_weights),
        },
    ];
}

/// Geometry made of vertices and indices
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V = Vertex> {
    /// Vertex data
    pub vertices: Vec<V>,
    /// Index data
    pub indices: Vec<u32>,
    /// Primitive topology
    pub mode: DrawingMode,
}

impl<V: VertexFormat> Mesh<V> {
    /// Create an indexed triangle mesh
    pub fn new(vertices: Vec<V>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            mode: DrawingMode::Triangles,
        }
    }

    /// Use a different primitive topology
    #[must_use]
    pub fn with_mode(mut self, mode: DrawingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Borrow the geometry as an upload for the graphics device
    pub fn as_upload(&self) -> MeshUpload<'_> {
        MeshUpload {
            vertex_bytes: bytemuck::cast_slice(&self.vertices),
            stride: size_of::<V>(),
            attributes: V::ATTRIBUTES,
            indices: &self.indices,
            mode: self.mode,
        }
    }

    /// Whether every index refers to an existing vertex
    pub fn indices_in_bounds(&self) -> bool {
        self.indices
            .iter()
            .all(|&index| (index as usize) < self.vertices.len())
    }
}

impl Mesh<Vertex> {
    /// Axis-aligned cube of half-extent 1 centered at the origin
    ///
    /// Every face has its own four vertices so normals stay flat.
    pub fn cube() -> Self {
        // (normal, tangent u, tangent v)
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = u32::try_from(vertices.len()).unwrap_or(u32::MAX);
            for (su, sv) in corners {
                let position = [
                    normal[0] + su * u[0] + sv * v[0],
                    normal[1] + su * u[1] + sv * v[1],
                    normal[2] + su * u[2] + sv * v[2],
                ];
                let tex_coord = [(su + 1.0) * 0.5, (sv + 1.0) * 0.5];
                vertices.push(Vertex::new(position, normal, tex_coord));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self::new(vertices, indices)
    }

    /// Square in the XZ plane of half-extent `half_size`, facing +Y
    pub fn plane(half_size: f32) -> Self {
        let n = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex::new([-half_size, 0.0, half_size], n, [0.0, 0.0]),
            Vertex::new([half_size, 0.0, half_size], n, [1.0, 0.0]),
            Vertex::new([half_size, 0.0, -half_size], n, [1.0, 1.0]),
            Vertex::new([-half_size, 0.0, -half_size], n, [0.0, 1.0]),
        ];
        Self::new(vertices, vec![0, 1, 2, 2, 3, 0])
    }
}
