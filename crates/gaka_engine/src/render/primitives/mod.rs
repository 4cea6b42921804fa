//! Core primitive types for rendering
//!
//! Geometry containers and the flying camera.

pub mod camera;
pub mod mesh;

pub use camera::FlyingCamera;
pub use mesh::{Mesh, SkinnedVertex, Vertex, VertexFormat, MAX_BONE_INFLUENCES};
