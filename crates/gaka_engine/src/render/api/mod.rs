//! Public rendering API
//!
//! Capability traits implemented by graphics backends, plus the value types
//! that cross them.

pub mod device;
pub mod uniform;
pub mod upload;

pub use device::{
    ClearFlags, DrawingMode, GpuMesh, GpuTexture, GraphicsDevice, ShaderProgram, ShaderStage,
};
pub use uniform::{UniformCategory, UniformValue};
pub use upload::{AttributeKind, MeshUpload, VertexAttribute};
