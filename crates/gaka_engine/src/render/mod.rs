//! Rendering system
//!
//! ## Organization
//!
//! - **`api`**: capability traits a graphics backend implements
//! - **`backends`**: the headless recording backend
//! - **`primitives`**: vertices, meshes and the flying camera
//! - **`lighting`**: point lights
//! - **`material`**: shader programs and their parameters
//! - **`window`**: window and input collaborators
//! - **`renderer`**: the façade that owns the scene and draws it

pub mod api;
pub mod backends;
pub mod lighting;
pub mod material;
pub mod primitives;
pub mod renderer;
pub mod window;

pub use api::{
    ClearFlags, DrawingMode, GpuMesh, GpuTexture, GraphicsDevice, MeshUpload, ShaderProgram,
    ShaderStage, UniformValue,
};
pub use lighting::PointLight;
pub use material::{Material, MaterialKind, MaterialParameters, ParameterBag};
pub use primitives::{FlyingCamera, Mesh, SkinnedVertex, Vertex};
pub use renderer::{FrameStats, Renderer};

use thiserror::Error;

use crate::assets::AssetError;
use crate::render::window::WindowError;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// A shader stage failed to compile
    #[error("{stage:?} shader compilation failed: {message}")]
    ShaderCompilation {
        /// Stage being compiled
        stage: ShaderStage,
        /// Compiler log
        message: String,
    },

    /// Program linking failed
    #[error("Program link failed: {0}")]
    ProgramLink(String),

    /// A program was used before being linked
    #[error("Program used before it was linked")]
    ProgramNotLinked,

    /// GPU resource creation or update failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// An asset the renderer needed could not be loaded
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The window system failed
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
