//! Graphics device abstraction
//!
//! These traits are the seam between the scene graph and a concrete graphics
//! API. The scene graph only ever talks to programs, meshes and textures
//! through them, so a driver-backed device and the headless recording device
//! are interchangeable.

use std::path::Path;

use bitflags::bitflags;

use crate::assets::{ImageData, ResourceManager};
use crate::render::api::{MeshUpload, UniformValue};
use crate::render::RenderResult;

/// Programmable pipeline stage a shader source is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
    /// Geometry shader
    Geometry,
    /// Compute shader
    Compute,
    /// Tessellation control shader
    TessControl,
    /// Tessellation evaluation shader
    TessEvaluation,
}

bitflags! {
    /// Buffers cleared at the start of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color buffer
        const COLOR = 1 << 0;
        /// Depth buffer
        const DEPTH = 1 << 1;
        /// Stencil buffer
        const STENCIL = 1 << 2;
    }
}

/// Primitive topology used when drawing a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawingMode {
    /// Isolated points
    Points,
    /// Independent line segments
    Lines,
    /// Closed polyline
    LineLoop,
    /// Open polyline
    LineStrip,
    /// Independent triangles
    #[default]
    Triangles,
    /// Triangle strip
    TriangleStrip,
    /// Triangle fan
    TriangleFan,
}

/// A linked shader program
pub trait ShaderProgram {
    /// Compile `source` and attach it for the given stage
    fn compile_source(&mut self, source: &str, stage: ShaderStage) -> RenderResult<()>;

    /// Read a shader source through the resource provider and compile it
    ///
    /// # Arguments
    /// * `path` - Shader path relative to the resource root
    /// * `resources` - Resource provider the source is read from
    /// * `stage` - Pipeline stage
    fn compile_file(
        &mut self,
        path: &Path,
        resources: &ResourceManager,
        stage: ShaderStage,
    ) -> RenderResult<()> {
        let source = resources.read_string(path)?;
        log::debug!("Compiling {:?} shader {}", stage, path.display());
        self.compile_source(&source, stage)
    }

    /// Link all compiled stages into an executable program
    fn link(&mut self) -> RenderResult<()>;

    /// Whether [`ShaderProgram::link`] has succeeded
    fn is_linked(&self) -> bool;

    /// Make this program current for subsequent uniform updates and draws
    fn use_program(&self) -> RenderResult<()>;

    /// Assign a value to a named uniform of this program
    ///
    /// Unknown names are ignored, matching how GPU drivers treat inactive
    /// uniforms.
    fn set_uniform(&self, name: &str, value: UniformValue);
}

/// Vertex and index buffers uploaded to the GPU
pub trait GpuMesh {
    /// Bind the vertex array for drawing
    fn bind(&self);

    /// Issue the draw call for the whole mesh
    fn draw(&self);

    /// Replace the geometry with new data
    fn update(&mut self, upload: &MeshUpload<'_>) -> RenderResult<()>;

    /// Topology used by [`GpuMesh::draw`]
    fn drawing_mode(&self) -> DrawingMode;

    /// Change the topology used by [`GpuMesh::draw`]
    fn set_drawing_mode(&mut self, mode: DrawingMode);
}

/// A 2D RGBA texture uploaded to the GPU
pub trait GpuTexture {
    /// Bind the texture for sampling
    fn bind(&self);

    /// Replace the pixels with a new image
    fn update(&mut self, image: &ImageData) -> RenderResult<()>;

    /// Width and height in pixels
    fn size(&self) -> (u32, u32);
}

/// Factory for GPU resources and owner of frame-level state
pub trait GraphicsDevice {
    /// Create an empty, unlinked shader program
    fn create_program(&mut self) -> Box<dyn ShaderProgram>;

    /// Upload mesh geometry
    fn create_mesh(&mut self, upload: &MeshUpload<'_>) -> RenderResult<Box<dyn GpuMesh>>;

    /// Upload a texture image
    fn create_texture(&mut self, image: &ImageData) -> RenderResult<Box<dyn GpuTexture>>;

    /// Clear the selected buffers of the current framebuffer
    fn clear(&mut self, color: [f32; 4], flags: ClearFlags);

    /// Set the viewport rectangle in framebuffer pixels
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Human-readable backend name for logs
    fn backend_name(&self) -> &'static str;
}
