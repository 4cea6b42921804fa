//! Built-in materials
//!
//! Each kind pairs a vertex and a fragment shader under `shaders/OpenGL/`,
//! read through the resource provider.

use std::path::Path;

use crate::assets::ResourceManager;
use crate::render::api::{GraphicsDevice, ShaderStage};
use crate::render::material::Material;
use crate::render::RenderResult;

const MESH_VERTEX_SHADER: &str = "shaders/OpenGL/mesh.vert";
const SKINNED_VERTEX_SHADER: &str = "shaders/OpenGL/skinned.vert";

/// Built-in material kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Normals as colors
    Normal,
    /// Texture coordinates as colors
    Parametric,
    /// Diffuse-only lighting
    Lambertian,
    /// Phong lighting
    Phong,
    /// Phong lighting on a skinned mesh
    PhongAnimated,
    /// Metallic-roughness PBR lighting
    MetallicRoughness,
}

impl MaterialKind {
    /// Vertex and fragment shader paths relative to the resource root
    pub const fn shader_paths(self) -> (&'static str, &'static str) {
        match self {
            Self::Normal => (MESH_VERTEX_SHADER, "shaders/OpenGL/normals.frag"),
            Self::Parametric => (MESH_VERTEX_SHADER, "shaders/OpenGL/parametric.frag"),
            Self::Lambertian => (MESH_VERTEX_SHADER, "shaders/OpenGL/lambertian.frag"),
            Self::Phong => (MESH_VERTEX_SHADER, "shaders/OpenGL/phong.frag"),
            Self::PhongAnimated => (SKINNED_VERTEX_SHADER, "shaders/OpenGL/phong.frag"),
            Self::MetallicRoughness => {
                (MESH_VERTEX_SHADER, "shaders/OpenGL/metallic_roughness.frag")
            }
        }
    }
}

/// Compile and link a built-in material
///
/// # Errors
/// Fails if a shader source is missing or unreadable, or if the device rejects
/// the program.
pub fn create_material(
    kind: MaterialKind,
    device: &mut dyn GraphicsDevice,
    resources: &ResourceManager,
) -> RenderResult<Material> {
    let (vertex, fragment) = kind.shader_paths();
    log::info!("Creating {:?} material", kind);

    let mut program = device.create_program();
    program.compile_file(Path::new(vertex), resources, ShaderStage::Vertex)?;
    program.compile_file(Path::new(fragment), resources, ShaderStage::Fragment)?;
    program.link()?;
    Ok(Material::new(program))
}
