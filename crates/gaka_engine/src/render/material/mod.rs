//! Material system
//!
//! A [`Material`] is a linked shader program. The values fed to it live in a
//! separate [`MaterialParameters`] bag so several meshes can share one program
//! with different parameters.
//!
//! # Material Kinds
//!
//! - **Normal**: visualises normals
//! - **Parametric**: visualises texture coordinates
//! - **Lambertian**: diffuse shading
//! - **Phong**: Blinn-Phong shading, optionally skinned
//! - **Metallic-roughness**: physically based shading

pub mod factory;
pub mod parameters;

pub use factory::{create_material, MaterialKind};
pub use parameters::{MaterialParameters, ParameterBag};

use crate::render::api::ShaderProgram;

/// A linked shader program used to draw meshes
pub struct Material {
    program: Box<dyn ShaderProgram>,
}

impl Material {
    /// Wrap an already linked program
    pub fn new(program: Box<dyn ShaderProgram>) -> Self {
        Self { program }
    }

    /// The program meshes are drawn with
    pub fn program(&self) -> &dyn ShaderProgram {
        self.program.as_ref()
    }

    /// Mutable access to the program
    pub fn program_mut(&mut self) -> &mut dyn ShaderProgram {
        self.program.as_mut()
    }
}

impl std::fmt::Debug for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("linked", &self.program.is_linked())
            .finish()
    }
}
