//! Drawable mesh nodes
//!
//! A mesh node owns its GPU geometry and a model matrix. Its material,
//! parameters and textures are separate nodes it refers to by id; connecting
//! one of those to the mesh fills the matching slot.

use std::fmt;

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::api::{GpuMesh, UniformValue};
use crate::render::primitives::{Mesh, VertexFormat};
use crate::render::RenderResult;
use crate::scene::{FrameUniforms, LightNode, NodeId, NodeType, Scene, SceneNode};

/// Mesh payload of a scene node
pub struct MeshNode {
    mesh: Box<dyn GpuMesh>,
    material: Option<NodeId>,
    parameters: Option<NodeId>,
    textures: Vec<NodeId>,
    model: Mat4,
}

impl MeshNode {
    /// Wrap uploaded geometry with an identity model matrix
    pub fn new(mesh: Box<dyn GpuMesh>) -> Self {
        Self {
            mesh,
            material: None,
            parameters: None,
            textures: Vec::new(),
            model: Mat4::identity(),
        }
    }

    /// Route a newly connected child into its typed slot
    ///
    /// Returns false for kinds a mesh cannot reference.
    pub(crate) fn adopt(&mut self, child: NodeId, child_type: NodeType) -> bool {
        match child_type {
            NodeType::Material => self.material = Some(child),
            NodeType::MaterialParameters => self.parameters = Some(child),
            NodeType::Texture => self.textures.push(child),
            NodeType::Generic | NodeType::Camera | NodeType::Light | NodeType::Mesh => {
                log::warn!("A mesh cannot reference a {:?} node ({})", child_type, child);
                return false;
            }
        }
        true
    }

    /// Forget one edge to `child`
    ///
    /// Slots are only cleared with the `last_edge` to that node.
    pub(crate) fn release(&mut self, child: NodeId, last_edge: bool) {
        if last_edge && self.material == Some(child) {
            self.material = None;
        }
        if last_edge && self.parameters == Some(child) {
            self.parameters = None;
        }
        if let Some(index) = self.textures.iter().position(|&id| id == child) {
            self.textures.remove(index);
        }
    }

    /// Attached material node
    pub const fn material(&self) -> Option<NodeId> {
        self.material
    }

    /// Attached parameter node
    pub const fn parameters(&self) -> Option<NodeId> {
        self.parameters
    }

    /// Attached texture nodes in binding order
    pub fn textures(&self) -> &[NodeId] {
        &self.textures
    }

    /// Whether a material is attached; drawing requires one
    pub const fn has_material(&self) -> bool {
        self.material.is_some()
    }

    /// Whether parameters are attached
    pub const fn has_parameters(&self) -> bool {
        self.parameters.is_some()
    }

    /// Whether at least one texture is attached
    pub fn has_textures(&self) -> bool {
        !self.textures.is_empty()
    }

    /// Model matrix
    pub const fn model(&self) -> &Mat4 {
        &self.model
    }

    /// Replace the model matrix
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    /// Translate the model
    pub fn translate(&mut self, offset: &Vec3) {
        self.model = Mat4::translation(offset) * self.model;
    }

    /// Rotate the model about an axis through its local origin
    ///
    /// # Arguments
    /// * `angle` - Rotation in degrees
    /// * `axis` - Rotation axis in model space
    pub fn rotate(&mut self, angle: f32, axis: &Vec3) {
        self.model *= Mat4::rotation_degrees(angle, axis);
    }

    /// Re-upload the geometry
    pub fn update<V: VertexFormat>(&mut self, mesh: &Mesh<V>) -> RenderResult<()> {
        self.mesh.update(&mesh.as_upload())
    }

    /// GPU geometry
    pub fn gpu_mesh(&self) -> &dyn GpuMesh {
        self.mesh.as_ref()
    }

    /// Mutable GPU geometry
    pub fn gpu_mesh_mut(&mut self) -> &mut dyn GpuMesh {
        self.mesh.as_mut()
    }

    /// Draw the mesh with its material, parameters, textures and `lights`
    ///
    /// Uniforms are pushed in a fixed order: camera matrices and position,
    /// parameters, lights, then the texture flag when textures are attached.
    ///
    /// # Panics
    /// Panics if no material is attached; check [`MeshNode::has_material`].
    pub fn draw(&self, scene: &Scene, frame: &FrameUniforms, lights: &[&LightNode]) -> RenderResult<()> {
        let material = self
            .material
            .and_then(|id| scene.node(id))
            .and_then(SceneNode::as_material)
            .unwrap_or_else(|| panic!("mesh drawn without a material"));
        let program = material.program();

        self.mesh.bind();
        program.use_program()?;

        program.set_uniform("projection", frame.projection.into());
        program.set_uniform("view", frame.view.into());
        program.set_uniform("model", self.model.into());
        program.set_uniform("view_pos", frame.camera_position.into());

        if let Some(params) = self
            .parameters
            .and_then(|id| scene.node(id))
            .and_then(SceneNode::as_parameters)
        {
            for (name, value) in params.uniforms() {
                program.set_uniform(&name, value);
            }
        }

        let light_count = i32::try_from(lights.len()).unwrap_or(i32::MAX);
        program.set_uniform("nb_point_lights", UniformValue::Int(light_count));
        for (i, light) in lights.iter().enumerate() {
            let prefix = format!("pointLights[{i}]");
            program.set_uniform(&format!("{prefix}.color"), light.light.color.into());
            program.set_uniform(&format!("{prefix}.intensity"), light.light.intensity.into());
            program.set_uniform(&format!("{prefix}.range"), light.light.range.into());
            program.set_uniform(&format!("{prefix}.decay"), light.light.decay.into());
            program.set_uniform(&format!("{prefix}.position"), light.position.into());
        }

        if self.has_textures() {
            program.set_uniform("hasTex", true.into());
        }
        for texture in self.textures.iter().filter_map(|&id| scene.node(id)?.as_texture()) {
            texture.bind();
        }

        self.mesh.draw();
        Ok(())
    }
}

impl fmt::Debug for MeshNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshNode")
            .field("material", &self.material)
            .field("parameters", &self.parameters)
            .field("textures", &self.textures)
            .field("mode", &self.mesh.drawing_mode())
            .finish_non_exhaustive()
    }
}
