//! # Scene
//!
//! The scene owns every node in an id-keyed table. Nodes refer to each other
//! only by [`NodeId`], so parents, mesh slots and the active camera are
//! resolved through the table whenever they are used. Nodes are never removed,
//! which keeps every handed-out id valid for the lifetime of the scene.

use std::collections::BTreeMap;

use crate::assets::ImageData;
use crate::foundation::math::Vec3;
use crate::render::api::GraphicsDevice;
use crate::render::lighting::PointLight;
use crate::render::material::{Material, MaterialParameters};
use crate::render::primitives::{FlyingCamera, Mesh, VertexFormat};
use crate::render::RenderResult;
use crate::scene::{LightNode, MeshNode, NodeId, NodeKind, NodeType, SceneNode, TextureNode};

/// Scene graph with a single generic root
#[derive(Debug)]
pub struct Scene {
    nodes: BTreeMap<NodeId, SceneNode>,
    next_id: u64,
    active_camera: Option<NodeId>,
}

impl Scene {
    /// Create a scene holding only the root node
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(NodeId::ROOT, SceneNode::new(NodeId::ROOT, NodeKind::Generic));
        Self {
            nodes,
            next_id: 1,
            active_camera: None,
        }
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        log::debug!("Added {:?} node {}", kind.node_type(), id);
        self.nodes.insert(id, SceneNode::new(id, kind));
        id
    }

    /// Add an empty grouping node
    pub fn add_node(&mut self) -> NodeId {
        self.insert(NodeKind::Generic)
    }

    /// Add a camera node
    pub fn add_camera(&mut self, camera: FlyingCamera) -> NodeId {
        self.insert(NodeKind::Camera(camera))
    }

    /// Add a point light at a world position
    pub fn add_light(&mut self, light: PointLight, position: Vec3) -> NodeId {
        self.insert(NodeKind::Light(LightNode { light, position }))
    }

    /// Add a material node
    pub fn add_material(&mut self, material: Material) -> NodeId {
        self.insert(NodeKind::Material(material))
    }

    /// Add a parameter node
    pub fn add_material_parameters(&mut self, parameters: MaterialParameters) -> NodeId {
        self.insert(NodeKind::MaterialParameters(parameters))
    }

    /// Upload an image and add it as a texture node
    pub fn add_texture(
        &mut self,
        device: &mut dyn GraphicsDevice,
        image: &ImageData,
    ) -> RenderResult<NodeId> {
        let texture = device.create_texture(image)?;
        Ok(self.insert(NodeKind::Texture(TextureNode::new(texture))))
    }

    /// Upload geometry meant to be drawn with `material` and add it as a mesh node
    ///
    /// Returns `Ok(None)` without uploading anything when `material` is not a
    /// material node. The material still has to be connected to the mesh
    /// before the mesh can be drawn.
    pub fn add_mesh<V: VertexFormat>(
        &mut self,
        device: &mut dyn GraphicsDevice,
        mesh: &Mesh<V>,
        material: NodeId,
    ) -> RenderResult<Option<NodeId>> {
        if self.node_type(material) != Some(NodeType::Material) {
            log::warn!("Cannot add mesh: {} is not a material node", material);
            return Ok(None);
        }
        let gpu_mesh = device.create_mesh(&mesh.as_upload())?;
        Ok(Some(self.insert(NodeKind::Mesh(MeshNode::new(gpu_mesh)))))
    }

    /// Whether `target` can be reached from `from` through structural edges
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if let Some(node) = self.nodes.get(&id) {
                if node.node_type() != NodeType::Mesh {
                    stack.extend_from_slice(node.children());
                }
            }
        }
        false
    }

    /// Connect `child` below `parent`
    ///
    /// Returns false if either id is unknown, if the edge would create a cycle,
    /// or if the parent refuses the child (a mesh only takes materials,
    /// parameters and textures).
    pub fn connect(&mut self, parent: NodeId, child: NodeId) -> bool {
        let (Some(parent_type), Some(child_type)) = (self.node_type(parent), self.node_type(child))
        else {
            log::warn!("Cannot connect {} -> {}: unknown node", parent, child);
            return false;
        };
        if parent_type != NodeType::Mesh && self.reaches(child, parent) {
            log::warn!("Cannot connect {} -> {}: would create a cycle", parent, child);
            return false;
        }

        let connected = self
            .nodes
            .get_mut(&parent)
            .is_some_and(|node| node.connect(child, child_type));
        if connected && parent_type != NodeType::Mesh {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.set_parent(Some(parent));
            }
        }
        connected
    }

    /// Remove the edge from `parent` to `child`
    ///
    /// The child node itself stays in the scene. Returns whether an edge was
    /// removed.
    pub fn disconnect(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let removed = parent_node.disconnect(child);
        let still_linked = parent_node.children().contains(&child);

        if removed && !still_linked {
            if let Some(node) = self.nodes.get_mut(&child) {
                if node.parent() == Some(parent) {
                    node.set_parent(None);
                }
            }
        }
        removed
    }

    /// Make a camera node the one the renderer looks through
    ///
    /// Ids that are not camera nodes are ignored. Returns whether the active
    /// camera changed.
    pub fn set_active_camera(&mut self, id: NodeId) -> bool {
        if self.node_type(id) == Some(NodeType::Camera) {
            self.active_camera = Some(id);
            log::debug!("Active camera is now {}", id);
            true
        } else {
            log::warn!("Cannot activate {}: not a camera node", id);
            false
        }
    }

    /// Id of the active camera
    pub const fn active_camera_id(&self) -> Option<NodeId> {
        self.active_camera
    }

    /// The active camera
    pub fn active_camera(&self) -> Option<&FlyingCamera> {
        self.active_camera
            .and_then(|id| self.nodes.get(&id))
            .and_then(SceneNode::as_camera)
    }

    /// The active camera, mutably
    pub fn active_camera_mut(&mut self) -> Option<&mut FlyingCamera> {
        let id = self.active_camera?;
        self.nodes.get_mut(&id).and_then(SceneNode::as_camera_mut)
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Node by id, mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Kind of a node
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.nodes.get(&id).map(SceneNode::node_type)
    }

    /// Mesh payload of a node
    pub fn mesh(&self, id: NodeId) -> Option<&MeshNode> {
        self.node(id).and_then(SceneNode::as_mesh)
    }

    /// Mutable mesh payload of a node
    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut MeshNode> {
        self.node_mut(id).and_then(SceneNode::as_mesh_mut)
    }

    /// Mutable camera payload of a node
    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut FlyingCamera> {
        self.node_mut(id).and_then(SceneNode::as_camera_mut)
    }

    /// Mutable light payload of a node
    pub fn light_mut(&mut self, id: NodeId) -> Option<&mut LightNode> {
        self.node_mut(id).and_then(SceneNode::as_light_mut)
    }

    /// Mutable parameter payload of a node
    pub fn parameters_mut(&mut self, id: NodeId) -> Option<&mut MaterialParameters> {
        self.node_mut(id).and_then(SceneNode::as_parameters_mut)
    }

    /// The root node
    pub fn root(&self) -> &SceneNode {
        &self.nodes[&NodeId::ROOT]
    }

    /// Id of the root node
    pub const fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is always present
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
