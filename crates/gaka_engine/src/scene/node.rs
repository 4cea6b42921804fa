//! Scene nodes
//!
//! Every node has an id, a list of child ids and an optional parent id. What a
//! node *is* lives in its [`NodeKind`]; the set of kinds is closed and every
//! operation dispatches on it with a `match`.

use std::fmt;

use crate::assets::ImageData;
use crate::foundation::math::Vec3;
use crate::render::api::GpuTexture;
use crate::render::lighting::PointLight;
use crate::render::material::{Material, MaterialParameters};
use crate::render::primitives::FlyingCamera;
use crate::render::RenderResult;
use crate::scene::MeshNode;

/// Identifier of a node inside its [`Scene`](crate::scene::Scene)
///
/// Ids are handed out in increasing order and never reused. The root is always
/// [`NodeId::ROOT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Id of the scene root
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of [`NodeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Grouping node
    Generic,
    /// Flying camera
    Camera,
    /// Point light
    Light,
    /// Shader program
    Material,
    /// Material parameter bag
    MaterialParameters,
    /// GPU texture
    Texture,
    /// Drawable mesh
    Mesh,
}

/// Point light placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightNode {
    /// Light properties
    pub light: PointLight,
    /// World-space position
    pub position: Vec3,
}

/// Texture uploaded to the GPU
pub struct TextureNode {
    texture: Box<dyn GpuTexture>,
}

impl TextureNode {
    /// Wrap an uploaded texture
    pub fn new(texture: Box<dyn GpuTexture>) -> Self {
        Self { texture }
    }

    /// Bind for sampling
    pub fn bind(&self) {
        self.texture.bind();
    }

    /// Re-upload the pixels
    pub fn update(&mut self, image: &ImageData) -> RenderResult<()> {
        self.texture.update(image)
    }

    /// Width and height in pixels
    pub fn size(&self) -> (u32, u32) {
        self.texture.size()
    }
}

impl fmt::Debug for TextureNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureNode").field("size", &self.size()).finish()
    }
}

/// Payload of a scene node
#[derive(Debug)]
pub enum NodeKind {
    /// Grouping node; lights directly below it are in scope for its subtree
    Generic,
    /// Camera
    Camera(FlyingCamera),
    /// Point light
    Light(LightNode),
    /// Shader program
    Material(Material),
    /// Parameter bag
    MaterialParameters(MaterialParameters),
    /// Texture
    Texture(TextureNode),
    /// Drawable mesh
    Mesh(MeshNode),
}

impl NodeKind {
    /// Discriminant of this payload
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Generic => NodeType::Generic,
            Self::Camera(_) => NodeType::Camera,
            Self::Light(_) => NodeType::Light,
            Self::Material(_) => NodeType::Material,
            Self::MaterialParameters(_) => NodeType::MaterialParameters,
            Self::Texture(_) => NodeType::Texture,
            Self::Mesh(_) => NodeType::Mesh,
        }
    }
}

/// A node of the scene graph
#[derive(Debug)]
pub struct SceneNode {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl SceneNode {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }

    /// Id of this node
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Structural parent, if connected below one
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Child ids in connection order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Kind of this node
    pub const fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Payload
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable payload
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Add an edge to `child`
    ///
    /// Mesh nodes route the child into their typed slots and refuse kinds they
    /// cannot use; every other kind appends unconditionally. Returns whether
    /// the edge was added.
    pub fn connect(&mut self, child: NodeId, child_type: NodeType) -> bool {
        if let NodeKind::Mesh(mesh) = &mut self.kind {
            if !mesh.adopt(child, child_type) {
                return false;
            }
        }
        self.children.push(child);
        true
    }

    /// Remove the first edge to `child`
    ///
    /// Mesh nodes drop one texture entry per removed edge and clear their
    /// material or parameter slot once no edge to `child` remains. Returns
    /// whether an edge was removed.
    pub fn disconnect(&mut self, child: NodeId) -> bool {
        let Some(index) = self.children.iter().position(|&id| id == child) else {
            return false;
        };
        self.children.remove(index);
        if let NodeKind::Mesh(mesh) = &mut self.kind {
            let last_edge = !self.children.contains(&child);
            mesh.release(child, last_edge);
        }
        true
    }

    /// Camera payload
    pub const fn as_camera(&self) -> Option<&FlyingCamera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Mutable camera payload
    pub fn as_camera_mut(&mut self) -> Option<&mut FlyingCamera> {
        match &mut self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Light payload
    pub const fn as_light(&self) -> Option<&LightNode> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Mutable light payload
    pub fn as_light_mut(&mut self) -> Option<&mut LightNode> {
        match &mut self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Material payload
    pub const fn as_material(&self) -> Option<&Material> {
        match &self.kind {
            NodeKind::Material(material) => Some(material),
            _ => None,
        }
    }

    /// Parameter payload
    pub const fn as_parameters(&self) -> Option<&MaterialParameters> {
        match &self.kind {
            NodeKind::MaterialParameters(params) => Some(params),
            _ => None,
        }
    }

    /// Mutable parameter payload
    pub fn as_parameters_mut(&mut self) -> Option<&mut MaterialParameters> {
        match &mut self.kind {
            NodeKind::MaterialParameters(params) => Some(params),
            _ => None,
        }
    }

    /// Texture payload
    pub const fn as_texture(&self) -> Option<&TextureNode> {
        match &self.kind {
            NodeKind::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    /// Mutable texture payload
    pub fn as_texture_mut(&mut self) -> Option<&mut TextureNode> {
        match &mut self.kind {
            NodeKind::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    /// Mesh payload
    pub const fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Mutable mesh payload
    pub fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
