//! Scene graph
//!
//! A single-rooted tree of heterogeneous nodes plus the per-frame traversal
//! that draws it.
//!
//! ```text
//! root (Generic)
//!  ├── Light        in scope for everything below root
//!  ├── Generic
//!  │    └── Mesh ──▶ Material, MaterialParameters, Texture (by id)
//!  └── Camera
//! ```

mod mesh_node;
mod node;
mod scene_graph;
pub mod traversal;

pub use mesh_node::MeshNode;
pub use node::{LightNode, NodeId, NodeKind, NodeType, SceneNode, TextureNode};
pub use scene_graph::Scene;
pub use traversal::{render_graph, FrameUniforms, TraversalStats};
