//! Per-frame scene traversal
//!
//! Depth-first walk from the root. Generic nodes bring their direct light
//! children into scope for their whole subtree; mesh nodes draw with the
//! lights collected on the path from the root. Children are visited in
//! connection order, so light indices are a pure function of the tree.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::RenderResult;
use crate::scene::{LightNode, NodeId, NodeKind, Scene, SceneNode};

/// Camera-dependent uniforms shared by every draw of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Projection matrix
    pub projection: Mat4,
    /// View matrix
    pub view: Mat4,
    /// Camera position in world space
    pub camera_position: Vec3,
}

/// Counters gathered during one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes reached by the walk
    pub nodes_visited: usize,
    /// Meshes drawn
    pub draw_calls: usize,
}

/// Draw every mesh reachable from the root
pub fn render_graph(scene: &Scene, frame: &FrameUniforms) -> RenderResult<TraversalStats> {
    let mut stats = TraversalStats::default();
    visit(scene, scene.root_id(), frame, &[], &mut stats)?;
    Ok(stats)
}

fn visit<'a>(
    scene: &'a Scene,
    id: NodeId,
    frame: &FrameUniforms,
    lights: &[&'a LightNode],
    stats: &mut TraversalStats,
) -> RenderResult<()> {
    let Some(node) = scene.node(id) else {
        return Ok(());
    };
    stats.nodes_visited += 1;

    match node.kind() {
        NodeKind::Generic => {
            let mut in_scope = lights.to_vec();
            in_scope.extend(
                node.children()
                    .iter()
                    .filter_map(|&child| scene.node(child).and_then(SceneNode::as_light)),
            );
            for &child in node.children() {
                visit(scene, child, frame, &in_scope, stats)?;
            }
        }
        NodeKind::Mesh(mesh) => {
            log::trace!("Drawing mesh {} with {} light(s)", id, lights.len());
            mesh.draw(scene, frame, lights)?;
            stats.draw_calls += 1;
        }
        NodeKind::Camera(_)
        | NodeKind::Light(_)
        | NodeKind::Material(_)
        | NodeKind::MaterialParameters(_)
        | NodeKind::Texture(_) => {}
    }
    Ok(())
}
