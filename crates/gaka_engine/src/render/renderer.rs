//! # Renderer
//!
//! Owns the scene and the graphics device and turns the scene into one frame
//! per [`Renderer::render_scene`] call.
//!
//! ## Frame Structure
//!
//! 1. Clear color and depth
//! 2. Resolve the active camera (none: the frame stops here)
//! 3. Build the projection from the camera's field of view and the aspect ratio
//! 4. Walk the scene graph and draw every reachable mesh

use crate::assets::{ImageData, ResourceManager};
use crate::core::RendererConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::render::api::{ClearFlags, GraphicsDevice};
use crate::render::material::{create_material, MaterialKind};
use crate::render::primitives::{Mesh, VertexFormat};
use crate::render::RenderResult;
use crate::scene::{render_graph, FrameUniforms, NodeId, Scene};

/// Summary of one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Camera the frame was rendered from
    pub camera: Option<NodeId>,
    /// Nodes reached by the traversal
    pub nodes_visited: usize,
    /// Meshes drawn
    pub draw_calls: usize,
}

/// Scene renderer
pub struct Renderer {
    scene: Scene,
    device: Box<dyn GraphicsDevice>,
    config: RendererConfig,
    aspect_ratio: f32,
}

impl Renderer {
    /// Create a renderer for a framebuffer of the given size
    pub fn new(
        mut device: Box<dyn GraphicsDevice>,
        config: RendererConfig,
        width: u32,
        height: u32,
    ) -> Self {
        log::info!("Renderer using the {} backend", device.backend_name());
        device.set_viewport(0, 0, width, height);
        Self {
            scene: Scene::new(),
            device,
            config,
            aspect_ratio: Self::aspect(width, height).unwrap_or(1.0),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn aspect(width: u32, height: u32) -> Option<f32> {
        (height != 0).then(|| width as f32 / height as f32)
    }

    /// React to a framebuffer size change
    ///
    /// A zero height (minimised window) is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(aspect) = Self::aspect(width, height) else {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        };
        self.aspect_ratio = aspect;
        self.device.set_viewport(0, 0, width, height);
        log::debug!("Resized to {}x{} (aspect {:.3})", width, height, aspect);
    }

    /// Set the viewport rectangle without touching the aspect ratio
    pub fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.device.set_viewport(x, y, width, height);
    }

    /// Aspect ratio used for projection
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Renderer configuration
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The scene
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The graphics device
    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.device.as_mut()
    }

    /// Compile a built-in material and add it to the scene
    pub fn add_material(
        &mut self,
        kind: MaterialKind,
        resources: &ResourceManager,
    ) -> RenderResult<NodeId> {
        let material = create_material(kind, self.device.as_mut(), resources)?;
        Ok(self.scene.add_material(material))
    }

    /// Upload geometry and add it to the scene, see [`Scene::add_mesh`]
    pub fn add_mesh<V: VertexFormat>(
        &mut self,
        mesh: &Mesh<V>,
        material: NodeId,
    ) -> RenderResult<Option<NodeId>> {
        self.scene.add_mesh(self.device.as_mut(), mesh, material)
    }

    /// Upload an image and add it to the scene as a texture node
    pub fn add_texture(&mut self, image: &ImageData) -> RenderResult<NodeId> {
        self.scene.add_texture(self.device.as_mut(), image)
    }

    /// Projection matrix for a vertical field of view in degrees
    pub fn projection(&self, fov: f32) -> Mat4 {
        Mat4::perspective(
            utils::deg_to_rad(fov),
            self.aspect_ratio,
            self.config.near_plane,
            self.config.far_plane,
        )
    }

    /// Render one frame of the scene
    pub fn render_scene(&mut self) -> RenderResult<FrameStats> {
        self.device
            .clear(self.config.clear_color, ClearFlags::COLOR | ClearFlags::DEPTH);

        let Some(camera_id) = self.scene.active_camera_id() else {
            log::trace!("No active camera, skipping scene traversal");
            return Ok(FrameStats::default());
        };
        let Some(camera) = self.scene.active_camera_mut() else {
            return Ok(FrameStats::default());
        };
        let view = camera.view_matrix();
        let camera_position = camera.position();
        let fov = camera.fov();

        let frame = FrameUniforms {
            projection: self.projection(fov),
            view,
            camera_position,
        };
        let stats = render_graph(&self.scene, &frame)?;
        log::trace!("Frame: {} draw call(s), {} node(s)", stats.draw_calls, stats.nodes_visited);

        Ok(FrameStats {
            camera: Some(camera_id),
            nodes_visited: stats.nodes_visited,
            draw_calls: stats.draw_calls,
        })
    }
}
