//! # Gaka Engine
//!
//! A small retained-mode scene graph renderer.
//!
//! ## Features
//!
//! - **Scene Graph**: a single-rooted tree of cameras, lights, materials, textures and meshes
//! - **Scoped Lighting**: point lights affect only the meshes below their parent
//! - **Materials**: shader programs paired with typed uniform parameter sets
//! - **Skeletal Animation**: bone hierarchies driving skinned meshes
//! - **Pluggable Backends**: a headless recording device, with a GLFW window behind `glfw-window`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gaka_engine::prelude::*;
//! use gaka_engine::render::backends::RecordingDevice;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::new("Quick Start");
//!     let resources = ResourceManager::from_config(&config.assets);
//!     let mut renderer = Renderer::new(
//!         Box::new(RecordingDevice::new()),
//!         config.renderer.clone(),
//!         config.window.width,
//!         config.window.height,
//!     );
//!
//!     let material = renderer.add_material(MaterialKind::Normal, &resources)?;
//!     let cube = renderer.add_mesh(&Mesh::cube(), material)?;
//!     let camera = renderer
//!         .scene_mut()
//!         .add_camera(FlyingCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::y()));
//!
//!     let scene = renderer.scene_mut();
//!     if let Some(cube) = cube {
//!         scene.connect(NodeId::ROOT, cube);
//!         scene.connect(cube, material);
//!     }
//!     scene.set_active_camera(camera);
//!
//!     renderer.render_scene()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod animation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{Skeleton, SkeletonError},
        assets::{AssetError, ImageData, ResourceManager},
        core::config::{ApplicationConfig, Config, RendererConfig, WindowConfig},
        foundation::math::{Mat4, Mat4Ext, Vec3, Vec4},
        render::{
            lighting::PointLight,
            material::{MaterialKind, MaterialParameters, ParameterBag},
            primitives::{FlyingCamera, Mesh, SkinnedVertex, Vertex},
            window::{Key, MouseButton, Window, WindowEvent},
            FrameStats, RenderError, RenderResult, Renderer,
        },
        scene::{NodeId, NodeType, Scene},
    };
}
