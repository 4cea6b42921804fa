//! Demo scenes

use gaka_engine::animation::Skeleton;
use gaka_engine::assets::ResourceManager;
use gaka_engine::foundation::math::{Mat4, Vec3, Vec4};
use gaka_engine::render::lighting::PointLight;
use gaka_engine::render::material::{MaterialKind, MaterialParameters};
use gaka_engine::render::primitives::{FlyingCamera, Mesh};
use gaka_engine::render::Renderer;
use gaka_engine::scene::{NodeId, Scene};

use crate::application::{Demo, DemoError, WheelAction};
use crate::geometry;

fn add_active_camera(scene: &mut Scene, position: Vec3) -> NodeId {
    let camera = scene.add_camera(FlyingCamera::new(position, Vec3::y()));
    scene.connect(scene.root_id(), camera);
    scene.set_active_camera(camera);
    camera
}

fn add_root_light(scene: &mut Scene, light: PointLight, position: Vec3) -> NodeId {
    let id = scene.add_light(light, position);
    scene.connect(scene.root_id(), id);
    id
}

/// Metallic-roughness cube resting on a floor, lit by three point lights
#[derive(Debug, Default)]
pub struct PbrDemo {
    cube: Option<NodeId>,
}

impl PbrDemo {
    /// Id of the cube mesh once the scene is built
    pub const fn cube(&self) -> Option<NodeId> {
        self.cube
    }
}

impl Demo for PbrDemo {
    fn wheel_action(&self) -> WheelAction {
        WheelAction::Move
    }

    fn build(&mut self, renderer: &mut Renderer, resources: &ResourceManager) -> Result<(), DemoError> {
        let material = renderer.add_material(MaterialKind::MetallicRoughness, resources)?;
        let cube = renderer.add_mesh(&Mesh::cube(), material)?;
        let floor = renderer.add_mesh(&Mesh::plane(6.0), material)?;

        let scene = renderer.scene_mut();
        add_active_camera(scene, Vec3::new(0.0, 2.0, 8.0));

        let purple = scene.add_material_parameters(MaterialParameters::metallic_roughness(
            Vec4::new(0.7, 0.1, 0.8, 1.0),
            0.4,
            0.4,
        ));
        let grey = scene.add_material_parameters(MaterialParameters::metallic_roughness(
            Vec4::new(0.6, 0.6, 0.6, 1.0),
            0.9,
            0.0,
        ));

        for (mesh, parameters) in [(cube, purple), (floor, grey)] {
            if let Some(mesh) = mesh {
                scene.connect(scene.root_id(), mesh);
                scene.connect(mesh, material);
                scene.connect(mesh, parameters);
            }
        }
        if let Some(floor) = floor.and_then(|id| scene.mesh_mut(id)) {
            floor.translate(&Vec3::new(0.0, -1.0, 0.0));
        }

        let light = PointLight::default().with_attenuation(20.0, 5.0);
        for position in [
            Vec3::new(-5.0, 5.0, 0.0),
            Vec3::new(5.0, 5.0, 0.0),
            Vec3::new(0.0, 5.0, 5.0),
        ] {
            add_root_light(scene, light, position);
        }

        self.cube = cube;
        Ok(())
    }
}

/// Back-and-forth swing of one bone between 0° and 90°
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneSwing {
    angle: f32,
    step: f32,
}

impl BoneSwing {
    /// Upper bound of the swing in degrees
    pub const MAX_ANGLE: f32 = 90.0;

    /// Start at 0° moving by `step` degrees per frame
    pub const fn new(step: f32) -> Self {
        Self { angle: 0.0, step }
    }

    /// Current angle in degrees
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance one frame and return the rotation to apply, in degrees
    pub fn advance(&mut self) -> f32 {
        let next = self.angle + self.step;
        if !(0.0..=Self::MAX_ANGLE).contains(&next) {
            self.step = -self.step;
        }
        self.angle += self.step;
        self.step
    }
}

/// Copper arm made of a skinned cylinder whose tip bone keeps waving
#[derive(Debug)]
pub struct SkinningDemo {
    parameters: Option<NodeId>,
    swing: BoneSwing,
}

impl SkinningDemo {
    /// Bone driven by the animation
    pub const ANIMATED_BONE: usize = 2;

    /// Create the demo
    pub const fn new() -> Self {
        Self {
            parameters: None,
            swing: BoneSwing::new(0.5),
        }
    }

    /// Root at the origin, then two bones along +X
    pub fn arm_skeleton() -> Result<Skeleton, DemoError> {
        let mut skeleton = Skeleton::new(Mat4::identity(), Vec3::zeros());
        let bone1 = skeleton.add_bone(Mat4::identity(), Vec3::new(0.5, 0.0, 0.0), 0)?;
        skeleton.add_bone(Mat4::identity(), Vec3::new(1.0, 0.0, 0.0), bone1)?;
        Ok(skeleton)
    }

    /// Current swing state
    pub const fn swing(&self) -> &BoneSwing {
        &self.swing
    }
}

impl Default for SkinningDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for SkinningDemo {
    fn wheel_action(&self) -> WheelAction {
        WheelAction::Zoom
    }

    fn build(&mut self, renderer: &mut Renderer, resources: &ResourceManager) -> Result<(), DemoError> {
        let material = renderer.add_material(MaterialKind::PhongAnimated, resources)?;
        let cylinder = geometry::skinned_cylinder(Vec3::zeros(), Vec3::x(), 0.5, 3.0, 64, 512);
        let mesh = renderer.add_mesh(&cylinder, material)?;

        let scene = renderer.scene_mut();
        add_active_camera(scene, Vec3::new(0.0, 0.5, 5.0));

        let parameters =
            scene.add_material_parameters(MaterialParameters::phong_animated(Self::arm_skeleton()?));
        if let Some(mesh) = mesh {
            scene.connect(scene.root_id(), mesh);
            scene.connect(mesh, material);
            scene.connect(mesh, parameters);
        }

        add_root_light(
            scene,
            PointLight::default().with_attenuation(20.0, 1.0),
            Vec3::new(0.0, 5.0, 5.0),
        );

        self.parameters = Some(parameters);
        Ok(())
    }

    fn animate(&mut self, renderer: &mut Renderer) -> Result<(), DemoError> {
        let Some(skeleton) = self
            .parameters
            .and_then(|id| renderer.scene_mut().parameters_mut(id))
            .and_then(MaterialParameters::skeleton_mut)
        else {
            return Ok(());
        };
        let delta = self.swing.advance();
        skeleton.move_bone(Self::ANIMATED_BONE, delta, &Vec3::z())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gaka_engine::core::RendererConfig;
    use gaka_engine::render::api::UniformValue;
    use gaka_engine::render::backends::RecordingDevice;

    fn renderer() -> (Renderer, RecordingDevice) {
        let device = RecordingDevice::new();
        let renderer = Renderer::new(Box::new(device.clone()), RendererConfig::default(), 1280, 720);
        (renderer, device)
    }

    fn shipped_resources() -> ResourceManager {
        ResourceManager::new(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))
    }

    #[test]
    fn test_pbr_scene_draws_both_meshes_with_three_lights() {
        let (mut renderer, device) = renderer();
        let mut demo = PbrDemo::default();
        demo.build(&mut renderer, &shipped_resources()).unwrap();
        assert!(demo.cube().is_some());

        device.clear_commands();
        let stats = renderer.render_scene().unwrap();

        assert_eq!(stats.draw_calls, 2);
        let light_counts: Vec<_> = device
            .uniform_log()
            .into_iter()
            .filter(|(name, _)| name == "nb_point_lights")
            .collect();
        assert_eq!(light_counts.len(), 2);
        assert!(light_counts.iter().all(|(_, value)| *value == UniformValue::Int(3)));
    }

    #[test]
    fn test_skinning_animation_moves_tip_bone() {
        let (mut renderer, _device) = renderer();
        let mut demo = SkinningDemo::new();
        demo.build(&mut renderer, &shipped_resources()).unwrap();

        for _ in 0..10 {
            demo.animate(&mut renderer).unwrap();
        }
        assert_relative_eq!(demo.swing().angle(), 5.0);

        let parameters = renderer.scene().nodes().find_map(|node| node.as_parameters()).unwrap();
        let tip = parameters.skeleton().unwrap().bones()[SkinningDemo::ANIMATED_BONE].joint;
        let expected = Vec3::new(0.5 + 0.5 * 5f32.to_radians().cos(), 0.5 * 5f32.to_radians().sin(), 0.0);
        assert_relative_eq!(tip, expected, epsilon = 1e-4);
        assert_eq!(renderer.render_scene().unwrap().draw_calls, 1);
    }

    #[test]
    fn test_swing_reverses_at_bounds() {
        let mut swing = BoneSwing::new(0.5);
        for _ in 0..180 {
            swing.advance();
        }
        assert_relative_eq!(swing.angle(), 90.0);

        assert_relative_eq!(swing.advance(), -0.5);
        assert_relative_eq!(swing.angle(), 89.5);

        for _ in 0..179 {
            swing.advance();
        }
        assert_relative_eq!(swing.angle(), 0.0);
        assert_relative_eq!(swing.advance(), 0.5);
    }

    #[test]
    fn test_swing_stays_in_range() {
        let mut swing = BoneSwing::new(0.5);
        for _ in 0..1000 {
            swing.advance();
            assert!((0.0..=BoneSwing::MAX_ANGLE).contains(&swing.angle()));
        }
    }

    #[test]
    fn test_arm_skeleton_layout() {
        let skeleton = SkinningDemo::arm_skeleton().unwrap();
        assert_eq!(skeleton.len(), 3);
        assert_eq!(skeleton.bones()[2].parent, Some(1));
        assert_relative_eq!(skeleton.bones()[2].joint, Vec3::new(1.0, 0.0, 0.0));
    }
}
