//! Integration tests for skinning parameters, the flying camera and asset loading

use approx::assert_relative_eq;
use gaka_engine::animation::{Skeleton, SkeletonError};
use gaka_engine::assets::{AssetError, ResourceManager};
use gaka_engine::core::RendererConfig;
use gaka_engine::foundation::math::{Mat4, Vec3};
use gaka_engine::render::api::UniformValue;
use gaka_engine::render::backends::RecordingDevice;
use gaka_engine::render::material::{MaterialKind, MaterialParameters};
use gaka_engine::render::primitives::FlyingCamera;
use gaka_engine::render::{RenderError, Renderer};

fn arm() -> Skeleton {
    let mut skeleton = Skeleton::new(Mat4::identity(), Vec3::zeros());
    let bone1 = skeleton.add_bone(Mat4::identity(), Vec3::new(0.5, 0.0, 0.0), 0).unwrap();
    skeleton.add_bone(Mat4::identity(), Vec3::new(1.0, 0.0, 0.0), bone1).unwrap();
    skeleton
}

#[test]
fn test_bone_rotation_carries_descendants() {
    let mut skeleton = arm();
    skeleton.move_bone(1, 90.0, &Vec3::z()).unwrap();

    assert_relative_eq!(skeleton.bones()[1].joint, Vec3::new(0.0, 0.5, 0.0), epsilon = 1e-6);
    assert_relative_eq!(skeleton.bones()[2].joint, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(skeleton.bones()[0].joint, Vec3::zeros());
}

#[test]
fn test_moving_missing_bone_fails() {
    let mut skeleton = arm();
    let result = skeleton.move_bone(7, 10.0, &Vec3::z());
    assert!(matches!(result, Err(SkeletonError::BoneOutOfRange { index: 7, len: 3 })));
}

#[test]
fn test_animated_parameters_publish_bones() {
    let mut parameters = MaterialParameters::phong_animated(arm());
    if let Some(skeleton) = parameters.skeleton_mut() {
        skeleton.move_bone(2, 45.0, &Vec3::z()).unwrap();
    }

    let uniforms = parameters.uniforms();
    let value = |wanted: &str| {
        uniforms
            .iter()
            .find(|(name, _)| name == wanted)
            .map(|(_, value)| *value)
    };
    assert_eq!(value("num_bones"), Some(UniformValue::Int(3)));
    let moved = parameters.skeleton().unwrap().bones()[2].transform;
    assert_eq!(value("bones[2]"), Some(UniformValue::Mat4(moved)));
    assert!(value("material.shininess").is_some());
}

#[test]
fn test_yaw_wraps_past_half_turn() {
    let mut camera = FlyingCamera::with_angles(Vec3::zeros(), Vec3::y(), 0.0, 0.0);
    camera.yaw_motion(200.0);
    assert_relative_eq!(camera.yaw(), -160.0, epsilon = 1e-4);

    camera.pitch_motion(-200.0);
    assert_relative_eq!(camera.pitch(), 160.0, epsilon = 1e-4);
}

#[test]
fn test_view_matrix_follows_motion() {
    let mut camera = FlyingCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::y());
    let before = camera.view_matrix();
    assert!(!camera.needs_update());

    camera.move_by(1.0);
    assert!(camera.needs_update());
    let after = camera.view_matrix();

    assert_ne!(before, after);
    assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 4.0), epsilon = 1e-5);
}

#[test]
fn test_missing_shader_reports_not_found() {
    let device = RecordingDevice::new();
    let mut renderer = Renderer::new(Box::new(device.clone()), RendererConfig::default(), 640, 480);
    let resources = ResourceManager::new(std::env::temp_dir().join("gaka_no_such_assets"));

    let result = renderer.add_material(MaterialKind::Phong, &resources);

    assert!(matches!(result, Err(RenderError::Asset(AssetError::NotFound(_)))));
    assert_eq!(device.live_programs(), 0);
    assert_eq!(renderer.scene().len(), 1);
}

#[test]
fn test_material_compiles_from_asset_directory() {
    let root = std::env::temp_dir().join(format!("gaka_assets_{}", std::process::id()));
    let shaders = root.join("shaders/OpenGL");
    std::fs::create_dir_all(&shaders).unwrap();
    let (vertex, fragment) = MaterialKind::Lambertian.shader_paths();
    std::fs::write(root.join(vertex), "#version 460 core\nvoid main() {}").unwrap();
    std::fs::write(root.join(fragment), "#version 460 core\nvoid main() {}").unwrap();

    let device = RecordingDevice::new();
    let mut renderer = Renderer::new(Box::new(device.clone()), RendererConfig::default(), 640, 480);
    let resources = ResourceManager::new(&root);

    let material = renderer.add_material(MaterialKind::Lambertian, &resources).unwrap();

    assert!(renderer.scene().node(material).unwrap().as_material().unwrap().program().is_linked());
    assert_eq!(device.live_programs(), 1);
    let _ = std::fs::remove_dir_all(root);
}
