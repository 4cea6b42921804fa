//! Integration tests for scene traversal and the draw-uniform protocol
//!
//! Every test renders through the recording backend and inspects the command
//! log it leaves behind.

use approx::assert_relative_eq;
use gaka_engine::core::RendererConfig;
use gaka_engine::foundation::math::{utils, Mat4, Mat4Ext, Vec3, Vec4};
use gaka_engine::render::api::{GraphicsDevice, ShaderStage, UniformValue};
use gaka_engine::render::backends::{DeviceCommand, RecordingDevice};
use gaka_engine::render::material::{Material, MaterialParameters};
use gaka_engine::render::primitives::{FlyingCamera, Mesh};
use gaka_engine::render::{PointLight, Renderer};
use gaka_engine::scene::{NodeId, NodeType};

const VERTEX_SOURCE: &str = "#version 460 core\nvoid main() { gl_Position = vec4(0.0); }";
const FRAGMENT_SOURCE: &str = "#version 460 core\nout vec4 color;\nvoid main() { color = vec4(1.0); }";

fn renderer() -> (Renderer, RecordingDevice) {
    let device = RecordingDevice::new();
    let renderer = Renderer::new(Box::new(device.clone()), RendererConfig::default(), 800, 600);
    (renderer, device)
}

fn material(renderer: &mut Renderer) -> NodeId {
    let mut program = renderer.device_mut().create_program();
    program.compile_source(VERTEX_SOURCE, ShaderStage::Vertex).unwrap();
    program.compile_source(FRAGMENT_SOURCE, ShaderStage::Fragment).unwrap();
    program.link().unwrap();
    renderer.scene_mut().add_material(Material::new(program))
}

fn cube(renderer: &mut Renderer, material: NodeId) -> NodeId {
    let mesh = renderer.add_mesh(&Mesh::cube(), material).unwrap().unwrap();
    assert!(renderer.scene_mut().connect(mesh, material));
    mesh
}

fn activate_camera(renderer: &mut Renderer) -> NodeId {
    let scene = renderer.scene_mut();
    let camera = scene.add_camera(FlyingCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::y()));
    assert!(scene.connect(NodeId::ROOT, camera));
    assert!(scene.set_active_camera(camera));
    camera
}

fn light_counts(device: &RecordingDevice) -> Vec<i32> {
    device
        .uniform_log()
        .into_iter()
        .filter(|(name, _)| name == "nb_point_lights")
        .filter_map(|(_, value)| match value {
            UniformValue::Int(count) => Some(count),
            _ => None,
        })
        .collect()
}

#[test]
fn test_first_node_id_follows_root() {
    let (mut renderer, _device) = renderer();
    let scene = renderer.scene_mut();
    assert_eq!(scene.root_id(), NodeId(0));
    assert_eq!(scene.add_node(), NodeId(1));
    assert_eq!(scene.add_node(), NodeId(2));
}

#[test]
fn test_lights_are_scoped_to_their_subtree() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let lit_mesh = cube(&mut renderer, material);
    let unlit_mesh = cube(&mut renderer, material);
    activate_camera(&mut renderer);

    let scene = renderer.scene_mut();
    let a = scene.add_node();
    let b = scene.add_node();
    let c = scene.add_node();
    let light = scene.add_light(PointLight::default(), Vec3::new(1.0, 2.0, 3.0));
    assert!(scene.connect(NodeId::ROOT, a));
    assert!(scene.connect(a, light));
    assert!(scene.connect(a, b));
    assert!(scene.connect(b, lit_mesh));
    assert!(scene.connect(NodeId::ROOT, c));
    assert!(scene.connect(c, unlit_mesh));

    device.clear_commands();
    let stats = renderer.render_scene().unwrap();

    assert_eq!(stats.draw_calls, 2);
    assert_eq!(light_counts(&device), vec![1, 0]);

    let log = device.uniform_log();
    let position = log
        .iter()
        .find(|(name, _)| name == "pointLights[0].position")
        .map(|(_, value)| *value);
    assert_eq!(position, Some(UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0))));
}

#[test]
fn test_sibling_lights_are_indexed_in_connection_order() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    activate_camera(&mut renderer);

    let scene = renderer.scene_mut();
    let dim = scene.add_light(PointLight::default().with_intensity(0.25), Vec3::zeros());
    let bright = scene.add_light(PointLight::default().with_intensity(4.0), Vec3::zeros());
    assert!(scene.connect(NodeId::ROOT, dim));
    assert!(scene.connect(NodeId::ROOT, bright));
    assert!(scene.connect(NodeId::ROOT, mesh));

    device.clear_commands();
    renderer.render_scene().unwrap();

    let log = device.uniform_log();
    let intensity = |index: usize| {
        let name = format!("pointLights[{index}].intensity");
        log.iter()
            .find(|(uniform, _)| *uniform == name)
            .and_then(|(_, value)| value.as_float())
    };
    assert_eq!(light_counts(&device), vec![2]);
    assert_relative_eq!(intensity(0).unwrap(), 0.25);
    assert_relative_eq!(intensity(1).unwrap(), 4.0);
}

#[test]
fn test_draw_uniform_order() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    activate_camera(&mut renderer);

    let scene = renderer.scene_mut();
    let parameters = scene.add_material_parameters(MaterialParameters::metallic_roughness(
        Vec4::new(0.7, 0.1, 0.8, 1.0),
        0.4,
        0.4,
    ));
    let light = scene.add_light(PointLight::default(), Vec3::new(0.0, 5.0, 0.0));
    assert!(scene.connect(mesh, parameters));
    assert!(scene.connect(NodeId::ROOT, light));
    assert!(scene.connect(NodeId::ROOT, mesh));

    device.clear_commands();
    renderer.render_scene().unwrap();

    let names: Vec<String> = device.uniform_log().into_iter().map(|(name, _)| name).collect();
    let camera_block = ["projection", "view", "model", "view_pos"];
    assert_eq!(&names[..4], camera_block);

    let position_of = |wanted: &str| names.iter().position(|name| name == wanted).unwrap();
    assert!(position_of("view_pos") < position_of("material.baseColorFactor"));
    assert!(position_of("material.baseColorFactor") < position_of("nb_point_lights"));
    assert!(position_of("nb_point_lights") < position_of("pointLights[0].color"));
    assert_eq!(names.last().map(String::as_str), Some("pointLights[0].position"));
    assert!(!names.iter().any(|name| name == "hasTex"));

    let light_block: Vec<&str> = names[position_of("pointLights[0].color")..]
        .iter()
        .take(5)
        .map(String::as_str)
        .collect();
    assert_eq!(
        light_block,
        [
            "pointLights[0].color",
            "pointLights[0].intensity",
            "pointLights[0].range",
            "pointLights[0].decay",
            "pointLights[0].position",
        ]
    );
}

#[test]
fn test_mesh_binds_before_program_and_draws_last() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    activate_camera(&mut renderer);
    assert!(renderer.scene_mut().connect(NodeId::ROOT, mesh));

    device.clear_commands();
    renderer.render_scene().unwrap();

    let commands = device.take_commands();
    let bind = commands
        .iter()
        .position(|command| matches!(command, DeviceCommand::BindMesh(_)))
        .unwrap();
    let use_program = commands
        .iter()
        .position(|command| matches!(command, DeviceCommand::UseProgram(_)))
        .unwrap();
    assert!(bind < use_program);
    assert!(matches!(commands.last(), Some(DeviceCommand::DrawMesh { count: 36, .. })));
}

#[test]
fn test_textures_flag_and_bind() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let textured = cube(&mut renderer, material);
    activate_camera(&mut renderer);

    let texture = renderer
        .add_texture(&gaka_engine::assets::ImageData::solid_color(2, 2, [255, 0, 0, 255]))
        .unwrap();
    let scene = renderer.scene_mut();
    assert!(scene.connect(textured, texture));
    assert!(scene.connect(NodeId::ROOT, textured));

    device.clear_commands();
    renderer.render_scene().unwrap();

    let has_tex = device
        .uniform_log()
        .into_iter()
        .find(|(name, _)| name == "hasTex")
        .map(|(_, value)| value);
    assert_eq!(has_tex, Some(UniformValue::Bool(true)));
    let binds = device
        .commands()
        .iter()
        .filter(|command| matches!(command, DeviceCommand::BindTexture(_)))
        .count();
    assert_eq!(binds, 1);
}

#[test]
fn test_mesh_edges_are_typed() {
    let (mut renderer, _device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);

    let scene = renderer.scene_mut();
    let generic = scene.add_node();
    let parameters = scene.add_material_parameters(MaterialParameters::phong());
    let light = scene.add_light(PointLight::default(), Vec3::zeros());

    assert!(!scene.connect(mesh, generic));
    assert!(!scene.connect(mesh, light));
    assert!(scene.connect(mesh, parameters));

    let mesh_node = scene.mesh(mesh).unwrap();
    assert_eq!(mesh_node.material(), Some(material));
    assert_eq!(mesh_node.parameters(), Some(parameters));
    assert!(!mesh_node.has_textures());

    assert!(scene.disconnect(mesh, parameters));
    assert!(!scene.mesh(mesh).unwrap().has_parameters());
    assert_eq!(scene.node_type(parameters), Some(NodeType::MaterialParameters));
}

#[test]
fn test_add_mesh_requires_material_node() {
    let (mut renderer, device) = renderer();
    let not_material = renderer.scene_mut().add_node();
    let nodes_before = renderer.scene().len();

    let result = renderer.add_mesh(&Mesh::cube(), not_material).unwrap();

    assert!(result.is_none());
    assert_eq!(renderer.scene().len(), nodes_before);
    assert_eq!(device.live_meshes(), 0);
}

#[test]
fn test_unreachable_mesh_is_not_drawn() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    cube(&mut renderer, material);
    activate_camera(&mut renderer);

    device.clear_commands();
    let stats = renderer.render_scene().unwrap();

    assert_eq!(stats.draw_calls, 0);
    assert_eq!(device.draw_count(), 0);
}

#[test]
fn test_frame_without_camera_draws_nothing() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    assert!(renderer.scene_mut().connect(NodeId::ROOT, mesh));

    let stats = renderer.render_scene().unwrap();

    assert_eq!(stats.camera, None);
    assert_eq!(device.draw_count(), 0);
}

#[test]
fn test_frame_matrices_follow_active_camera() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    let camera = activate_camera(&mut renderer);
    assert!(renderer.scene_mut().connect(NodeId::ROOT, mesh));

    device.clear_commands();
    renderer.render_scene().unwrap();

    let scene = renderer.scene_mut();
    let camera = scene.node_mut(camera).and_then(|node| node.as_camera_mut()).unwrap();
    let expected_view = camera.view_matrix();
    let expected_position = camera.position();
    let expected_projection = Mat4::perspective(utils::deg_to_rad(camera.fov()), 800.0 / 600.0, 0.5, 1000.0);

    let log = device.uniform_log();
    let value = |wanted: &str| log.iter().find(|(name, _)| name == wanted).map(|(_, value)| *value);
    match value("projection") {
        Some(UniformValue::Mat4(projection)) => {
            assert_relative_eq!(projection, expected_projection, epsilon = 1e-6);
        }
        other => panic!("unexpected projection uniform: {other:?}"),
    }
    assert_eq!(value("view"), Some(UniformValue::Mat4(expected_view)));
    assert_eq!(value("view_pos"), Some(UniformValue::Vec3(expected_position)));
}

#[test]
fn test_ancestor_lights_precede_nested_lights() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    activate_camera(&mut renderer);

    let scene = renderer.scene_mut();
    let outer = scene.add_light(PointLight::default().with_intensity(1.5), Vec3::new(-1.0, 0.0, 0.0));
    let group = scene.add_node();
    let inner = scene.add_light(PointLight::default().with_intensity(3.0), Vec3::new(1.0, 0.0, 0.0));
    assert!(scene.connect(NodeId::ROOT, outer));
    assert!(scene.connect(NodeId::ROOT, group));
    assert!(scene.connect(group, inner));
    assert!(scene.connect(group, mesh));

    device.clear_commands();
    renderer.render_scene().unwrap();

    let log = device.uniform_log();
    let value = |wanted: &str| log.iter().find(|(name, _)| name == wanted).map(|(_, value)| *value);
    assert_eq!(light_counts(&device), vec![2]);
    assert_relative_eq!(value("pointLights[0].intensity").and_then(|v| v.as_float()).unwrap(), 1.5);
    assert_relative_eq!(value("pointLights[1].intensity").and_then(|v| v.as_float()).unwrap(), 3.0);
    assert_eq!(
        value("pointLights[0].position"),
        Some(UniformValue::Vec3(Vec3::new(-1.0, 0.0, 0.0)))
    );
    assert_eq!(
        value("pointLights[1].position"),
        Some(UniformValue::Vec3(Vec3::new(1.0, 0.0, 0.0)))
    );
}

#[test]
fn test_duplicate_material_edge_survives_single_disconnect() {
    let (mut renderer, device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    activate_camera(&mut renderer);

    let scene = renderer.scene_mut();
    assert!(scene.connect(mesh, material));
    assert!(scene.connect(NodeId::ROOT, mesh));
    assert!(scene.disconnect(mesh, material));

    let mesh_node = scene.mesh(mesh).unwrap();
    assert!(mesh_node.has_material());
    assert_eq!(scene.node(mesh).unwrap().children(), [material]);

    device.clear_commands();
    assert_eq!(renderer.render_scene().unwrap().draw_calls, 1);

    let scene = renderer.scene_mut();
    assert!(scene.disconnect(mesh, material));
    assert!(!scene.mesh(mesh).unwrap().has_material());
    assert!(scene.node(mesh).unwrap().children().is_empty());
}

#[test]
fn test_duplicate_texture_edges_drop_one_entry_each() {
    let (mut renderer, _device) = renderer();
    let material = material(&mut renderer);
    let mesh = cube(&mut renderer, material);
    let texture = renderer
        .add_texture(&gaka_engine::assets::ImageData::solid_color(1, 1, [0, 0, 0, 255]))
        .unwrap();

    let scene = renderer.scene_mut();
    assert!(scene.connect(mesh, texture));
    assert!(scene.connect(mesh, texture));
    assert!(scene.disconnect(mesh, texture));
    assert_eq!(scene.mesh(mesh).unwrap().textures(), [texture]);

    assert!(scene.disconnect(mesh, texture));
    assert!(!scene.mesh(mesh).unwrap().has_textures());
}
