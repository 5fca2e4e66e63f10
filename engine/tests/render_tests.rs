//! Render Tests - Shader Validation and Uniform Layout
//!
//! Parses and validates the WGSL sources with naga so shader mistakes show
//! up without a GPU, and checks the CPU-side uniform layout.

use glam::{Mat4, Vec3};
use lagoon_engine::render::{FogMode, MESH_SHADER, MeshRenderPass, MeshUniforms, MeshVertex, UI_SHADER};

fn validate(name: &str, source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{name} failed to parse:\n{}", e.emit_to_string(source)));
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("{name} failed validation: {e:?}"));
    module
}

fn has_entry_point(module: &naga::Module, name: &str, stage: naga::ShaderStage) -> bool {
    module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == stage)
}

#[test]
fn test_mesh_shader_is_valid() {
    let module = validate("MESH_SHADER", MESH_SHADER);
    assert!(has_entry_point(&module, "vs_main", naga::ShaderStage::Vertex));
    assert!(has_entry_point(&module, "fs_main", naga::ShaderStage::Fragment));
}

#[test]
fn test_ui_shader_is_valid() {
    let module = validate("UI_SHADER", UI_SHADER);
    assert!(has_entry_point(&module, "vs_main", naga::ShaderStage::Vertex));
    assert!(has_entry_point(&module, "fs_main", naga::ShaderStage::Fragment));
}

#[test]
fn test_uniform_and_vertex_sizes() {
    assert_eq!(std::mem::size_of::<MeshUniforms>(), 128);
    assert_eq!(std::mem::size_of::<MeshVertex>(), 40);
}

#[test]
fn test_fog_mode_serde_names() {
    assert_eq!(FogMode::default(), FogMode::Exponential);
    let parsed: FogMode = serde_json::from_str("\"exponential_squared\"").unwrap();
    assert_eq!(parsed, FogMode::ExponentialSquared);
    assert_eq!(FogMode::Linear.shader_index(), 0);
}

#[test]
fn test_uniforms_follow_setters() {
    let mut pass = MeshRenderPass::new();
    pass.update_camera(Mat4::IDENTITY, [1.0, 2.0, 3.0], 4.5);
    pass.set_fog([0.0, 0.4, 0.7, 0.3], 0.25, 0.0, 100.0, FogMode::ExponentialSquared);
    pass.set_lighting(Vec3::new(0.0, 2.0, 0.0), 0.5);

    let u = pass.uniforms();
    assert_eq!(u.camera_pos, [1.0, 2.0, 3.0]);
    assert_eq!(u.time, 4.5);
    assert_eq!(u.fog_color, [0.0, 0.4, 0.7, 0.3]);
    assert_eq!(u.fog_density, 0.25);
    assert_eq!(u.fog_mode, 2);
    assert_eq!(u.sun_dir, [0.0, 1.0, 0.0]);
    assert_eq!(u.ambient, 0.5);
}
