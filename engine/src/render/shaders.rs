//! WGSL Shader Sources
//!
//! Both pipelines share the 40-byte vertex layout (position, normal, color).

/// Lit, fogged geometry.
///
/// Fog modes: 0 = linear (start/end), 1 = exponential, 2 = exponential squared.
pub const MESH_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec3<f32>,
    time: f32,
    sun_dir: vec3<f32>,
    ambient: f32,
    fog_color: vec4<f32>,
    fog_density: f32,
    fog_start: f32,
    fog_end: f32,
    fog_mode: u32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(in.position, 1.0);
    out.world_pos = in.position;
    out.normal = in.normal;
    out.color = in.color;
    return out;
}

// 1 = clear, 0 = fully fogged
fn fog_visibility(distance: f32) -> f32 {
    var visibility: f32;
    if uniforms.fog_mode == 0u {
        let range = max(uniforms.fog_end - uniforms.fog_start, 0.0001);
        visibility = (uniforms.fog_end - distance) / range;
    } else if uniforms.fog_mode == 2u {
        let d = uniforms.fog_density * distance;
        visibility = exp(-d * d);
    } else {
        visibility = exp(-uniforms.fog_density * distance);
    }
    return clamp(visibility, 0.0, 1.0);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let l = normalize(uniforms.sun_dir);
    let diffuse = max(dot(n, l), 0.0);
    let lit = in.color.rgb * (uniforms.ambient + (1.0 - uniforms.ambient) * diffuse);

    let distance = length(in.world_pos - uniforms.camera_pos);
    let visibility = fog_visibility(distance);
    let rgb = mix(uniforms.fog_color.rgb, lit, visibility);
    return vec4<f32>(rgb, in.color.a);
}
"#;

/// Screen-space quads; positions are already in NDC.
pub const UI_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(in.position.xy, 0.0, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
