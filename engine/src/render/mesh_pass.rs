//! Mesh Render Pass
//!
//! Handles rendering of 3D meshes with lighting, fog and depth testing.
//! Static meshes (terrain, water) are uploaded once; the dynamic mesh
//! (player, collectibles, quest giver) is rebuilt every frame.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use wgpu::util::DeviceExt;

use super::gpu_context::DEPTH_FORMAT;
use super::render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};
use super::shaders::MESH_SHADER;

/// Vertex capacity of the per-frame dynamic mesh
pub const MAX_DYNAMIC_VERTICES: usize = 16 * 1024;
/// Index capacity of the per-frame dynamic mesh
pub const MAX_DYNAMIC_INDICES: usize = 64 * 1024;

/// Vertex for mesh rendering (position, normal, color)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

const_assert_eq!(std::mem::size_of::<MeshVertex>(), 40);

/// How fog thickens with distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FogMode {
    /// Linear between start and end distance
    Linear,
    /// `exp(-density * d)`
    #[default]
    Exponential,
    /// `exp(-(density * d)^2)`
    ExponentialSquared,
}

impl FogMode {
    /// Value the shader switches on
    pub fn shader_index(self) -> u32 {
        match self {
            FogMode::Linear => 0,
            FogMode::Exponential => 1,
            FogMode::ExponentialSquared => 2,
        }
    }
}

/// Uniform data for mesh rendering
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub sun_dir: [f32; 3],
    pub ambient: f32,
    pub fog_color: [f32; 4],
    pub fog_density: f32,
    pub fog_start: f32,
    pub fog_end: f32,
    pub fog_mode: u32,
}

const_assert_eq!(std::mem::size_of::<MeshUniforms>(), 128);

impl Default for MeshUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0, 0.0, 0.0],
            time: 0.0,
            sun_dir: [0.5, 0.8, 0.3],
            ambient: 0.35,
            fog_color: [0.55, 0.7, 0.85, 1.0],
            fog_density: 0.01,
            fog_start: 0.0,
            fog_end: 300.0,
            fog_mode: FogMode::Exponential.shader_index(),
        }
    }
}

/// A mesh buffer that can be drawn
pub struct MeshBuffer {
    pub label: &'static str,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Mesh render pass: clears the frame to the background color and draws
/// every registered mesh.
pub struct MeshRenderPass {
    enabled: bool,
    initialized: bool,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,
    uniforms: MeshUniforms,
    static_meshes: Vec<MeshBuffer>,
    dynamic_mesh: Option<MeshBuffer>,
    dynamic_vertices: Vec<MeshVertex>,
    dynamic_indices: Vec<u32>,
}

impl MeshRenderPass {
    pub fn new() -> Self {
        Self {
            enabled: true,
            initialized: false,
            pipeline: None,
            bind_group: None,
            uniform_buffer: None,
            uniforms: MeshUniforms::default(),
            static_meshes: Vec::new(),
            dynamic_mesh: None,
            dynamic_vertices: Vec::new(),
            dynamic_indices: Vec::new(),
        }
    }

    /// Update camera uniforms (call before render)
    pub fn update_camera(&mut self, view_proj: Mat4, camera_pos: [f32; 3], time: f32) {
        self.uniforms.view_proj = view_proj.to_cols_array_2d();
        self.uniforms.camera_pos = camera_pos;
        self.uniforms.time = time;
    }

    /// Update fog uniforms (call before render)
    pub fn set_fog(&mut self, color: [f32; 4], density: f32, start: f32, end: f32, mode: FogMode) {
        self.uniforms.fog_color = color;
        self.uniforms.fog_density = density;
        self.uniforms.fog_start = start;
        self.uniforms.fog_end = end;
        self.uniforms.fog_mode = mode.shader_index();
    }

    /// Directional sun and ambient term
    pub fn set_lighting(&mut self, sun_direction: Vec3, ambient: f32) {
        self.uniforms.sun_dir = sun_direction.normalize_or_zero().to_array();
        self.uniforms.ambient = ambient;
    }

    pub fn uniforms(&self) -> &MeshUniforms {
        &self.uniforms
    }

    /// Upload a mesh that is drawn every frame until cleared
    pub fn add_static_mesh(
        &mut self,
        device: &wgpu::Device,
        label: &'static str,
        vertices: &[MeshVertex],
        indices: &[u32],
    ) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.static_meshes.push(MeshBuffer {
            label,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        });
    }

    /// Drop every static mesh (scene rebuild)
    pub fn clear_static_meshes(&mut self) {
        self.static_meshes.clear();
    }

    /// Set this frame's dynamic geometry. Geometry beyond the buffer
    /// capacity is dropped.
    pub fn set_dynamic_mesh(&mut self, vertices: &[MeshVertex], indices: &[u32]) {
        self.dynamic_vertices.clear();
        self.dynamic_indices.clear();
        if vertices.len() > MAX_DYNAMIC_VERTICES || indices.len() > MAX_DYNAMIC_INDICES {
            log::warn!(
                "Dynamic mesh too large ({} vertices, {} indices); skipped",
                vertices.len(),
                indices.len()
            );
            return;
        }
        self.dynamic_vertices.extend_from_slice(vertices);
        self.dynamic_indices.extend_from_slice(indices);
    }

    fn create_dynamic_mesh_buffer(device: &wgpu::Device) -> MeshBuffer {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dynamic Vertex Buffer"),
            size: (MAX_DYNAMIC_VERTICES * std::mem::size_of::<MeshVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dynamic Index Buffer"),
            size: (MAX_DYNAMIC_INDICES * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        MeshBuffer {
            label: "Dynamic",
            vertex_buffer,
            index_buffer,
            index_count: 0,
        }
    }
}

impl Default for MeshRenderPass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for MeshRenderPass {
    fn name(&self) -> &'static str {
        "Mesh"
    }

    fn priority(&self) -> RenderPassPriority {
        RenderPassPriority::Geometry
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn initialize(&mut self, ctx: &RenderContext) {
        if self.initialized {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Uniform Buffer"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Mesh Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x4,
                            offset: 24,
                            shader_location: 2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // Water is drawn translucent over the terrain
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.uniform_buffer = Some(uniform_buffer);
        self.dynamic_mesh = Some(Self::create_dynamic_mesh_buffer(ctx.device));
        self.initialized = true;
    }

    fn render(&self, ctx: &RenderContext, frame: &mut FrameContext) {
        let (Some(pipeline), Some(bind_group), Some(uniform_buffer)) =
            (&self.pipeline, &self.bind_group, &self.uniform_buffer)
        else {
            return;
        };

        ctx.queue
            .write_buffer(uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
        if let Some(dynamic) = &self.dynamic_mesh {
            if !self.dynamic_indices.is_empty() {
                ctx.queue.write_buffer(
                    &dynamic.vertex_buffer,
                    0,
                    bytemuck::cast_slice(&self.dynamic_vertices),
                );
                ctx.queue.write_buffer(
                    &dynamic.index_buffer,
                    0,
                    bytemuck::cast_slice(&self.dynamic_indices),
                );
            }
        }

        let [r, g, b, a] = frame.clear_color;
        let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Mesh Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: frame.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);

        for mesh in &self.static_meshes {
            draw_mesh_buffer(&mut render_pass, mesh, mesh.index_count);
        }
        if let Some(dynamic) = &self.dynamic_mesh {
            draw_mesh_buffer(&mut render_pass, dynamic, self.dynamic_indices.len() as u32);
        }
    }
}

/// Draw the first `index_count` indices of a mesh buffer
pub fn draw_mesh_buffer(
    render_pass: &mut wgpu::RenderPass<'_>,
    mesh_buffer: &MeshBuffer,
    index_count: u32,
) {
    if index_count > 0 {
        render_pass.set_vertex_buffer(0, mesh_buffer.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh_buffer.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fog_mode_indices_match_shader() {
        assert_eq!(FogMode::Linear.shader_index(), 0);
        assert_eq!(FogMode::Exponential.shader_index(), 1);
        assert_eq!(FogMode::ExponentialSquared.shader_index(), 2);
    }

    #[test]
    fn test_set_fog_writes_uniforms() {
        let mut pass = MeshRenderPass::new();
        pass.set_fog([0.0, 0.4, 0.7, 0.3], 0.25, 0.0, 100.0, FogMode::Linear);
        let u = pass.uniforms();
        assert_eq!(u.fog_color, [0.0, 0.4, 0.7, 0.3]);
        assert_eq!(u.fog_density, 0.25);
        assert_eq!(u.fog_end, 100.0);
        assert_eq!(u.fog_mode, 0);
    }

    #[test]
    fn test_oversized_dynamic_mesh_is_dropped() {
        let mut pass = MeshRenderPass::new();
        let v = MeshVertex {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 4],
        };
        pass.set_dynamic_mesh(&[v; 3], &[0, 1, 2]);
        assert_eq!(pass.dynamic_indices.len(), 3);

        let too_many = vec![v; MAX_DYNAMIC_VERTICES + 1];
        pass.set_dynamic_mesh(&too_many, &[0, 1, 2]);
        assert!(pass.dynamic_indices.is_empty());
    }
}
