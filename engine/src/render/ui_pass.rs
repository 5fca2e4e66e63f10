//! UI Render Pass
//!
//! Handles rendering of 2D UI elements on top of the scene.
//! No depth testing, uses alpha blending.

use super::mesh_pass::MeshVertex;
use super::render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};
use super::shaders::UI_SHADER;

/// UI vertices share the mesh layout; positions are NDC
pub type UiVertex = MeshVertex;

/// Byte capacity of the UI vertex buffer
const UI_VERTEX_BUFFER_SIZE: u64 = 1024 * 1024;
/// Byte capacity of the UI index buffer
const UI_INDEX_BUFFER_SIZE: u64 = 256 * 1024;

/// A UI mesh to be rendered
#[derive(Debug, Clone, Default)]
pub struct UiMesh {
    pub vertices: Vec<UiVertex>,
    pub indices: Vec<u32>,
}

impl UiMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quad to the mesh (NDC corners)
    pub fn add_quad(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        let normal = [0.0, 0.0, 1.0];

        self.vertices.push(UiVertex { position: [x1, y1, 0.0], normal, color });
        self.vertices.push(UiVertex { position: [x2, y1, 0.0], normal, color });
        self.vertices.push(UiVertex { position: [x2, y2, 0.0], normal, color });
        self.vertices.push(UiVertex { position: [x1, y2, 0.0], normal, color });

        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Append another mesh
    pub fn merge(&mut self, other: &UiMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Convert screen coordinates to NDC
    pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 3] {
        [(x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0, 0.0]
    }
}

/// UI render pass that draws one merged mesh per frame
pub struct UiRenderPass {
    enabled: bool,
    initialized: bool,
    pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    current: UiMesh,
}

impl UiRenderPass {
    pub fn new() -> Self {
        Self {
            enabled: true,
            initialized: false,
            pipeline: None,
            vertex_buffer: None,
            index_buffer: None,
            current: UiMesh::new(),
        }
    }

    /// Set the mesh to render this frame
    pub fn set_mesh(&mut self, mesh: UiMesh) {
        let vertex_bytes = (mesh.vertices.len() * std::mem::size_of::<UiVertex>()) as u64;
        let index_bytes = (mesh.indices.len() * std::mem::size_of::<u32>()) as u64;
        if vertex_bytes > UI_VERTEX_BUFFER_SIZE || index_bytes > UI_INDEX_BUFFER_SIZE {
            log::warn!("UI mesh exceeds buffer capacity; frame skipped");
            self.current = UiMesh::new();
            return;
        }
        self.current = mesh;
    }

    /// Clear current mesh data
    pub fn clear(&mut self) {
        self.current = UiMesh::new();
    }
}

impl Default for UiRenderPass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for UiRenderPass {
    fn name(&self) -> &'static str {
        "UI"
    }

    fn priority(&self) -> RenderPassPriority {
        RenderPassPriority::Overlay
    }

    fn is_enabled(&self) -> bool {
        self.enabled && !self.current.is_empty()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn initialize(&mut self, ctx: &RenderContext) {
        if self.initialized {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("UI Shader"),
            source: wgpu::ShaderSource::Wgsl(UI_SHADER.into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("UI Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        // No depth testing, alpha blending
        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("UI Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<UiVertex>() as u64,
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
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("UI Vertex Buffer"),
            size: UI_VERTEX_BUFFER_SIZE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("UI Index Buffer"),
            size: UI_INDEX_BUFFER_SIZE,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.pipeline = Some(pipeline);
        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
        self.initialized = true;
    }

    fn render(&self, ctx: &RenderContext, frame: &mut FrameContext) {
        let (Some(pipeline), Some(vertex_buffer), Some(index_buffer)) =
            (&self.pipeline, &self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        if self.current.is_empty() {
            return;
        }

        ctx.queue
            .write_buffer(vertex_buffer, 0, bytemuck::cast_slice(&self.current.vertices));
        ctx.queue
            .write_buffer(index_buffer, 0, bytemuck::cast_slice(&self.current.indices));

        let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("UI Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // Preserve previous passes
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.current.indices.len() as u32, 0, 0..1);
    }
}
