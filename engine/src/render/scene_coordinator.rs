//! Scene Coordinator
//!
//! High-level frame management that owns the GPU context and both render
//! passes, tracks frame timing and submits frames.

use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

use super::gpu_context::{GpuContext, GpuContextConfig, RenderError};
use super::mesh_pass::MeshRenderPass;
use super::render_pass::{FrameContext, RenderContext, RenderPass, render_in_order};
use super::ui_pass::UiRenderPass;

/// Longest frame delta handed to the simulation (seconds)
const MAX_FRAME_DELTA: f32 = 0.1;

fn render_context(gpu: &GpuContext) -> RenderContext<'_> {
    let (width, height) = gpu.dimensions();
    RenderContext {
        device: &gpu.device,
        queue: &gpu.queue,
        surface_format: gpu.format(),
        width,
        height,
    }
}

/// Owns the GPU, the mesh pass and the UI pass, and paces frames
pub struct SceneCoordinator {
    gpu: GpuContext,
    mesh: MeshRenderPass,
    ui: UiRenderPass,
    start_time: Instant,
    last_frame: Instant,
    frame_count: u64,
    fps: f32,
    last_fps_update: Instant,
}

impl SceneCoordinator {
    /// Create a new scene coordinator and initialize its passes
    pub fn new(window: Arc<Window>, config: GpuContextConfig) -> Result<Self, RenderError> {
        let gpu = GpuContext::new(window, config)?;
        let now = Instant::now();

        let mut coordinator = Self {
            gpu,
            mesh: MeshRenderPass::new(),
            ui: UiRenderPass::new(),
            start_time: now,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            last_fps_update: now,
        };
        coordinator.initialize_passes();
        Ok(coordinator)
    }

    fn initialize_passes(&mut self) {
        let ctx = render_context(&self.gpu);
        self.mesh.initialize(&ctx);
        self.ui.initialize(&ctx);
    }

    /// Mesh pass plus the device, for uploading static meshes
    pub fn mesh_pass_and_device(&mut self) -> (&mut MeshRenderPass, &wgpu::Device) {
        (&mut self.mesh, &self.gpu.device)
    }

    pub fn mesh_pass_mut(&mut self) -> &mut MeshRenderPass {
        &mut self.mesh
    }

    pub fn ui_pass_mut(&mut self) -> &mut UiRenderPass {
        &mut self.ui
    }

    /// Get current surface dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        self.gpu.dimensions()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.gpu.aspect_ratio()
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Seconds since the renderer started
    pub fn elapsed_time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Advance frame timing and return the clamped delta time
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let delta_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = (now - self.last_fps_update).as_secs_f32();
        if fps_elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / fps_elapsed;
            self.frame_count = 0;
            self.last_fps_update = now;
            log::debug!("{:.0} fps", self.fps);
        }

        delta_time.min(MAX_FRAME_DELTA)
    }

    /// Render a frame using all enabled passes
    pub fn render(&mut self, clear_color: [f32; 4]) -> Result<(), wgpu::SurfaceError> {
        let output = match self.gpu.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Render Encoder"),
            });

        let time = self.elapsed_time();
        let ctx = render_context(&self.gpu);
        let mut frame = FrameContext {
            encoder: &mut encoder,
            color_view: &view,
            depth_view: &self.gpu.depth.view,
            time,
            clear_color,
        };

        let mut passes: [&dyn RenderPass; 2] = [&self.ui, &self.mesh];
        render_in_order(&mut passes, &ctx, &mut frame);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
