//! Render Pass Abstraction
//!
//! A frame is a short list of passes sharing one encoder. Each pass builds
//! its pipeline once, then records into whatever color and depth targets
//! the frame hands it.

use wgpu::{CommandEncoder, Device, Queue, TextureView};

/// Where a pass sits in the frame (lower records first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPassPriority {
    /// Depth-tested world geometry; clears the targets
    Geometry = 100,
    /// Screen-space overlay loaded on top of the geometry
    Overlay = 400,
}

/// Device handles and surface description, valid for the whole frame
pub struct RenderContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
}

/// Per-frame targets and values
pub struct FrameContext<'a> {
    pub encoder: &'a mut CommandEncoder,
    pub color_view: &'a TextureView,
    pub depth_view: &'a TextureView,
    /// Seconds since the renderer started
    pub time: f32,
    /// Background color the geometry pass clears to
    pub clear_color: [f32; 4],
}

pub trait RenderPass {
    /// Debug label
    fn name(&self) -> &'static str;

    fn priority(&self) -> RenderPassPriority;

    fn is_enabled(&self) -> bool {
        true
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    /// Build pipelines and buffers. Repeated calls are no-ops.
    fn initialize(&mut self, ctx: &RenderContext);

    /// Record this pass into `frame.encoder`
    fn render(&self, ctx: &RenderContext, frame: &mut FrameContext);
}

/// Record `passes` sorted by priority, skipping disabled ones.
pub fn render_in_order(passes: &mut [&dyn RenderPass], ctx: &RenderContext, frame: &mut FrameContext) {
    passes.sort_by_key(|p| p.priority());
    for pass in passes.iter() {
        if pass.is_enabled() {
            pass.render(ctx, frame);
        } else {
            log::trace!("Skipping {} pass", pass.name());
        }
    }
}
