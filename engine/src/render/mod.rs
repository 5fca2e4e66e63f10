//! Render Module
//!
//! wgpu rendering for the lagoon scene: a lit, fogged mesh pass and a
//! screen-space UI pass, driven by [`SceneCoordinator`].

pub mod gpu_context;
pub mod mesh_pass;
pub mod render_pass;
pub mod scene_coordinator;
pub mod shaders;
pub mod ui_pass;

pub use gpu_context::{DEPTH_FORMAT, GpuContext, GpuContextConfig, RenderError};
pub use mesh_pass::{FogMode, MeshRenderPass, MeshUniforms, MeshVertex};
pub use render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};
pub use scene_coordinator::SceneCoordinator;
pub use shaders::{MESH_SHADER, UI_SHADER};
pub use ui_pass::{UiMesh, UiRenderPass, UiVertex};
