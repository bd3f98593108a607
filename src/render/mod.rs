//! wgpu renderer: GPU context, mesh tessellation, shaders and the
//! egui-embedded viewport pool

pub mod context;
pub mod lines;
pub mod mesh;
pub mod shader;
pub mod texture;
pub mod viewport;

pub use context::{GpuContext, RenderError, RenderResult};
pub use mesh::{Mesh, Vertex};
pub use viewport::{RenderCtx, SceneRenderer, Viewport, ViewportPool};
