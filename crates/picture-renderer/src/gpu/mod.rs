//! Reference host backend on wgpu.
//!
//! Embedders that render with wgpu can drive [`PictureRenderer`] through
//! [`WgpuHost`]; other engines implement [`GpuContext`] themselves.
//!
//! Convention:
//! - sprite vertices are logical pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC using the frame's viewport
//! - textures and tints are premultiplied alpha
//!
//! Shader pipelines are built for `RenderCtx::surface_format`. When the
//! target format changes the host must run `on_context_change` again.
//!
//! [`PictureRenderer`]: crate::renderer::PictureRenderer
//! [`GpuContext`]: crate::host::GpuContext

mod ctx;
mod host;
mod pipeline;
mod resources;
mod texture;

pub use ctx::{RenderCtx, Viewport};
pub use host::{WgpuHost, TEXTURE_UNITS};
pub use resources::{WgpuQuad, WgpuShader};
pub use texture::WgpuTexture;
