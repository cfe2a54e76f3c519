//! Object renderers driven by the host's frame loop.
//!
//! The host calls, per context:
//! - `on_context_change` whenever the GPU context is (re)created
//! - `on_context_lost` when the context's resources become invalid
//!
//! and per frame:
//! - `start`, then `render` for each object routed to the renderer, then `flush`.

mod picture;

pub use picture::{LifecycleState, PictureRenderer};

use crate::host::GpuContext;
use crate::sprite::PictureSprite;

/// Capability set a renderer plugin exposes to the host's registry.
pub trait ObjectRenderer<C: GpuContext> {
    /// (Re)creates GPU resources on `gl`.
    fn on_context_change(&mut self, gl: &mut C) -> anyhow::Result<()>;

    /// Drops GPU handles; `on_context_change` must run before the next draw.
    fn on_context_lost(&mut self) {}

    /// Frame begins for this renderer.
    fn start(&mut self, gl: &mut C) {
        let _ = gl;
    }

    /// Frame ends, or the host switches to another renderer.
    fn flush(&mut self, gl: &mut C) {
        let _ = gl;
    }

    fn render(&mut self, gl: &mut C, sprite: &PictureSprite<'_, C::Texture>);
}
