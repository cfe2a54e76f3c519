//! Picture renderer plugin.
//!
//! Draws one textured quad per sprite with UVs clamped to the sprite's atlas
//! frame (no bleeding from neighbouring frames) and a premultiplied tint.
//!
//! The crate is a plugin: the host engine owns the frame loop, the GPU
//! context and the scene. It reaches the GPU only through
//! [`host::GpuContext`], registers through [`plugin::register_plugins`],
//! and is driven through [`renderer::ObjectRenderer`].

pub mod clamp;
pub mod config;
pub mod gpu;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod renderer;
pub mod sprite;
pub mod texture;
pub mod tint;

pub use config::{PictureConfig, VerticalClamp};
pub use host::{BlendMode, GpuContext, ShaderVariant, TextureBinding};
pub use plugin::{register_plugins, register_software_fallback, PluginRegistry, PICTURE_PLUGIN};
pub use renderer::{ObjectRenderer, PictureRenderer};
pub use sprite::PictureSprite;
pub use texture::{BaseTexture, Frame, Texture};
