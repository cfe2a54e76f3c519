use std::rc::Rc;

use anyhow::Result;

use crate::texture::BaseTexture;

use super::RenderCtx;

/// GPU image plus the sampler it is read with.
///
/// Clones share the same GPU texture; identity (for texture unit reuse) is
/// pointer identity of the shared allocation.
#[derive(Clone)]
pub struct WgpuTexture(pub(super) Rc<TextureResources>);

pub(super) struct TextureResources {
    pub width: u32,
    pub height: u32,
    pub _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl WgpuTexture {
    /// Uploads a tightly packed, premultiplied RGBA8 image.
    pub fn from_rgba8(
        ctx: &RenderCtx<'_>,
        width: u32,
        height: u32,
        pixels: &[u8],
        label: &str,
    ) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "texture '{label}' has zero size");
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            pixels.len() == expected,
            "texture '{label}': expected {expected} bytes for {width}x{height} RGBA8, got {}",
            pixels.len()
        );

        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Linear: sampling stays inside the frame only via the shader clamp.
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("picture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self(Rc::new(TextureResources { width, height, _texture: texture, view, sampler })))
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.0.width, self.0.height)
    }

    #[inline]
    pub fn same_as(&self, other: &WgpuTexture) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Wraps this image as an already-loaded base texture.
    pub fn into_base(self, resolution: f32) -> BaseTexture<WgpuTexture> {
        let (w, h) = self.size();
        BaseTexture::loaded(self, w, h, resolution)
    }
}
