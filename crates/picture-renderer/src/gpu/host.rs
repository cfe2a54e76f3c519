use anyhow::Result;

use crate::host::{BlendMode, GpuContext, QuadGeometry, ShaderVariant, TextureBinding, Uniform};

use super::pipeline::{blend_index, interleave};
use super::{RenderCtx, WgpuQuad, WgpuShader, WgpuTexture};

/// Texture units emulated by [`WgpuHost`].
pub const TEXTURE_UNITS: usize = 8;

/// `GpuContext` over wgpu.
///
/// wgpu has no global bind state, so the host keeps GL-style state itself
/// (shader, blend mode, vertex array, texture units) and turns each
/// `draw_triangles` into one render pass that loads and stores `color_view`.
///
/// Every draw is submitted on its own. Uniform and vertex writes go through
/// the queue, so they must be ordered against the submit that reads them.
pub struct WgpuHost<'a> {
    ctx: RenderCtx<'a>,
    color_view: &'a wgpu::TextureView,

    shader: Option<WgpuShader>,
    blend_mode: BlendMode,
    quad: Option<WgpuQuad>,
    units: [Option<WgpuTexture>; TEXTURE_UNITS],

    draw_calls: u32,
    warned_incomplete: bool,
}

impl<'a> WgpuHost<'a> {
    pub fn new(ctx: RenderCtx<'a>, color_view: &'a wgpu::TextureView) -> Self {
        Self {
            ctx,
            color_view,
            shader: None,
            blend_mode: BlendMode::Normal,
            quad: None,
            units: Default::default(),
            draw_calls: 0,
            warned_incomplete: false,
        }
    }

    #[inline]
    pub fn ctx(&self) -> &RenderCtx<'a> {
        &self.ctx
    }

    /// Draws submitted through this host so far.
    #[inline]
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    fn warn_incomplete(&mut self, what: &str) {
        if !self.warned_incomplete {
            log::warn!("WgpuHost: draw with no {what} bound; skipped");
            self.warned_incomplete = true;
        }
    }
}

impl GpuContext for WgpuHost<'_> {
    type Shader = WgpuShader;
    type Quad = WgpuQuad;
    type Texture = WgpuTexture;

    fn create_shader(&mut self, variant: ShaderVariant) -> Result<WgpuShader> {
        WgpuShader::create(&self.ctx, variant)
    }

    fn create_quad(&mut self, _shader: &WgpuShader) -> Result<WgpuQuad> {
        // Vertex layout is fixed (PictureVertex), so any picture shader fits.
        Ok(WgpuQuad::create(&self.ctx))
    }

    fn bind_shader(&mut self, shader: &WgpuShader) {
        self.shader = Some(shader.clone());
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    fn bind_vertex_array(&mut self, quad: &WgpuQuad) {
        self.quad = Some(quad.clone());
    }

    fn upload_quad(&mut self, quad: &WgpuQuad, geometry: &QuadGeometry) {
        let vertices = interleave(geometry);
        self.ctx.queue.write_buffer(&quad.0.vbo, 0, bytemuck::cast_slice(&vertices));
    }

    fn set_uniform_vec4(&mut self, shader: &WgpuShader, uniform: Uniform, value: [f32; 4]) {
        let mut block = shader.0.uniforms.get();
        match uniform {
            Uniform::TextureClamp => block.texture_clamp = value,
            Uniform::Color => block.color = value,
        }
        shader.0.uniforms.set(block);
        log::trace!("{} = {value:?}", uniform.name());
    }

    fn set_sampler_unit(&mut self, shader: &WgpuShader, unit: u32) {
        shader.0.sampler_unit.set(unit);
    }

    fn bind_texture(&mut self, texture: &WgpuTexture, binding: TextureBinding) -> u32 {
        let unit = match binding {
            TextureBinding::Forced(unit) => {
                debug_assert!(
                    (unit as usize) < TEXTURE_UNITS,
                    "texture unit {unit} out of range (max {})",
                    TEXTURE_UNITS - 1
                );
                unit as usize
            }
            TextureBinding::Auto => self
                .units
                .iter()
                .position(|t| t.as_ref().is_some_and(|t| t.same_as(texture)))
                .or_else(|| self.units.iter().position(Option::is_none))
                .unwrap_or(0),
        };
        // Out-of-range units bind nothing; the next draw then finds no texture.
        if let Some(slot) = self.units.get_mut(unit) {
            *slot = Some(texture.clone());
        }
        unit as u32
    }

    fn draw_triangles(&mut self, count: u32, offset: u32) {
        let Some(shader) = self.shader.clone() else {
            self.warn_incomplete("shader");
            return;
        };
        let Some(quad) = self.quad.clone() else {
            self.warn_incomplete("vertex array");
            return;
        };
        let unit = shader.0.sampler_unit.get() as usize;
        let Some(texture) = self.units.get(unit).cloned().flatten() else {
            self.warn_incomplete("texture");
            return;
        };

        let device = self.ctx.device;
        let queue = self.ctx.queue;

        let mut block = shader.0.uniforms.get();
        block.viewport = [self.ctx.viewport.width.max(1.0), self.ctx.viewport.height.max(1.0)];
        queue.write_buffer(&shader.0.ubo, 0, bytemuck::bytes_of(&block));

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("picture texture bind group"),
            layout: &shader.0.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.0.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.0.sampler),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("picture draw encoder"),
        });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("picture pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&shader.0.pipelines[blend_index(self.blend_mode)]);
            rpass.set_bind_group(0, &shader.0.uniform_bind_group, &[]);
            rpass.set_bind_group(1, &texture_bind_group, &[]);
            rpass.set_vertex_buffer(0, quad.0.vbo.slice(..));
            rpass.set_index_buffer(quad.0.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(offset..offset + count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
        self.draw_calls += 1;
    }
}
