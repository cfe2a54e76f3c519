use anyhow::{Context, Result};

use crate::clamp::write_clamp;
use crate::config::PictureConfig;
use crate::host::{
    GpuContext, QuadGeometry, ShaderVariant, TextureBinding, Uniform, QUAD_INDEX_COUNT,
};
use crate::sprite::PictureSprite;
use crate::tint::write_premultiplied_tint;

use super::ObjectRenderer;

/// Observable lifecycle of a [`PictureRenderer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    Uninitialized,
    Ready,
}

/// Resources bound to one GPU context.
struct ContextResources<C: GpuContext> {
    normal_shader: C::Shader,
    quad: C::Quad,
}

/// Draws one textured quad per sprite, clamping UVs to the sprite's frame
/// and applying a premultiplied tint.
///
/// No batching: every `render` issues exactly one 6-index draw. GPU bind
/// state (shader, blend mode, vertex array, texture unit) is left as set.
///
/// The clamp/color scratch arrays and quad staging are reused across calls,
/// so a renderer must not be driven reentrantly or from several threads.
pub struct PictureRenderer<C: GpuContext> {
    config: PictureConfig,
    resources: Option<ContextResources<C>>,

    geometry: QuadGeometry,
    clamp: [f32; 4],
    color: [f32; 4],

    warned_uninitialized: bool,
}

impl<C: GpuContext> PictureRenderer<C> {
    pub fn new(config: PictureConfig) -> Self {
        Self {
            config,
            resources: None,
            geometry: QuadGeometry::default(),
            clamp: [0.0; 4],
            color: [0.0; 4],
            warned_uninitialized: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &PictureConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        if self.resources.is_some() {
            LifecycleState::Ready
        } else {
            LifecycleState::Uninitialized
        }
    }

    /// Clamp bounds written by the last completed draw.
    #[inline]
    pub fn last_clamp(&self) -> [f32; 4] {
        self.clamp
    }

    /// Premultiplied tint written by the last completed draw.
    #[inline]
    pub fn last_color(&self) -> [f32; 4] {
        self.color
    }

    fn init_resources(gl: &mut C) -> Result<ContextResources<C>> {
        let normal_shader = gl
            .create_shader(ShaderVariant::Normal)
            .context("failed to create picture shader")?;
        let quad = gl
            .create_quad(&normal_shader)
            .context("failed to create picture quad")?;
        Ok(ContextResources { normal_shader, quad })
    }

    #[allow(clippy::too_many_arguments)]
    fn render_normal(
        gl: &mut C,
        config: &PictureConfig,
        shader: &C::Shader,
        quad: &C::Quad,
        geometry: &mut QuadGeometry,
        clamp: &mut [f32; 4],
        color: &mut [f32; 4],
        sprite: &PictureSprite<'_, C::Texture>,
    ) {
        gl.bind_shader(shader);
        gl.set_blend_mode(sprite.blend_mode);
        gl.bind_vertex_array(quad);

        geometry.vertices = sprite.vertex_data;
        geometry.uvs = sprite.texture.uvs().to_array();
        gl.upload_quad(quad, geometry);

        let base = sprite.texture.base();
        write_clamp(clamp, sprite.texture.frame(), base, config.vertical_clamp);
        gl.set_uniform_vec4(shader, Uniform::TextureClamp, *clamp);

        write_premultiplied_tint(color, sprite.tint, sprite.world_alpha);
        gl.set_uniform_vec4(shader, Uniform::Color, *color);

        // The sampler defaults to unit 0; any other binding must repoint it.
        let unit = gl.bind_texture(base.handle(), config.texture_binding);
        if config.texture_binding != TextureBinding::Forced(0) {
            gl.set_sampler_unit(shader, unit);
        }

        gl.draw_triangles(QUAD_INDEX_COUNT, 0);
    }
}

impl<C: GpuContext> ObjectRenderer<C> for PictureRenderer<C> {
    fn on_context_change(&mut self, gl: &mut C) -> Result<()> {
        // Old handles belong to the previous context.
        self.resources = None;

        let resources = Self::init_resources(gl)?;
        self.resources = Some(resources);
        self.geometry = QuadGeometry::default();
        self.clamp = [0.0; 4];
        self.color = [0.0; 4];
        self.warned_uninitialized = false;

        log::debug!("picture renderer: context resources created");
        Ok(())
    }

    fn on_context_lost(&mut self) {
        if self.resources.take().is_some() {
            log::debug!("picture renderer: context lost, resources dropped");
        }
    }

    fn render(&mut self, gl: &mut C, sprite: &PictureSprite<'_, C::Texture>) {
        // Textures that are still loading just produce nothing this frame.
        if !sprite.texture.is_valid() {
            return;
        }

        let Self { config, resources, geometry, clamp, color, warned_uninitialized } = self;

        let Some(res) = resources.as_ref() else {
            if !*warned_uninitialized {
                log::warn!("picture renderer: render called before on_context_change; skipping");
                *warned_uninitialized = true;
            }
            return;
        };

        match sprite.render_mode {
            ShaderVariant::Normal => Self::render_normal(
                gl,
                config,
                &res.normal_shader,
                &res.quad,
                geometry,
                clamp,
                color,
                sprite,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::VerticalClamp;
    use crate::host::recorder::{GpuCall, QuadId, RecordingContext, ShaderId, TextureId};
    use crate::host::BlendMode;
    use crate::texture::{BaseTexture, Frame, Texture};

    const VERTS: [f32; 8] = [10.0, 10.0, 74.0, 10.0, 74.0, 74.0, 10.0, 74.0];

    fn ready(config: PictureConfig) -> (RecordingContext, PictureRenderer<RecordingContext>) {
        let mut gl = RecordingContext::new();
        let mut r = PictureRenderer::new(config);
        r.on_context_change(&mut gl).unwrap();
        gl.clear_calls();
        (gl, r)
    }

    fn atlas(w: u32, h: u32) -> Rc<BaseTexture<TextureId>> {
        Rc::new(BaseTexture::loaded(TextureId(100), w, h, 1.0))
    }

    #[test]
    fn starts_uninitialized_and_becomes_ready() {
        let mut gl = RecordingContext::new();
        let mut r = PictureRenderer::new(PictureConfig::default());
        assert_eq!(r.state(), LifecycleState::Uninitialized);

        r.on_context_change(&mut gl).unwrap();
        assert_eq!(r.state(), LifecycleState::Ready);
        assert_eq!(
            gl.calls(),
            &[GpuCall::CreateShader(ShaderVariant::Normal), GpuCall::CreateQuad(QuadId(2))]
        );
    }

    #[test]
    fn full_call_sequence() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        let tex = Texture::new(atlas(256, 256), Frame::new(0.0, 0.0, 64.0, 64.0));
        let sprite = PictureSprite::new(&tex, VERTS)
            .with_tint(0xFFFFFF)
            .with_alpha(0.5)
            .with_blend_mode(BlendMode::Add);

        r.render(&mut gl, &sprite);

        let shader = ShaderId(1);
        let quad = QuadId(2);
        assert_eq!(
            gl.calls(),
            &[
                GpuCall::BindShader(shader),
                GpuCall::SetBlendMode(BlendMode::Add),
                GpuCall::BindVertexArray(quad),
                GpuCall::UploadQuad {
                    quad,
                    geometry: QuadGeometry {
                        vertices: VERTS,
                        uvs: [0.0, 0.0, 0.25, 0.0, 0.25, 0.25, 0.0, 0.25],
                    },
                },
                GpuCall::SetUniformVec4 {
                    shader,
                    uniform: Uniform::TextureClamp,
                    value: [0.0, 0.0, 0.24609375, 0.24609375],
                },
                GpuCall::SetUniformVec4 {
                    shader,
                    uniform: Uniform::Color,
                    value: [0.5, 0.5, 0.5, 0.5],
                },
                GpuCall::BindTexture { texture: TextureId(100), unit: 0 },
                GpuCall::DrawTriangles { count: 6, offset: 0 },
            ]
        );
        assert_eq!(r.last_clamp(), [0.0, 0.0, 0.24609375, 0.24609375]);
        assert_eq!(r.last_color(), [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn invalid_texture_is_skipped_silently() {
        let (mut gl, mut r) = ready(PictureConfig::default());

        let loaded = Texture::new(atlas(128, 128), Frame::new(0.0, 0.0, 32.0, 32.0));
        r.render(&mut gl, &PictureSprite::new(&loaded, VERTS).with_tint(0xFF0000));
        let clamp = r.last_clamp();
        let color = r.last_color();
        gl.clear_calls();

        let pending = Rc::new(BaseTexture::new(TextureId(7), 128, 128, 1.0));
        let tex = Texture::new(pending, Frame::new(32.0, 32.0, 32.0, 32.0));
        r.render(&mut gl, &PictureSprite::new(&tex, VERTS).with_alpha(0.1));

        assert!(gl.calls().is_empty());
        assert_eq!(r.last_clamp(), clamp);
        assert_eq!(r.last_color(), color);
    }

    #[test]
    fn render_is_idempotent() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        let tex = Texture::new(atlas(512, 256), Frame::new(128.0, 64.0, 64.0, 64.0));
        let sprite = PictureSprite::new(&tex, VERTS).with_tint(0x336699).with_alpha(0.75);

        r.render(&mut gl, &sprite);
        let first = gl.take_calls();
        let (clamp, color) = (r.last_clamp(), r.last_color());

        r.render(&mut gl, &sprite);
        assert_eq!(gl.take_calls(), first);
        assert_eq!(r.last_clamp(), clamp);
        assert_eq!(r.last_color(), color);
    }

    #[test]
    fn always_draws_six_indices() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        let base = atlas(64, 64);
        let frames = [Frame::full(64.0, 64.0), Frame::new(1.0, 2.0, 3.0, 4.0)];
        for (i, frame) in frames.into_iter().enumerate() {
            let tex = Texture::new(Rc::clone(&base), frame);
            let mut verts = VERTS;
            verts[0] += i as f32 * 100.0;
            r.render(&mut gl, &PictureSprite::new(&tex, verts));
        }
        let draws: Vec<_> = gl
            .calls()
            .iter()
            .filter(|c| matches!(c, GpuCall::DrawTriangles { .. }))
            .collect();
        assert_eq!(draws, vec![&GpuCall::DrawTriangles { count: 6, offset: 0 }; 2]);
    }

    fn clamp_uniform(calls: &[GpuCall]) -> [f32; 4] {
        calls
            .iter()
            .find_map(|c| match c {
                GpuCall::SetUniformVec4 { uniform: Uniform::TextureClamp, value, .. } => {
                    Some(*value)
                }
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn default_vertical_inset_uses_real_height() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        let tex = Texture::new(atlas(512, 128), Frame::new(0.0, 0.0, 128.0, 64.0));
        r.render(&mut gl, &PictureSprite::new(&tex, VERTS));
        assert_eq!(clamp_uniform(gl.calls()), [0.0, 0.0, 0.25 - 1.0 / 512.0, 0.5 - 1.0 / 128.0]);
    }

    #[test]
    fn legacy_vertical_inset_uses_real_width() {
        let config =
            PictureConfig { vertical_clamp: VerticalClamp::RealWidth, ..PictureConfig::default() };
        let (mut gl, mut r) = ready(config);
        let tex = Texture::new(atlas(512, 128), Frame::new(0.0, 0.0, 128.0, 64.0));
        r.render(&mut gl, &PictureSprite::new(&tex, VERTS));
        assert_eq!(clamp_uniform(gl.calls()), [0.0, 0.0, 0.25 - 1.0 / 512.0, 0.5 - 1.0 / 512.0]);
    }

    #[test]
    fn auto_binding_points_sampler_at_returned_unit() {
        let config =
            PictureConfig { texture_binding: TextureBinding::Auto, ..PictureConfig::default() };
        let (mut gl, mut r) = ready(config);

        // Occupy unit 0 with an unrelated texture.
        gl.bind_texture(&TextureId(1), TextureBinding::Forced(0));
        gl.clear_calls();

        let tex = Texture::whole(atlas(32, 32));
        r.render(&mut gl, &PictureSprite::new(&tex, VERTS));

        let tail = &gl.calls()[gl.calls().len() - 3..];
        assert_eq!(
            tail,
            &[
                GpuCall::BindTexture { texture: TextureId(100), unit: 1 },
                GpuCall::SetSamplerUnit { shader: ShaderId(1), unit: 1 },
                GpuCall::DrawTriangles { count: 6, offset: 0 },
            ]
        );
    }

    #[test]
    fn forced_unit_zero_leaves_sampler_uniform_alone() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        let tex = Texture::whole(atlas(32, 32));
        r.render(&mut gl, &PictureSprite::new(&tex, VERTS));
        assert!(!gl.calls().iter().any(|c| matches!(c, GpuCall::SetSamplerUnit { .. })));
    }

    #[test]
    fn forced_nonzero_unit_points_sampler_at_it() {
        let config = PictureConfig {
            texture_binding: TextureBinding::Forced(3),
            ..PictureConfig::default()
        };
        let (mut gl, mut r) = ready(config);
        let tex = Texture::whole(atlas(32, 32));
        r.render(&mut gl, &PictureSprite::new(&tex, VERTS));

        let tail = &gl.calls()[gl.calls().len() - 3..];
        assert_eq!(
            tail,
            &[
                GpuCall::BindTexture { texture: TextureId(100), unit: 3 },
                GpuCall::SetSamplerUnit { shader: ShaderId(1), unit: 3 },
                GpuCall::DrawTriangles { count: 6, offset: 0 },
            ]
        );
        assert_eq!(gl.bound_texture(3), Some(TextureId(100)));
    }

    #[test]
    fn context_loss_requires_reinit() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        let tex = Texture::whole(atlas(16, 16));
        let sprite = PictureSprite::new(&tex, VERTS);

        r.on_context_lost();
        assert_eq!(r.state(), LifecycleState::Uninitialized);
        r.render(&mut gl, &sprite);
        assert!(gl.calls().is_empty());

        r.on_context_change(&mut gl).unwrap();
        gl.clear_calls();
        r.render(&mut gl, &sprite);
        // Fresh handles from the new context.
        assert_eq!(gl.calls()[0], GpuCall::BindShader(ShaderId(3)));
    }

    #[test]
    fn failed_context_change_leaves_renderer_uninitialized() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        gl.fail_setup(true);
        assert!(r.on_context_change(&mut gl).is_err());
        assert_eq!(r.state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn start_and_flush_issue_nothing() {
        let (mut gl, mut r) = ready(PictureConfig::default());
        r.start(&mut gl);
        r.flush(&mut gl);
        assert!(gl.calls().is_empty());
    }
}
