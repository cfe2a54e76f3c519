//! A `GpuContext` that records calls instead of touching a GPU.
//!
//! Handles are plain ids. Useful for asserting exact call sequences in tests
//! and for hosts that want to inspect what a renderer would have issued.

use anyhow::{bail, Result};

use super::{BlendMode, GpuContext, QuadGeometry, ShaderVariant, TextureBinding, Uniform};

/// Number of texture units the recorder pretends to have.
pub const RECORDER_TEXTURE_UNITS: usize = 8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct QuadId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    CreateShader(ShaderVariant),
    CreateQuad(QuadId),
    BindShader(ShaderId),
    SetBlendMode(BlendMode),
    BindVertexArray(QuadId),
    UploadQuad { quad: QuadId, geometry: QuadGeometry },
    SetUniformVec4 { shader: ShaderId, uniform: Uniform, value: [f32; 4] },
    SetSamplerUnit { shader: ShaderId, unit: u32 },
    BindTexture { texture: TextureId, unit: u32 },
    DrawTriangles { count: u32, offset: u32 },
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Vec<GpuCall>,
    next_id: u32,
    units: [Option<TextureId>; RECORDER_TEXTURE_UNITS],
    fail_setup: bool,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create_shader` / `create_quad` fail, emulating a lost context.
    pub fn fail_setup(&mut self, fail: bool) {
        self.fail_setup = fail;
    }

    pub fn calls(&self) -> &[GpuCall] {
        &self.calls
    }

    /// Returns and clears the recorded calls.
    pub fn take_calls(&mut self) -> Vec<GpuCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Texture currently resident in `unit`.
    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.units.get(unit as usize).copied().flatten()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GpuContext for RecordingContext {
    type Shader = ShaderId;
    type Quad = QuadId;
    type Texture = TextureId;

    fn create_shader(&mut self, variant: ShaderVariant) -> Result<ShaderId> {
        if self.fail_setup {
            bail!("recording context: shader creation disabled");
        }
        self.calls.push(GpuCall::CreateShader(variant));
        Ok(ShaderId(self.next()))
    }

    fn create_quad(&mut self, _shader: &ShaderId) -> Result<QuadId> {
        if self.fail_setup {
            bail!("recording context: quad creation disabled");
        }
        let id = QuadId(self.next());
        self.calls.push(GpuCall::CreateQuad(id));
        Ok(id)
    }

    fn bind_shader(&mut self, shader: &ShaderId) {
        self.calls.push(GpuCall::BindShader(*shader));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.calls.push(GpuCall::SetBlendMode(mode));
    }

    fn bind_vertex_array(&mut self, quad: &QuadId) {
        self.calls.push(GpuCall::BindVertexArray(*quad));
    }

    fn upload_quad(&mut self, quad: &QuadId, geometry: &QuadGeometry) {
        self.calls.push(GpuCall::UploadQuad { quad: *quad, geometry: *geometry });
    }

    fn set_uniform_vec4(&mut self, shader: &ShaderId, uniform: Uniform, value: [f32; 4]) {
        self.calls.push(GpuCall::SetUniformVec4 { shader: *shader, uniform, value });
    }

    fn set_sampler_unit(&mut self, shader: &ShaderId, unit: u32) {
        self.calls.push(GpuCall::SetSamplerUnit { shader: *shader, unit });
    }

    fn bind_texture(&mut self, texture: &TextureId, binding: TextureBinding) -> u32 {
        let unit = match binding {
            TextureBinding::Forced(unit) => unit,
            TextureBinding::Auto => self
                .units
                .iter()
                .position(|t| *t == Some(*texture))
                .or_else(|| self.units.iter().position(Option::is_none))
                .unwrap_or(0) as u32,
        };
        if let Some(slot) = self.units.get_mut(unit as usize) {
            *slot = Some(*texture);
        }
        self.calls.push(GpuCall::BindTexture { texture: *texture, unit });
        unit
    }

    fn draw_triangles(&mut self, count: u32, offset: u32) {
        self.calls.push(GpuCall::DrawTriangles { count, offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_binding_reuses_resident_unit() {
        let mut gl = RecordingContext::new();
        let a = TextureId(10);
        let b = TextureId(11);

        assert_eq!(gl.bind_texture(&a, TextureBinding::Auto), 0);
        assert_eq!(gl.bind_texture(&b, TextureBinding::Auto), 1);
        assert_eq!(gl.bind_texture(&a, TextureBinding::Auto), 0);
        assert_eq!(gl.bound_texture(1), Some(b));
    }

    #[test]
    fn forced_binding_overwrites_unit() {
        let mut gl = RecordingContext::new();
        gl.bind_texture(&TextureId(1), TextureBinding::Auto);
        let unit = gl.bind_texture(&TextureId(2), TextureBinding::Forced(0));
        assert_eq!(unit, 0);
        assert_eq!(gl.bound_texture(0), Some(TextureId(2)));
    }

    #[test]
    fn failing_setup_records_nothing() {
        let mut gl = RecordingContext::new();
        gl.fail_setup(true);
        assert!(gl.create_shader(ShaderVariant::Normal).is_err());
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn take_calls_drains() {
        let mut gl = RecordingContext::new();
        gl.draw_triangles(6, 0);
        assert_eq!(gl.take_calls(), vec![GpuCall::DrawTriangles { count: 6, offset: 0 }]);
        assert!(gl.calls().is_empty());
    }
}
