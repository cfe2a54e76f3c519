//! Host engine boundary.
//!
//! The picture renderer never owns the GPU. Every primitive it needs is
//! reached through a [`GpuContext`] handle that the host passes into each
//! call. The context carries GL-style global bind state (current shader,
//! blend mode, vertex array, texture units); renderers mutate it freely and
//! never restore it.
//!
//! A context is driven only from the thread that owns the render loop.

pub mod recorder;

/// Blend mode tag carried by each draw request.
///
/// All modes assume premultiplied-alpha source colors.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendMode {
    #[default]
    Normal,
    Add,
    Multiply,
    Screen,
}

impl BlendMode {
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Normal,
        BlendMode::Add,
        BlendMode::Multiply,
        BlendMode::Screen,
    ];
}

/// Shader program variant used for a picture draw.
///
/// Only `Normal` exists today; new render modes add variants here and a
/// matching arm in the renderer's dispatch.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ShaderVariant {
    #[default]
    Normal,
}

/// `vec4` uniforms exposed by the picture shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Uniform {
    /// `(u_min, v_min, u_max, v_max)` in normalized texture space.
    TextureClamp,
    /// Premultiplied RGBA tint.
    Color,
}

impl Uniform {
    /// Name of the uniform in shader source.
    pub const fn name(self) -> &'static str {
        match self {
            Uniform::TextureClamp => "uTextureClamp",
            Uniform::Color => "uColor",
        }
    }
}

/// How a base texture is attached to a texture unit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureBinding {
    /// Always bind into this unit, even if the texture is already resident
    /// in another one. Deterministic; may rebind every draw. Units other
    /// than 0 repoint the shader's sampler.
    Forced(u32),
    /// Let the host pick a unit, reusing one that already holds the texture.
    /// Fewer rebinds, but the sampler unit can differ between draws.
    Auto,
}

impl Default for TextureBinding {
    fn default() -> Self {
        TextureBinding::Forced(0)
    }
}

/// CPU-side staging for one quad: 4 positions and 4 UVs, x/y interleaved,
/// corner order top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct QuadGeometry {
    pub vertices: [f32; 8],
    pub uvs: [f32; 8],
}

/// Index count of one quad drawn as two triangles.
pub const QUAD_INDEX_COUNT: u32 = 6;

/// GPU primitives the host exposes to renderer plugins.
///
/// Handles (`Shader`, `Quad`, `Texture`) are host-owned resources. Setup
/// calls are fallible; per-draw calls are not.
pub trait GpuContext {
    type Shader;
    type Quad;
    type Texture;

    /// Compiles/links the picture shader for `variant` on the current context.
    fn create_shader(&mut self, variant: ShaderVariant) -> anyhow::Result<Self::Shader>;

    /// Creates a 4-vertex / 6-index quad with its vertex array laid out for `shader`.
    fn create_quad(&mut self, shader: &Self::Shader) -> anyhow::Result<Self::Quad>;

    fn bind_shader(&mut self, shader: &Self::Shader);

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn bind_vertex_array(&mut self, quad: &Self::Quad);

    /// Uploads positions and UVs into the quad's GPU buffers.
    fn upload_quad(&mut self, quad: &Self::Quad, geometry: &QuadGeometry);

    fn set_uniform_vec4(&mut self, shader: &Self::Shader, uniform: Uniform, value: [f32; 4]);

    /// Points the shader's `uSampler` at `unit`.
    fn set_sampler_unit(&mut self, shader: &Self::Shader, unit: u32);

    /// Binds `texture` per `binding` and returns the unit actually used.
    fn bind_texture(&mut self, texture: &Self::Texture, binding: TextureBinding) -> u32;

    /// Draws `count` indices of the bound vertex array as a triangle list, starting at `offset`.
    fn draw_triangles(&mut self, count: u32, offset: u32);
}
