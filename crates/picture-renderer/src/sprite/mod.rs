//! Per-draw sprite data handed to the picture renderer.

mod transform;

pub use transform::Transform2;

use crate::host::{BlendMode, ShaderVariant};
use crate::texture::Texture;

/// One draw request.
///
/// Lives for a single render call and is owned by the host. `vertex_data`
/// holds the four corners (TL, TR, BR, BL, x/y interleaved) already in the
/// host's screen space; the renderer copies it verbatim.
#[derive(Debug)]
pub struct PictureSprite<'a, T> {
    pub vertex_data: [f32; 8],
    pub texture: &'a Texture<T>,
    pub blend_mode: BlendMode,
    pub render_mode: ShaderVariant,
    /// Packed `0xRRGGBB`.
    pub tint: u32,
    /// Accumulated alpha in `[0, 1]`.
    pub world_alpha: f32,
}

impl<'a, T> PictureSprite<'a, T> {
    /// Untinted, opaque sprite with `Normal` blending.
    pub fn new(texture: &'a Texture<T>, vertex_data: [f32; 8]) -> Self {
        Self {
            vertex_data,
            texture,
            blend_mode: BlendMode::Normal,
            render_mode: ShaderVariant::Normal,
            tint: 0xFF_FF_FF,
            world_alpha: 1.0,
        }
    }

    /// Sprite whose frame is drawn at its pixel size under `transform`,
    /// with `anchor` as the normalized pivot inside the frame.
    pub fn placed(texture: &'a Texture<T>, transform: Transform2, anchor: (f32, f32)) -> Self {
        let frame = texture.frame();
        let vertex_data = Self::vertices(transform, anchor, frame.width, frame.height);
        Self::new(texture, vertex_data)
    }

    pub fn with_tint(mut self, tint: u32) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.world_alpha = alpha;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// Corners of a `width` × `height` rectangle pivoting on `anchor`,
    /// mapped through `transform`.
    pub fn vertices(
        transform: Transform2,
        anchor: (f32, f32),
        width: f32,
        height: f32,
    ) -> [f32; 8] {
        let x0 = -anchor.0 * width;
        let x1 = x0 + width;
        let y0 = -anchor.1 * height;
        let y1 = y0 + height;

        let (ax, ay) = transform.apply(x0, y0);
        let (bx, by) = transform.apply(x1, y0);
        let (cx, cy) = transform.apply(x1, y1);
        let (dx, dy) = transform.apply(x0, y1);

        [ax, ay, bx, by, cx, cy, dx, dy]
    }
}
