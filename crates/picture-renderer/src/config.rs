//! Renderer configuration.

use crate::host::TextureBinding;

/// Which real dimension provides the one-pixel inset on the far V edge.
///
/// The horizontal inset is always `1 / real_width`. For the vertical one,
/// `RealWidth` reproduces the long-standing behavior of subtracting
/// `1 / real_width` on both axes; `RealHeight` uses the axis' own size.
/// The two agree for square textures.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum VerticalClamp {
    #[default]
    RealHeight,
    RealWidth,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PictureConfig {
    pub vertical_clamp: VerticalClamp,
    pub texture_binding: TextureBinding,
}

impl PictureConfig {
    /// Real-width vertical inset and texture unit 0, as in earlier releases.
    pub const fn legacy() -> Self {
        Self {
            vertical_clamp: VerticalClamp::RealWidth,
            texture_binding: TextureBinding::Forced(0),
        }
    }
}
