//! Texture-coordinate clamp bounds.
//!
//! Sampling is clamped to the sprite's own frame so linear filtering cannot
//! pull texels from neighbouring atlas frames. The near edge needs no inset
//! (texel centers start inside the frame); the far edge is pulled in by one
//! real pixel.

use crate::config::VerticalClamp;
use crate::texture::{BaseTexture, Frame};

/// Writes `(u_min, v_min, u_max, v_max)` for `frame` into `out`.
#[inline]
pub fn write_clamp<T>(
    out: &mut [f32; 4],
    frame: Frame,
    base: &BaseTexture<T>,
    vertical: VerticalClamp,
) {
    let width = base.width();
    let height = base.height();

    let v_inset = match vertical {
        VerticalClamp::RealHeight => 1.0 / base.real_height(),
        VerticalClamp::RealWidth => 1.0 / base.real_width(),
    };

    out[0] = frame.x / width;
    out[1] = frame.y / height;
    out[2] = frame.right() / width - 1.0 / base.real_width();
    out[3] = frame.bottom() / height - v_inset;
}

/// Returns the clamp bounds for `frame` as a fresh array.
pub fn clamp_bounds<T>(frame: Frame, base: &BaseTexture<T>, vertical: VerticalClamp) -> [f32; 4] {
    let mut out = [0.0; 4];
    write_clamp(&mut out, frame, base, vertical);
    out
}
