//! Tint conversion for the `uColor` uniform.

/// Unpacks `0xRRGGBB` into normalized `[r, g, b]`. Bits above 24 are ignored.
#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Writes the premultiplied tint `(r·a, g·a, b·a, a)` into `out`.
///
/// `alpha` is used as given; callers own its range.
#[inline]
pub fn write_premultiplied_tint(out: &mut [f32; 4], tint: u32, alpha: f32) {
    let [r, g, b] = hex_to_rgb(tint);
    out[0] = r * alpha;
    out[1] = g * alpha;
    out[2] = b * alpha;
    out[3] = alpha;
}

/// Returns the premultiplied tint as a fresh array.
pub fn premultiplied_tint(tint: u32, alpha: f32) -> [f32; 4] {
    let mut out = [0.0; 4];
    write_premultiplied_tint(&mut out, tint, alpha);
    out
}
