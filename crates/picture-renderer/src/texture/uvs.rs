use super::Frame;

/// Normalized texture coordinates of a frame's four corners.
///
/// Corner order matches quad vertex order: top-left (0), top-right (1),
/// bottom-right (2), bottom-left (3).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextureUvs {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub x3: f32,
    pub y3: f32,
}

impl TextureUvs {
    /// Computes corner UVs of `frame` inside a base texture of logical size
    /// `base_width` × `base_height`.
    pub fn from_frame(frame: Frame, base_width: f32, base_height: f32) -> Self {
        let u0 = frame.x / base_width;
        let v0 = frame.y / base_height;
        let u1 = frame.right() / base_width;
        let v1 = frame.bottom() / base_height;

        Self {
            x0: u0,
            y0: v0,
            x1: u1,
            y1: v0,
            x2: u1,
            y2: v1,
            x3: u0,
            y3: v1,
        }
    }

    /// Flattened `[x0, y0, x1, y1, x2, y2, x3, y3]`.
    #[inline]
    pub fn to_array(self) -> [f32; 8] {
        [self.x0, self.y0, self.x1, self.y1, self.x2, self.y2, self.x3, self.y3]
    }
}
