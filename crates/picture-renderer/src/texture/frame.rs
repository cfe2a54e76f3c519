/// Sub-image rectangle inside a base texture, in logical pixels
/// (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Frame covering a whole `width` × `height` texture.
    #[inline]
    pub const fn full(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True if the frame lies inside `[0, width] × [0, height]`.
    #[inline]
    pub fn fits_within(self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    /// Frame at `(col, row)` of a uniform grid of `cell_w` × `cell_h` cells.
    #[inline]
    pub fn grid_cell(col: u32, row: u32, cell_w: f32, cell_h: f32) -> Self {
        Self::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let f = Frame::new(8.0, 16.0, 32.0, 4.0);
        assert_eq!(f.right(), 40.0);
        assert_eq!(f.bottom(), 20.0);
    }

    #[test]
    fn empty_when_degenerate() {
        assert!(Frame::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(Frame::new(0.0, 0.0, 5.0, -1.0).is_empty());
        assert!(!Frame::full(1.0, 1.0).is_empty());
    }

    #[test]
    fn fits_within_is_inclusive_of_far_edge() {
        assert!(Frame::new(192.0, 192.0, 64.0, 64.0).fits_within(256.0, 256.0));
        assert!(!Frame::new(193.0, 0.0, 64.0, 64.0).fits_within(256.0, 256.0));
        assert!(!Frame::new(-1.0, 0.0, 4.0, 4.0).fits_within(256.0, 256.0));
    }

    #[test]
    fn grid_cell_offsets() {
        assert_eq!(Frame::grid_cell(2, 1, 64.0, 32.0), Frame::new(128.0, 32.0, 64.0, 32.0));
    }
}
