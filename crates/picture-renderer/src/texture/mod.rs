//! Texture data read by the picture renderer.
//!
//! A [`Texture`] is a frame (sub-rectangle) of a shared [`BaseTexture`],
//! typically one cell of an atlas.

mod base;
mod frame;
mod uvs;

use std::rc::Rc;

pub use base::BaseTexture;
pub use frame::Frame;
pub use uvs::TextureUvs;

#[derive(Debug)]
pub struct Texture<T> {
    base: Rc<BaseTexture<T>>,
    frame: Frame,
    uvs: TextureUvs,
}

impl<T> Clone for Texture<T> {
    fn clone(&self) -> Self {
        Self { base: Rc::clone(&self.base), frame: self.frame, uvs: self.uvs }
    }
}

impl<T> Texture<T> {
    pub fn new(base: Rc<BaseTexture<T>>, frame: Frame) -> Self {
        let uvs = TextureUvs::from_frame(frame, base.width(), base.height());
        Self { base, frame, uvs }
    }

    /// Texture showing the whole base image.
    pub fn whole(base: Rc<BaseTexture<T>>) -> Self {
        let frame = Frame::full(base.width(), base.height());
        Self::new(base, frame)
    }

    #[inline]
    pub fn base(&self) -> &BaseTexture<T> {
        &self.base
    }

    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    #[inline]
    pub fn uvs(&self) -> &TextureUvs {
        &self.uvs
    }

    /// Moves the texture to another region of the same base image.
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
        self.uvs = TextureUvs::from_frame(frame, self.base.width(), self.base.height());
    }

    /// A texture is drawable once its base is loaded and its frame is non-empty.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.base.is_loaded() && !self.frame.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_base_load_state() {
        let base = Rc::new(BaseTexture::new((), 64, 64, 1.0));
        let tex = Texture::new(Rc::clone(&base), Frame::new(0.0, 0.0, 16.0, 16.0));
        assert!(!tex.is_valid());
        base.mark_loaded();
        assert!(tex.is_valid());
    }

    #[test]
    fn empty_frame_is_invalid() {
        let base = Rc::new(BaseTexture::loaded((), 64, 64, 1.0));
        let tex = Texture::new(base, Frame::new(0.0, 0.0, 0.0, 16.0));
        assert!(!tex.is_valid());
    }

    #[test]
    fn set_frame_recomputes_uvs() {
        let base = Rc::new(BaseTexture::loaded((), 128, 128, 1.0));
        let mut tex = Texture::whole(base);
        assert_eq!(tex.uvs().x2, 1.0);
        tex.set_frame(Frame::new(64.0, 64.0, 32.0, 32.0));
        assert_eq!(tex.uvs().to_array(), [0.5, 0.5, 0.75, 0.5, 0.75, 0.75, 0.5, 0.75]);
    }

    #[test]
    fn uvs_use_logical_size() {
        // 2x resolution: 256 real px == 128 logical px.
        let base = Rc::new(BaseTexture::loaded((), 256, 256, 2.0));
        let tex = Texture::new(base, Frame::new(0.0, 0.0, 64.0, 64.0));
        assert_eq!(tex.uvs().x1, 0.5);
    }
}
