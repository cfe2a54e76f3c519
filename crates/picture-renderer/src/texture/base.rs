use std::cell::Cell;

/// Full GPU-resident image that frames are cut from.
///
/// Sizes:
/// - `real_*` are physical pixels.
/// - `width`/`height` are logical, i.e. real size divided by `resolution`.
///
/// `handle` is whatever the host uses to bind the image (see
/// [`GpuContext::Texture`](crate::host::GpuContext::Texture)).
#[derive(Debug)]
pub struct BaseTexture<T> {
    handle: T,
    real_width: f32,
    real_height: f32,
    resolution: f32,
    loaded: Cell<bool>,
}

impl<T> BaseTexture<T> {
    /// Creates a base texture that is not yet loaded.
    ///
    /// `resolution` values `<= 0` are treated as `1.0`.
    pub fn new(handle: T, real_width: u32, real_height: u32, resolution: f32) -> Self {
        let resolution = if resolution > 0.0 { resolution } else { 1.0 };
        Self {
            handle,
            real_width: real_width as f32,
            real_height: real_height as f32,
            resolution,
            loaded: Cell::new(false),
        }
    }

    /// Creates a base texture that is already usable.
    pub fn loaded(handle: T, real_width: u32, real_height: u32, resolution: f32) -> Self {
        let base = Self::new(handle, real_width, real_height, resolution);
        base.mark_loaded();
        base
    }

    #[inline]
    pub fn handle(&self) -> &T {
        &self.handle
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.real_width / self.resolution
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.real_height / self.resolution
    }

    #[inline]
    pub fn real_width(&self) -> f32 {
        self.real_width
    }

    #[inline]
    pub fn real_height(&self) -> f32 {
        self.real_height
    }

    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Flags pixel data as resident. Called by the host once an
    /// asynchronous load completes.
    pub fn mark_loaded(&self) {
        self.loaded.set(true);
    }

    /// Flags pixel data as gone (e.g. the image was evicted).
    pub fn mark_unloaded(&self) {
        self.loaded.set(false);
    }
}
