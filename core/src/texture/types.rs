//! Texture handle and CPU pixel storage.

/// Opaque handle to a texture owned by a [`TextureProvider`](super::TextureProvider).
///
/// Handle `0` is the null texture ([`TextureHandle::NONE`]); submeshes whose
/// texture is missing or failed to decode keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// The null texture.
    pub const NONE: Self = Self(0);

    /// Wrap a raw provider id.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw provider id.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is the null texture.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct CpuTexture {
    /// Source path the texture was decoded from.
    pub name: Option<String>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub data: Vec<u8>,
}

impl CpuTexture {
    /// Bytes per pixel of the RGBA8 layout.
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Whether `data` matches `width * height` RGBA8 pixels.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * Self::BYTES_PER_PIXEL
    }
}
