//! Texture provider collaborator.

use crate::error::TextureLoadError;

use super::types::TextureHandle;
#[cfg(feature = "images")]
use super::types::CpuTexture;

/// Decodes textures and hands out opaque handles.
///
/// Implementations may upload to a GPU, keep pixels on the CPU, or just
/// record the request. The [`TextureCache`](super::TextureCache) guarantees
/// each method is called at most once per distinct key.
pub trait TextureProvider {
    /// Decode the texture file at `path`.
    fn load(&mut self, path: &str) -> Result<TextureHandle, TextureLoadError>;

    /// Decode encoded image bytes that came from inside a model file.
    ///
    /// `key` names the image in logs and errors.
    fn load_from_memory(
        &mut self,
        key: &str,
        bytes: &[u8],
    ) -> Result<TextureHandle, TextureLoadError>;
}

impl<P: TextureProvider + ?Sized> TextureProvider for &mut P {
    fn load(&mut self, path: &str) -> Result<TextureHandle, TextureLoadError> {
        (**self).load(path)
    }

    fn load_from_memory(
        &mut self,
        key: &str,
        bytes: &[u8],
    ) -> Result<TextureHandle, TextureLoadError> {
        (**self).load_from_memory(key, bytes)
    }
}

/// Provider that never loads anything. Every submesh stays untextured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTextureProvider;

impl TextureProvider for NullTextureProvider {
    fn load(&mut self, _path: &str) -> Result<TextureHandle, TextureLoadError> {
        Ok(TextureHandle::NONE)
    }

    fn load_from_memory(
        &mut self,
        _key: &str,
        _bytes: &[u8],
    ) -> Result<TextureHandle, TextureLoadError> {
        Ok(TextureHandle::NONE)
    }
}

/// Provider that decodes image files to RGBA8 with the `image` crate.
///
/// Handles are sequential starting at 1; handle `n` addresses the `n`-th
/// decoded texture.
#[cfg(feature = "images")]
#[derive(Debug, Default)]
pub struct ImageTextureProvider {
    textures: Vec<CpuTexture>,
}

#[cfg(feature = "images")]
impl ImageTextureProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the pixels behind a handle.
    pub fn texture(&self, handle: TextureHandle) -> Option<&CpuTexture> {
        let index = (handle.raw() as usize).checked_sub(1)?;
        self.textures.get(index)
    }

    /// Number of decoded textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether nothing has been decoded yet.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn register(&mut self, name: &str, img: image::DynamicImage) -> TextureHandle {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        self.textures.push(CpuTexture {
            name: Some(name.to_string()),
            width,
            height,
            data: rgba.into_raw(),
        });
        TextureHandle::from_raw(self.textures.len() as u32)
    }
}

#[cfg(feature = "images")]
impl TextureProvider for ImageTextureProvider {
    fn load(&mut self, path: &str) -> Result<TextureHandle, TextureLoadError> {
        let bytes = std::fs::read(path).map_err(|source| TextureLoadError::Io {
            path: path.to_string(),
            source,
        })?;
        self.load_from_memory(path, &bytes)
    }

    fn load_from_memory(
        &mut self,
        key: &str,
        bytes: &[u8],
    ) -> Result<TextureHandle, TextureLoadError> {
        let img = image::load_from_memory(bytes).map_err(|e| TextureLoadError::Decode {
            path: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.register(key, img))
    }
}
