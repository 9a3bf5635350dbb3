//! Key-based texture handle cache.

use std::collections::HashMap;

use crate::error::TextureLoadError;
use crate::scene::EmbeddedImage;

use super::provider::TextureProvider;
use super::types::TextureHandle;

/// Maps texture keys to handles so each texture is decoded once.
///
/// File textures are keyed by their resolved path, embedded images by
/// [`EmbeddedImage::key`]. Failed decodes are cached as
/// [`TextureHandle::NONE`] and never retried.
#[derive(Debug, Default, Clone)]
pub struct TextureCache {
    entries: HashMap<String, TextureHandle>,
}

impl TextureCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached handle for `path`, decoding it through `provider` on
    /// first use.
    pub fn get_or_load(
        &mut self,
        path: &str,
        provider: &mut impl TextureProvider,
    ) -> TextureHandle {
        self.get_or_insert_with(path, || provider.load(path))
    }

    /// Return the cached handle for an embedded image, decoding its bytes
    /// through `provider` on first use.
    pub fn get_or_load_embedded(
        &mut self,
        image: &EmbeddedImage,
        provider: &mut impl TextureProvider,
    ) -> TextureHandle {
        self.get_or_insert_with(&image.key, || {
            provider.load_from_memory(&image.key, &image.data)
        })
    }

    fn get_or_insert_with(
        &mut self,
        key: &str,
        load: impl FnOnce() -> Result<TextureHandle, TextureLoadError>,
    ) -> TextureHandle {
        if let Some(&handle) = self.entries.get(key) {
            log::debug!("Texture cache hit: {key}");
            return handle;
        }

        let handle = match load() {
            Ok(handle) if handle.is_none() => {
                log::debug!("Provider returned no texture for {key}");
                handle
            }
            Ok(handle) => {
                log::info!("Loaded texture: {key}");
                handle
            }
            Err(e) => {
                log::warn!("{e}");
                TextureHandle::NONE
            }
        };
        self.entries.insert(key.to_string(), handle);
        handle
    }

    /// Get the cached handle for `key` without loading.
    pub fn get(&self, key: &str) -> Option<TextureHandle> {
        self.entries.get(key).copied()
    }

    /// Number of cached keys, including failed ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every cached handle.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
