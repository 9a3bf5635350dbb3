//! Texture handles, providers, and the per-character texture cache.
//!
//! Provides [`TextureHandle`] for referencing decoded textures, the
//! [`TextureProvider`] collaborator trait, and [`TextureCache`] which
//! guarantees at most one decode per distinct key.

mod cache;
mod provider;
mod types;

pub use cache::TextureCache;
#[cfg(feature = "images")]
pub use provider::ImageTextureProvider;
pub use provider::{NullTextureProvider, TextureProvider};
pub use types::{CpuTexture, TextureHandle};
