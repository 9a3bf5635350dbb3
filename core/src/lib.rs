//! # RedLilium Rig
//!
//! CPU skeletal rig and skinning core: builds a bone hierarchy from an
//! imported scene, composes per-bone transforms, and deforms mesh vertices on
//! the CPU every frame.
//!
//! - [`import`] - Scene importers ([`import::GltfImporter`])
//! - [`scene`] - Format-agnostic importer output
//! - [`skeleton`] - Skeleton builder, pose controller, transform composer
//! - [`skinning`] - Linear blend skinning evaluator
//! - [`texture`] - Texture providers and the path-keyed cache
//! - [`character`] - The container tying it all together
//! - [`render`] - Renderer collaborator interface

pub mod character;
pub mod error;
pub mod import;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod skeleton;
pub mod skinning;
pub mod texture;

pub use character::{Character, LoadOptions, PosedCharacter};
pub use error::{ImportError, TextureLoadError, UnknownBoneError};
pub use skeleton::Rotation;

/// Rig library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
