//! Scene importers.
//!
//! An importer turns a model file into a [`Scene`]: a named node hierarchy
//! plus meshes with per-bone vertex weights. The rig consumes scenes only, so
//! any file format can be supported by implementing [`SceneImporter`].
//!
//! [`GltfImporter`] (feature `gltf`) reads `.gltf` and `.glb` files.

#[cfg(feature = "gltf")]
mod gltf;
#[cfg(all(test, feature = "gltf"))]
mod tests;

#[cfg(feature = "gltf")]
pub use self::gltf::{GltfImporter, SYNTHETIC_ROOT};

use std::path::Path;

use crate::error::ImportError;
use crate::scene::Scene;

/// Produces a [`Scene`] from a model file.
pub trait SceneImporter {
    /// Import the model at `path`.
    fn import(&self, path: &Path) -> Result<Scene, ImportError>;
}

impl<I: SceneImporter + ?Sized> SceneImporter for &I {
    fn import(&self, path: &Path) -> Result<Scene, ImportError> {
        (**self).import(path)
    }
}
