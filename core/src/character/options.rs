//! Load-time configuration.

use std::path::{Path, PathBuf};

/// Options controlling how a character is loaded.
///
/// # Example
///
/// ```
/// use redlilium_rig::character::LoadOptions;
///
/// let options = LoadOptions::new()
///     .with_texture_dir("assets/textures")
///     .with_flip_uvs(true);
/// assert!(options.flip_uvs);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Directory texture paths are resolved against. Defaults to the
    /// directory containing the model file.
    pub texture_dir: Option<PathBuf>,
    /// Replace each `v` texture coordinate with `1 - v`.
    pub flip_uvs: bool,
}

impl LoadOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the texture directory.
    pub fn with_texture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.texture_dir = Some(dir.into());
        self
    }

    /// Enable or disable V flipping.
    pub fn with_flip_uvs(mut self, flip: bool) -> Self {
        self.flip_uvs = flip;
        self
    }

    /// The texture directory for a model at `model_path`.
    pub fn resolve_texture_dir(&self, model_path: &Path) -> PathBuf {
        match &self.texture_dir {
            Some(dir) => dir.clone(),
            None => model_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}
