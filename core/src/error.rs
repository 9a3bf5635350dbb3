//! Error types for loading and posing characters.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading a scene.
///
/// Fatal for the asset being loaded only; a character that fails to load
/// keeps whatever model it held before.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("scene has no root node")]
    NoScene,
    #[error("mesh {mesh} primitive {primitive} has no POSITION attribute")]
    MissingPositions { mesh: usize, primitive: usize },
    #[error("unsupported topology: {0}")]
    UnsupportedTopology(String),
    #[error("mesh {mesh} references joint {joint}, skin has {joint_count}")]
    InvalidJoint {
        mesh: usize,
        joint: usize,
        joint_count: usize,
    },
    #[error("incomplete scene: {0}")]
    IncompleteScene(String),
}

#[cfg(feature = "gltf")]
impl From<gltf_dep::Error> for ImportError {
    fn from(e: gltf_dep::Error) -> Self {
        Self::Parse(Box::new(e))
    }
}

/// A texture could not be decoded. The submesh keeps a null handle.
#[derive(Error, Debug)]
pub enum TextureLoadError {
    #[error("failed to decode texture {path}: {message}")]
    Decode { path: String, message: String },
    #[error("failed to read texture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A pose request named a bone the skeleton does not have.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bone: {name}")]
pub struct UnknownBoneError {
    pub name: String,
}
