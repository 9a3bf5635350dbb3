//! Scene description types consumed by the skeleton builder.
//!
//! These types are format-agnostic and can be produced by any
//! [`SceneImporter`](crate::import::SceneImporter) or built programmatically.
//!
//! - [`Scene`] - Hierarchy root plus meshes
//! - [`SceneNode`] - A named node with a local transform
//! - [`SceneMesh`] - Flat vertex data, bones, and a texture reference
//! - [`SceneBone`] / [`VertexWeight`] - Per-mesh bone weights
//! - [`TextureSource`] - Texture file path or embedded image bytes

mod types;

pub use types::{
    EmbeddedImage, Scene, SceneBone, SceneMesh, SceneNode, TextureSource, VertexWeight,
    WeightAssignment,
};
