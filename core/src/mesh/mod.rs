//! CPU-side skinned mesh types.
//!
//! - [`Vertex`] - Rest-pose vertex with up to [`MAX_INFLUENCES`] bone weights
//! - [`BoneInfluence`] - One bone index/weight slot
//! - [`Submesh`] - Vertices sharing one texture, the unit handed to renderers

mod data;

pub use data::{BoneInfluence, MAX_INFLUENCES, Submesh, Vertex};
