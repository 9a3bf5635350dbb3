//! CPU linear blend skinning.
//!
//! Each vertex position is `Σ wᵢ · (finalᵢ · rest)` over its influences with
//! `wᵢ > 0`. Weights are used exactly as imported: they are **not**
//! renormalized, so a vertex whose weights sum to 0.5 is pulled halfway
//! toward the origin. Vertices with no weight keep their rest position.

use bytemuck::{Pod, Zeroable};

use crate::math::{Vec3, transform_point};
use crate::mesh::{Submesh, Vertex};
use crate::skeleton::Bone;

/// A deformed vertex ready for drawing.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkinnedVertex {
    /// Deformed position.
    pub position: [f32; 3],
    /// Texture coordinate, unchanged from the rest vertex.
    pub uv: [f32; 2],
}

/// Deform one vertex by the current bone finals.
pub fn skin_position(vertex: &Vertex, bones: &[Bone]) -> Vec3 {
    let rest = Vec3::from(vertex.position);
    if vertex.is_unweighted() {
        return rest;
    }

    let mut position = Vec3::zeros();
    for slot in &vertex.influences {
        if slot.weight <= 0.0 {
            continue;
        }
        if let Some(bone) = slot.bone.and_then(|index| bones.get(index)) {
            position += transform_point(bone.final_transformation(), &rest) * slot.weight;
        }
    }
    position
}

/// Compute deformed positions for every vertex of a submesh.
///
/// Pure: the submesh is not modified.
pub fn deform(submesh: &Submesh, bones: &[Bone]) -> Vec<Vec3> {
    submesh
        .vertices()
        .iter()
        .map(|vertex| skin_position(vertex, bones))
        .collect()
}

/// Write the draw stream for a submesh into `out`, replacing its contents.
pub fn skin_into(submesh: &Submesh, bones: &[Bone], out: &mut Vec<SkinnedVertex>) {
    out.clear();
    out.extend(submesh.vertices().iter().map(|vertex| SkinnedVertex {
        position: skin_position(vertex, bones).into(),
        uv: vertex.uv,
    }));
}
