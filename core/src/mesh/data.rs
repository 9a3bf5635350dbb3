//! CPU-side skinned mesh data.
//!
//! This module provides:
//! - [`BoneInfluence`] - One bone index/weight slot
//! - [`Vertex`] - Rest position, UV, and up to four influences
//! - [`Submesh`] - A vertex run sharing one texture

use crate::texture::TextureHandle;

/// Maximum number of bones that may influence a single vertex.
pub const MAX_INFLUENCES: usize = 4;

/// One bone index/weight slot of a [`Vertex`].
///
/// A slot is empty when its weight is zero. `bone == None` means
/// "no influence".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoneInfluence {
    /// Index into the skeleton's bone array.
    pub bone: Option<usize>,
    /// Linear blend weight.
    pub weight: f32,
}

impl BoneInfluence {
    /// The empty slot.
    pub const NONE: Self = Self {
        bone: None,
        weight: 0.0,
    };

    /// Whether this slot has not been assigned a nonzero weight.
    pub fn is_empty(&self) -> bool {
        self.weight == 0.0
    }
}

/// A mesh vertex in the bind pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Rest position in mesh space.
    pub position: [f32; 3],
    /// Texture coordinate, passed through skinning unchanged.
    pub uv: [f32; 2],
    /// Bone influences. Weights are used as-is and never renormalized.
    pub influences: [BoneInfluence; MAX_INFLUENCES],
}

impl Vertex {
    /// Creates a vertex with no bone influences.
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            uv,
            influences: [BoneInfluence::NONE; MAX_INFLUENCES],
        }
    }

    /// Store an influence in the first empty slot.
    ///
    /// Returns `false` and leaves the vertex unchanged when all slots are
    /// already taken.
    pub fn add_influence(&mut self, bone: usize, weight: f32) -> bool {
        match self.influences.iter_mut().find(|slot| slot.is_empty()) {
            Some(slot) => {
                *slot = BoneInfluence {
                    bone: Some(bone),
                    weight,
                };
                true
            }
            None => false,
        }
    }

    /// Whether no slot carries a nonzero weight.
    pub fn is_unweighted(&self) -> bool {
        self.influences.iter().all(BoneInfluence::is_empty)
    }
}

/// A contiguous run of vertices drawn with one texture.
///
/// Created once at load time and immutable afterwards; skinned positions are
/// computed into separate buffers each frame.
#[derive(Debug, Clone)]
pub struct Submesh {
    vertices: Vec<Vertex>,
    indices: Option<Vec<u32>>,
    texture: TextureHandle,
    label: Option<String>,
}

impl Submesh {
    /// Create a submesh from vertices with no texture.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            indices: None,
            texture: TextureHandle::NONE,
            label: None,
        }
    }

    /// Set triangle-list indices.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Set the texture handle.
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = texture;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable access to vertices during skeleton construction.
    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the triangle-list indices, if any.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Get the texture handle.
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub(crate) fn set_texture(&mut self, texture: TextureHandle) {
        self.texture = texture;
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_is_unweighted() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.5, 0.5]);
        assert!(v.is_unweighted());
        assert!(v.influences.iter().all(|s| s.bone.is_none()));
    }

    #[test]
    fn influences_fill_first_empty_slot() {
        let mut v = Vertex::new([0.0; 3], [0.0; 2]);
        assert!(v.add_influence(3, 0.25));
        assert!(v.add_influence(1, 0.5));
        assert_eq!(v.influences[0], BoneInfluence { bone: Some(3), weight: 0.25 });
        assert_eq!(v.influences[1], BoneInfluence { bone: Some(1), weight: 0.5 });
        assert!(v.influences[2].is_empty());
    }

    #[test]
    fn fifth_influence_is_dropped() {
        let mut v = Vertex::new([0.0; 3], [0.0; 2]);
        for bone in 0..4 {
            assert!(v.add_influence(bone, 0.5));
        }
        let before = v;
        assert!(!v.add_influence(9, 0.9));
        assert_eq!(v, before);
        // Weights are not normalized.
        assert!(v.influences.iter().all(|slot| slot.weight == 0.5));
    }

    #[test]
    fn submesh_builder() {
        let sub = Submesh::new(vec![Vertex::new([0.0; 3], [0.0; 2]); 3])
            .with_indices(vec![0, 1, 2])
            .with_texture(TextureHandle::from_raw(7))
            .with_label("body");
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.indices(), Some(&[0, 1, 2][..]));
        assert_eq!(sub.texture(), TextureHandle::from_raw(7));
        assert_eq!(sub.label(), Some("body"));
    }
}
