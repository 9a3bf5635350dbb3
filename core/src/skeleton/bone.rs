//! Bone records stored in the skeleton arena.

use crate::math::Mat4;

/// A named joint in the skeleton.
///
/// Bones live in a flat array owned by [`Skeleton`](super::Skeleton) and
/// reference their parent by index. Only `manual_rotation` changes after
/// loading; `global_transformation` and `final_transformation` are derived
/// by [`Skeleton::update`](super::Skeleton::update).
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub(crate) name: String,
    pub(crate) parent: Option<usize>,
    pub(crate) offset_matrix: Mat4,
    pub(crate) default_local_transform: Mat4,
    pub(crate) bind_global: Mat4,
    pub(crate) manual_rotation: Mat4,
    pub(crate) global_transformation: Mat4,
    pub(crate) final_transformation: Mat4,
}

impl Bone {
    /// Creates a root bone with the given offset and identity everywhere else.
    pub(crate) fn new(name: impl Into<String>, offset_matrix: Mat4) -> Self {
        Self {
            name: name.into(),
            parent: None,
            offset_matrix,
            default_local_transform: Mat4::identity(),
            bind_global: Mat4::identity(),
            manual_rotation: Mat4::identity(),
            global_transformation: Mat4::identity(),
            final_transformation: Mat4::identity(),
        }
    }

    /// Bone name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent bone index, `None` for roots.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Maps mesh-space rest positions into bone-local space (inverse bind).
    pub fn offset_matrix(&self) -> &Mat4 {
        &self.offset_matrix
    }

    /// Bind-pose transform relative to the parent bone, including any plain
    /// nodes between the two.
    pub fn default_local_transform(&self) -> &Mat4 {
        &self.default_local_transform
    }

    /// Accumulated transform of the matched hierarchy node in the bind pose,
    /// including non-bone ancestors.
    pub fn bind_global(&self) -> &Mat4 {
        &self.bind_global
    }

    /// Externally requested rotation, identity by default.
    pub fn manual_rotation(&self) -> &Mat4 {
        &self.manual_rotation
    }

    /// Posed transform of the bone relative to the skeleton root, as of the
    /// last update.
    pub fn global_transformation(&self) -> &Mat4 {
        &self.global_transformation
    }

    /// Skinning matrix as of the last update: global transform times offset.
    pub fn final_transformation(&self) -> &Mat4 {
        &self.final_transformation
    }

    /// `default_local_transform * manual_rotation`.
    pub(crate) fn posed_local(&self) -> Mat4 {
        self.default_local_transform * self.manual_rotation
    }
}
