//! Bone arena, pose control, and transform composition.
//!
//! - [`build`] - Construct submeshes and a [`Skeleton`] from a [`Scene`](crate::scene::Scene)
//! - [`Skeleton`] - Flat bone array with a name map and a cached evaluation order
//! - [`Bone`] - One joint with bind, manual, and derived transforms
//! - [`Rotation`] - Axis-angle or quaternion pose request
//!
//! # Frame protocol
//!
//! Pose changes ([`Skeleton::set_bone_rotation`]) only touch
//! `manual_rotation`. Call [`Skeleton::update`] once per frame afterwards to
//! refresh every bone's final matrix before skinning.

mod bone;
mod builder;
pub mod compose;
mod pose;

pub use bone::Bone;
pub use builder::build;
pub use pose::Rotation;

use std::collections::HashMap;

use crate::error::UnknownBoneError;
use crate::math::Mat4;

/// A flat bone array addressed by index, with parents stored as indices.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
    names: HashMap<String, usize>,
    order: Vec<usize>,
}

impl Skeleton {
    /// Create an empty skeleton.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(bones: Vec<Bone>, names: HashMap<String, usize>) -> Self {
        let order = compose::evaluation_order(&bones);
        let mut skeleton = Self {
            bones,
            names,
            order,
        };
        skeleton.update();
        skeleton
    }

    /// Number of bones.
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// All bones, indexed as referenced by vertices and parents.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Get a bone by index.
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// Look up a bone index by name.
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Get a bone by name.
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bone_index(name).map(|index| &self.bones[index])
    }

    /// Bone indices with every parent ahead of its children.
    pub fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Replace the manual rotation of the named bone.
    ///
    /// The previous rotation is discarded, not composed. Nothing changes when
    /// the name is unknown.
    pub fn set_bone_rotation(
        &mut self,
        name: &str,
        rotation: impl Into<Rotation>,
    ) -> Result<(), UnknownBoneError> {
        let index = self.bone_index(name).ok_or_else(|| UnknownBoneError {
            name: name.to_string(),
        })?;
        self.bones[index].manual_rotation = rotation.into().to_matrix();
        Ok(())
    }

    /// Replace the manual rotation of a bone by index.
    ///
    /// Returns `false` if the index is out of range.
    pub fn set_bone_rotation_by_index(&mut self, index: usize, rotation: impl Into<Rotation>) -> bool {
        match self.bones.get_mut(index) {
            Some(bone) => {
                bone.manual_rotation = rotation.into().to_matrix();
                true
            }
            None => false,
        }
    }

    /// Reset every manual rotation to identity.
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.manual_rotation = Mat4::identity();
        }
    }

    /// Recompute global and final transforms for every bone.
    pub fn update(&mut self) {
        compose::update_all(&mut self.bones, &self.order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, mat4_from_translation};
    use crate::scene::{Scene, SceneBone, SceneMesh, SceneNode};
    use std::f32::consts::FRAC_PI_2;

    fn about(axis: Vec3, angle: f32) -> Rotation {
        Rotation::AxisAngle { axis, angle }
    }

    fn chain_skeleton() -> Skeleton {
        let t = mat4_from_translation(Vec3::new(1.0, 0.0, 0.0));
        let root = SceneNode::new("root").with_children(vec![
            SceneNode::new("mid")
                .with_transform(t)
                .with_children(vec![SceneNode::new("tip").with_transform(t)]),
        ]);
        let mesh = SceneMesh::new(vec![[0.0; 3]]).with_bones(vec![
            SceneBone::new("root").with_weight(0, 0.25),
            SceneBone::new("mid").with_weight(0, 0.25),
            SceneBone::new("tip").with_weight(0, 0.5),
        ]);
        let (_, skeleton) = build(&Scene::new(root).with_meshes(vec![mesh])).unwrap();
        skeleton
    }

    fn finals(skeleton: &Skeleton) -> Vec<Mat4> {
        skeleton
            .bones()
            .iter()
            .map(|b| *b.final_transformation())
            .collect()
    }

    #[test]
    fn built_skeleton_is_up_to_date() {
        let skeleton = chain_skeleton();
        for index in 0..skeleton.len() {
            assert_eq!(
                Some(*skeleton.bones()[index].final_transformation()),
                compose::final_transform_recursive(skeleton.bones(), index)
            );
        }
    }

    #[test]
    fn second_rotation_overwrites_first() {
        let mut once = chain_skeleton();
        once.set_bone_rotation("mid", about(Vec3::z(), 0.3)).unwrap();
        once.update();

        let mut twice = chain_skeleton();
        twice.set_bone_rotation("mid", about(Vec3::x(), 1.2)).unwrap();
        twice.set_bone_rotation("mid", about(Vec3::z(), 0.3)).unwrap();
        twice.update();

        assert_eq!(finals(&once), finals(&twice));
    }

    #[test]
    fn unknown_bone_changes_nothing() {
        let mut skeleton = chain_skeleton();
        skeleton.set_bone_rotation("tip", about(Vec3::y(), 0.5)).unwrap();
        skeleton.update();
        let before = finals(&skeleton);

        let err = skeleton
            .set_bone_rotation("tail", about(Vec3::z(), FRAC_PI_2))
            .unwrap_err();
        assert_eq!(err.name, "tail");
        skeleton.update();
        assert_eq!(finals(&skeleton), before);
    }

    #[test]
    fn set_by_index_and_reset() {
        let mut skeleton = chain_skeleton();
        assert!(skeleton.set_bone_rotation_by_index(1, about(Vec3::z(), FRAC_PI_2)));
        assert!(!skeleton.set_bone_rotation_by_index(7, about(Vec3::z(), FRAC_PI_2)));
        assert_ne!(skeleton.bones()[1].manual_rotation(), &Mat4::identity());

        skeleton.reset_pose();
        assert!(skeleton
            .bones()
            .iter()
            .all(|b| b.manual_rotation() == &Mat4::identity()));
    }

    #[test]
    fn lookup_by_name() {
        let skeleton = chain_skeleton();
        assert_eq!(skeleton.bone_by_name("tip").map(Bone::parent), Some(Some(1)));
        assert!(skeleton.bone_by_name("nope").is_none());
        assert_eq!(skeleton.evaluation_order(), &[0, 1, 2]);
    }
}
