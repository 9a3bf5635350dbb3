//! Skeleton construction from an imported scene.
//!
//! Bones are indexed in the order their names are first seen while walking the
//! meshes' weight assignments. The hierarchy is then walked depth-first
//! (pre-order, children in source order) to attach parents and bind-pose
//! local transforms. Both orders are observable through [`Bone::parent`].

use std::collections::HashMap;

use crate::error::ImportError;
use crate::math::Mat4;
use crate::mesh::{Submesh, Vertex};
use crate::scene::{Scene, SceneMesh, SceneNode};

use super::Skeleton;
use super::bone::Bone;

/// Build submeshes and the bone arena from a scene.
///
/// Submeshes come back untextured; texture resolution is the container's job.
pub fn build(scene: &Scene) -> Result<(Vec<Submesh>, Skeleton), ImportError> {
    let mut builder = SkeletonBuilder::default();

    let mut submeshes = Vec::with_capacity(scene.meshes.len());
    for (mesh_index, mesh) in scene.meshes.iter().enumerate() {
        submeshes.push(builder.build_submesh(mesh_index, mesh)?);
    }

    builder.attach_hierarchy(&scene.root);
    Ok((submeshes, builder.finish()))
}

#[derive(Default)]
struct SkeletonBuilder {
    bones: Vec<Bone>,
    names: HashMap<String, usize>,
}

impl SkeletonBuilder {
    /// Return the bone index for `name`, registering it on first sight.
    fn bone_index(&mut self, name: &str, offset_matrix: &Mat4) -> usize {
        if let Some(&index) = self.names.get(name) {
            return index;
        }
        let index = self.bones.len();
        self.bones.push(Bone::new(name, *offset_matrix));
        self.names.insert(name.to_string(), index);
        index
    }

    fn build_submesh(&mut self, mesh_index: usize, mesh: &SceneMesh) -> Result<Submesh, ImportError> {
        let mut vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let uv = mesh.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]);
                Vertex::new(position, uv)
            })
            .collect();

        let mut dropped = 0usize;
        for assignment in mesh.weight_assignments() {
            let bone = self.bone_index(&assignment.bone.name, &assignment.bone.offset_matrix);
            let vertex = vertices.get_mut(assignment.vertex).ok_or_else(|| {
                ImportError::IncompleteScene(format!(
                    "mesh {mesh_index}: bone '{}' weights vertex {} of {}",
                    assignment.bone.name,
                    assignment.vertex,
                    mesh.positions.len()
                ))
            })?;
            if !vertex.add_influence(bone, assignment.weight) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!(
                "Mesh {mesh_index}: dropped {dropped} influences beyond {} per vertex",
                crate::mesh::MAX_INFLUENCES
            );
        }

        let mut submesh = Submesh::new(vertices);
        if let Some(indices) = &mesh.indices {
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= mesh.positions.len()) {
                return Err(ImportError::IncompleteScene(format!(
                    "mesh {mesh_index}: index {bad} out of range for {} vertices",
                    mesh.positions.len()
                )));
            }
            submesh = submesh.with_indices(indices.clone());
        }
        if let Some(name) = &mesh.name {
            submesh = submesh.with_label(name.clone());
        }
        Ok(submesh)
    }

    /// Walk the hierarchy and attach parents and local transforms to bones.
    ///
    /// Transforms of plain nodes between two bones are folded into the lower
    /// bone's local transform, so the bind pose still matches the hierarchy.
    fn attach_hierarchy(&mut self, root: &SceneNode) {
        let mut attached = vec![false; self.bones.len()];
        // (node, accumulated parent transform, plain-node product since the last bone, parent bone)
        let mut stack: Vec<(&SceneNode, Mat4, Mat4, Option<usize>)> =
            vec![(root, Mat4::identity(), Mat4::identity(), None)];

        while let Some((node, parent_accumulated, since_bone, parent_bone)) = stack.pop() {
            let accumulated = parent_accumulated * node.transform;
            let mut child_since_bone = since_bone * node.transform;
            let mut child_parent = parent_bone;

            if let Some(&index) = self.names.get(&node.name) {
                if attached[index] {
                    log::warn!(
                        "Bone '{}' appears more than once in the hierarchy; keeping the first occurrence",
                        node.name
                    );
                } else {
                    attached[index] = true;
                    let bone = &mut self.bones[index];
                    bone.parent = parent_bone;
                    bone.default_local_transform = child_since_bone;
                    bone.bind_global = accumulated;
                    child_parent = Some(index);
                    child_since_bone = Mat4::identity();
                }
            }

            for child in node.children.iter().rev() {
                stack.push((child, accumulated, child_since_bone, child_parent));
            }
        }

        for (bone, _) in self.bones.iter().zip(&attached).filter(|(_, a)| !**a) {
            log::warn!("Bone '{}' has no node in the hierarchy; treating it as a root", bone.name);
        }
    }

    fn finish(self) -> Skeleton {
        Skeleton::from_parts(self.bones, self.names)
    }
}
