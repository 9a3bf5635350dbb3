//! Per-frame transform composition.
//!
//! `global(b) = global(parent(b)) * default_local(b) * manual_rotation(b)` and
//! `final(b) = global(b) * offset(b)`, with roots using only their own local
//! transform. [`update_all`] evaluates this in one memoized top-down pass;
//! [`global_transform_recursive`] is the direct recursive definition and
//! produces bit-identical results.

use crate::math::Mat4;

use super::bone::Bone;

/// Compute every bone's global and final transform.
///
/// `order` must list each bone after its parent (see
/// [`evaluation_order`]).
pub(crate) fn update_all(bones: &mut [Bone], order: &[usize]) {
    for &index in order {
        let parent_global = bones[index]
            .parent
            .map(|parent| bones[parent].global_transformation);

        let bone = &mut bones[index];
        let global = match parent_global {
            Some(parent_global) => parent_global * bone.posed_local(),
            None => bone.posed_local(),
        };
        bone.global_transformation = global;
        bone.final_transformation = global * bone.offset_matrix;
    }
}

/// Recompute a bone's global transform by walking its ancestor chain.
///
/// Recomputes shared ancestors on every call; use it as a reference, not
/// per frame. Returns `None` when `index` or an ancestor index is out of
/// range.
pub fn global_transform_recursive(bones: &[Bone], index: usize) -> Option<Mat4> {
    let bone = bones.get(index)?;
    Some(match bone.parent {
        Some(parent) => global_transform_recursive(bones, parent)? * bone.posed_local(),
        None => bone.posed_local(),
    })
}

/// Recompute a bone's final skinning matrix from scratch.
pub fn final_transform_recursive(bones: &[Bone], index: usize) -> Option<Mat4> {
    let offset = bones.get(index)?.offset_matrix;
    Some(global_transform_recursive(bones, index)? * offset)
}

/// Order bones so that every parent precedes its children.
///
/// Sorts by depth in the forest, keeping index order within a depth.
pub(crate) fn evaluation_order(bones: &[Bone]) -> Vec<usize> {
    let mut depths: Vec<Option<usize>> = vec![None; bones.len()];
    let mut chain = Vec::new();

    for start in 0..bones.len() {
        // Walk up until a bone with known depth (or a root) is found.
        let mut current = Some(start);
        let mut base = 0;
        while let Some(index) = current {
            if let Some(depth) = depths[index] {
                base = depth + 1;
                break;
            }
            chain.push(index);
            current = bones[index].parent;
        }
        for (offset, &index) in chain.iter().rev().enumerate() {
            depths[index] = Some(base + offset);
        }
        chain.clear();
    }

    let mut order: Vec<usize> = (0..bones.len()).collect();
    order.sort_by_key(|&index| depths[index].unwrap_or(0));
    order
}
