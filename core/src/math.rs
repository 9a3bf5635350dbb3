//! Math type aliases and helper functions.
//!
//! All rig math is f32 and column-vector: `a * b` applies `b` first.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Unit quaternion (f32).
pub type UnitQuat = nalgebra::UnitQuaternion<f32>;

/// Build a 4x4 matrix from a column-major `[[f32; 4]; 4]` array (glTF layout).
pub fn mat4_from_cols_array_2d(cols: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from(cols)
}

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Build a rotation matrix from a unit quaternion.
pub fn mat4_from_quat(q: &UnitQuat) -> Mat4 {
    q.to_homogeneous()
}

/// Build a rotation quaternion from an axis and an angle in radians.
///
/// A zero-length axis yields the identity rotation.
pub fn quat_from_axis_angle(axis: Vec3, angle: f32) -> UnitQuat {
    match nalgebra::Unit::try_new(axis, f32::EPSILON) {
        Some(axis) => UnitQuat::from_axis_angle(&axis, angle),
        None => UnitQuat::identity(),
    }
}

/// Apply an affine transform to a point.
///
/// Multiplies the homogeneous vector `(p, 1)` without a perspective divide, so
/// the result is exactly the top three rows of `m * (p, 1)`.
#[inline]
pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    let h = m * Vec4::new(p.x, p.y, p.z, 1.0);
    Vec3::new(h.x, h.y, h.z)
}
