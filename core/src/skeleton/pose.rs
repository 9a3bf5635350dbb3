//! Manual bone rotations.

use crate::math::{Mat4, UnitQuat, Vec3, mat4_from_quat, quat_from_axis_angle};

/// A rotation requested for a bone.
///
/// Both forms convert to the same matrix representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    /// Rotation of `angle` radians about `axis`. The axis need not be
    /// normalized; a zero axis means no rotation.
    AxisAngle { axis: Vec3, angle: f32 },
    /// Rotation given as a unit quaternion.
    Quaternion(UnitQuat),
}

impl Rotation {
    /// No rotation.
    pub fn identity() -> Self {
        Self::Quaternion(UnitQuat::identity())
    }

    /// Rotation about `axis` by `degrees`.
    pub fn from_degrees(axis: Vec3, degrees: f32) -> Self {
        Self::AxisAngle {
            axis,
            angle: degrees.to_radians(),
        }
    }

    /// The rotation as a unit quaternion.
    pub fn to_quat(&self) -> UnitQuat {
        match *self {
            Self::AxisAngle { axis, angle } => quat_from_axis_angle(axis, angle),
            Self::Quaternion(q) => q,
        }
    }

    /// The rotation as a 4x4 matrix.
    pub fn to_matrix(&self) -> Mat4 {
        mat4_from_quat(&self.to_quat())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<UnitQuat> for Rotation {
    fn from(q: UnitQuat) -> Self {
        Self::Quaternion(q)
    }
}

impl From<(Vec3, f32)> for Rotation {
    fn from((axis, angle): (Vec3, f32)) -> Self {
        Self::AxisAngle { axis, angle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_3;

    #[test]
    fn axis_angle_and_quaternion_agree() {
        let axis = Vec3::new(0.0, 1.0, 0.0);
        let a = Rotation::from((axis, FRAC_PI_3)).to_matrix();
        let b = Rotation::from(UnitQuat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_3)).to_matrix();
        assert_eq!(a, b);
    }

    #[test]
    fn unnormalized_axis_is_normalized() {
        let a = Rotation::from((Vec3::new(0.0, 0.0, 5.0), 0.5_f32)).to_matrix();
        let b = Rotation::from((Vec3::z(), 0.5_f32)).to_matrix();
        assert!((a - b).abs().max() < 1e-6);
    }

    #[test]
    fn degrees_are_converted() {
        let a = Rotation::from_degrees(Vec3::x(), 90.0).to_matrix();
        let b = Rotation::from((Vec3::x(), std::f32::consts::FRAC_PI_2)).to_matrix();
        assert!((a - b).abs().max() < 1e-6);
    }

    #[test]
    fn identity_is_identity_matrix() {
        assert_eq!(Rotation::identity().to_matrix(), Mat4::identity());
        assert_eq!(Rotation::default(), Rotation::identity());
    }
}
