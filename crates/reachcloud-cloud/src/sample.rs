//! Pose samples: the per-draw record serialized into the point cloud.

use nalgebra::{Isometry3, Vector3};

/// One reachability sample.
///
/// Position is the link's translation in the base frame; the normal is
/// the world-space direction of the link's local +Z axis, so the cloud
/// carries approach-direction information alongside raw reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    /// Link position in the base frame.
    pub position: Vector3<f64>,
    /// Unit direction of the link's local Z axis in the base frame.
    pub normal: Vector3<f64>,
}

impl PoseSample {
    /// Derive a sample from a rigid pose.
    ///
    /// The normal is the pose's rotation applied to `(0, 0, 1)`; it is
    /// unit-length whenever the rotation is orthonormal.
    #[must_use]
    pub fn from_pose(pose: &Isometry3<f64>) -> Self {
        Self {
            position: pose.translation.vector,
            normal: pose.rotation * Vector3::z(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, UnitQuaternion};

    #[test]
    fn identity_pose_sample() {
        let sample = PoseSample::from_pose(&Isometry3::identity());
        assert_relative_eq!(sample.position.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.normal.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.normal.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.normal.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn translation_carries_through() {
        let pose = Isometry3::from_parts(
            Translation3::new(1.0, -2.0, 3.5),
            UnitQuaternion::identity(),
        );
        let sample = PoseSample::from_pose(&pose);
        assert_relative_eq!(sample.position.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sample.position.y, -2.0, epsilon = 1e-12);
        assert_relative_eq!(sample.position.z, 3.5, epsilon = 1e-12);
    }

    #[test]
    fn normal_follows_rotation() {
        // Pitch 90 deg about Y maps local +Z to world +X.
        let pose = Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2),
        );
        let sample = PoseSample::from_pose(&pose);
        assert_relative_eq!(sample.normal.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(sample.normal.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn normal_is_unit_for_arbitrary_rotations() {
        let axis = nalgebra::Unit::new_normalize(Vector3::new(0.3, -0.7, 0.2));
        let pose = Isometry3::from_parts(
            Translation3::new(0.1, 0.2, 0.3),
            UnitQuaternion::from_axis_angle(&axis, 1.234),
        );
        let sample = PoseSample::from_pose(&pose);
        assert_relative_eq!(sample.normal.norm(), 1.0, epsilon = 1e-9);
    }
}
