//! Kinematic tree compiled from a URDF [`RobotModel`].
//!
//! A [`KinematicTree`] is a flat, topologically ordered view of the joint
//! tree. Every joint stores the static transform (origin) and axis needed
//! for forward kinematics plus the index of its parent link, so global
//! link transforms can be computed in a single root-down pass.

use std::collections::{HashMap, VecDeque};
use std::f64::consts::PI;

use nalgebra::{Isometry3, Matrix3, Translation3, UnitQuaternion, UnitVector3, Vector3};

use reachcloud_urdf::{JointData, JointType, Origin, RobotModel};

use crate::error::KinematicsError;

// ---------------------------------------------------------------------------
// JointMotion
// ---------------------------------------------------------------------------

/// How a joint moves its child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointMotion {
    /// Rotation about the joint axis.
    Revolute,
    /// Translation along the joint axis.
    Prismatic,
    /// No motion; the child is rigidly attached.
    Fixed,
}

// ---------------------------------------------------------------------------
// TreeJoint
// ---------------------------------------------------------------------------

/// A single joint in the compiled tree.
#[derive(Debug, Clone)]
pub struct TreeJoint {
    /// Name of this joint (from URDF).
    pub name: String,
    /// Static transform from the parent link frame to this joint frame.
    pub origin: Isometry3<f64>,
    /// Joint axis in the joint's local frame.
    pub axis: UnitVector3<f64>,
    /// Motion kind.
    pub motion: JointMotion,
    /// Lower position limit (rad or m).
    pub lower_limit: f64,
    /// Upper position limit (rad or m).
    pub upper_limit: f64,
    /// Index of the parent link in tree order.
    pub(crate) parent_link: usize,
    /// Index of the child link in tree order.
    pub(crate) child_link: usize,
    /// Index into the joint position vector; `None` for fixed joints.
    pub(crate) position_index: Option<usize>,
}

// ---------------------------------------------------------------------------
// KinematicTree
// ---------------------------------------------------------------------------

/// A topologically ordered kinematic tree.
///
/// Built from a [`RobotModel`] by breadth-first traversal from the root
/// link. Joints are ordered parents-before-children, so a single forward
/// pass computes every global link transform. Unlike a serial chain,
/// branches are kept: the tree answers pose queries for *any* link, not
/// just one end-effector.
#[derive(Debug, Clone)]
pub struct KinematicTree {
    /// Joints in topological order.
    joints: Vec<TreeJoint>,
    /// Link names in tree order; index 0 is the root link.
    link_names: Vec<String>,
    /// Link name -> tree-order index.
    link_index: HashMap<String, usize>,
    /// Number of actuated degrees of freedom.
    dof: usize,
}

impl KinematicTree {
    /// Compile a tree from a parsed robot model.
    ///
    /// Joints under one parent are visited in sorted name order so the
    /// tree (and therefore the joint position vector layout) does not
    /// depend on hash-map iteration order.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::DisconnectedJoint`] if any joint's parent link
    /// is not reachable from the root; [`KinematicsError::UnsupportedJoint`]
    /// for floating or planar joints.
    pub fn from_model(model: &RobotModel) -> Result<Self, KinematicsError> {
        let mut by_parent: HashMap<&str, Vec<&JointData>> = HashMap::new();
        for joint in model.joints.values() {
            by_parent.entry(joint.parent.as_str()).or_default().push(joint);
        }
        for children in by_parent.values_mut() {
            children.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let mut link_names = vec![model.root_link.clone()];
        let mut link_index = HashMap::from([(model.root_link.clone(), 0)]);
        let mut joints: Vec<TreeJoint> = Vec::new();
        let mut dof = 0;

        let mut frontier = VecDeque::from([0usize]);
        while let Some(parent_idx) = frontier.pop_front() {
            let parent_name = link_names[parent_idx].clone();
            let Some(children) = by_parent.remove(parent_name.as_str()) else {
                continue;
            };
            for joint in children {
                let motion = match joint.joint_type {
                    JointType::Revolute | JointType::Continuous => JointMotion::Revolute,
                    JointType::Prismatic => JointMotion::Prismatic,
                    JointType::Fixed => JointMotion::Fixed,
                    JointType::Floating | JointType::Planar => {
                        return Err(KinematicsError::UnsupportedJoint(joint.name.clone()));
                    }
                };

                let (lower, upper) = match motion {
                    JointMotion::Fixed => (0.0, 0.0),
                    _ => resolve_limits(joint),
                };

                let position_index = match motion {
                    JointMotion::Fixed => None,
                    _ => {
                        dof += 1;
                        Some(dof - 1)
                    }
                };

                let child_idx = link_names.len();
                link_index.insert(joint.child.clone(), child_idx);
                link_names.push(joint.child.clone());

                let axis = Vector3::new(joint.axis[0], joint.axis[1], joint.axis[2]);
                joints.push(TreeJoint {
                    name: joint.name.clone(),
                    origin: origin_to_isometry(&joint.origin),
                    axis: UnitVector3::new_normalize(axis),
                    motion,
                    lower_limit: lower,
                    upper_limit: upper,
                    parent_link: parent_idx,
                    child_link: child_idx,
                    position_index,
                });
                frontier.push_back(child_idx);
            }
        }

        // Anything left in the map hangs off a link we never reached.
        if let Some(orphan) = by_parent.values().flatten().next() {
            return Err(KinematicsError::DisconnectedJoint(orphan.name.clone()));
        }

        Ok(Self {
            joints,
            link_names,
            link_index,
            dof,
        })
    }

    /// Number of actuated degrees of freedom.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Number of links (root included).
    #[must_use]
    pub fn num_links(&self) -> usize {
        self.link_names.len()
    }

    /// Link names in tree order; index 0 is the root.
    #[must_use]
    pub fn link_names(&self) -> &[String] {
        &self.link_names
    }

    /// Whether `name` is a link of this tree.
    #[must_use]
    pub fn contains_link(&self, name: &str) -> bool {
        self.link_index.contains_key(name)
    }

    /// Tree-order index of a link, if present.
    #[must_use]
    pub fn link_index(&self, name: &str) -> Option<usize> {
        self.link_index.get(name).copied()
    }

    /// Access the joint definitions in tree order.
    #[must_use]
    pub fn joints(&self) -> &[TreeJoint] {
        &self.joints
    }

    /// Names of actuated joints in tree order (the joint position vector
    /// layout).
    #[must_use]
    pub fn actuated_joint_names(&self) -> Vec<&str> {
        self.joints
            .iter()
            .filter(|j| j.position_index.is_some())
            .map(|j| j.name.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Position limits for an actuated joint.
///
/// Continuous joints get one full turn; missing limits fall back to ±π,
/// matching how the parser's "both zero" convention is interpreted
/// elsewhere in the stack.
fn resolve_limits(joint: &JointData) -> (f64, f64) {
    match joint.joint_type {
        JointType::Continuous => (-PI, PI),
        _ => (
            joint.limits.lower.unwrap_or(-PI),
            joint.limits.upper.unwrap_or(PI),
        ),
    }
}

/// Convert a URDF [`Origin`] (xyz + rpy) to an [`Isometry3`].
pub(crate) fn origin_to_isometry(origin: &Origin) -> Isometry3<f64> {
    let translation = Translation3::new(origin.xyz[0], origin.xyz[1], origin.xyz[2]);
    let rotation = UnitQuaternion::from_matrix(&rotation_matrix_from_rpy(
        origin.rpy[0],
        origin.rpy[1],
        origin.rpy[2],
    ));
    Isometry3::from_parts(translation, rotation)
}

/// Build a rotation matrix from roll-pitch-yaw (intrinsic XYZ / extrinsic ZYX).
fn rotation_matrix_from_rpy(roll: f64, pitch: f64, yaw: f64) -> Matrix3<f64> {
    let (sr, cr) = roll.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();

    // Extrinsic ZYX = Intrinsic XYZ
    Matrix3::new(
        cy * cp,
        cy * sp * sr - sy * cr,
        cy * sp * cr + sy * sr,
        sy * cp,
        sy * sp * sr + cy * cr,
        sy * sp * cr - cy * sr,
        -sp,
        cp * sr,
        cp * cr,
    )
}

/// Compute the transform for a single joint at a given position.
pub(crate) fn joint_transform(
    axis: &UnitVector3<f64>,
    motion: JointMotion,
    position: f64,
) -> Isometry3<f64> {
    match motion {
        JointMotion::Prismatic => Isometry3::from_parts(
            Translation3::from(axis.into_inner() * position),
            UnitQuaternion::identity(),
        ),
        JointMotion::Revolute => Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(axis, position),
        ),
        JointMotion::Fixed => Isometry3::identity(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use reachcloud_urdf::parse_string;

    const TWO_LINK_ARM: &str = r#"
        <robot name="two_link_arm">
            <link name="base"/>
            <link name="upper_arm"/>
            <link name="forearm"/>
            <link name="end_effector"/>
            <joint name="shoulder" type="revolute">
                <parent link="base"/><child link="upper_arm"/>
                <origin xyz="0 0 0.05" rpy="0 0 0"/>
                <axis xyz="0 1 0"/>
                <limit lower="-2.617" upper="2.617" effort="50" velocity="3"/>
            </joint>
            <joint name="elbow" type="revolute">
                <parent link="upper_arm"/><child link="forearm"/>
                <origin xyz="0 0 0.3" rpy="0 0 0"/>
                <axis xyz="0 1 0"/>
                <limit lower="-2.094" upper="2.094" effort="30" velocity="5"/>
            </joint>
            <joint name="ee_fixed" type="fixed">
                <parent link="forearm"/><child link="end_effector"/>
                <origin xyz="0 0 0.25"/>
            </joint>
        </robot>
    "#;

    const BRANCHED: &str = r#"
        <robot name="branched">
            <link name="base"/>
            <link name="left"/>
            <link name="right"/>
            <joint name="left_lift" type="prismatic">
                <parent link="base"/><child link="left"/>
                <origin xyz="-0.2 0 0"/>
                <axis xyz="0 0 1"/>
                <limit lower="0" upper="0.5" effort="10" velocity="1"/>
            </joint>
            <joint name="right_yaw" type="continuous">
                <parent link="base"/><child link="right"/>
                <origin xyz="0.2 0 0"/>
                <axis xyz="0 0 1"/>
            </joint>
        </robot>
    "#;

    #[test]
    fn tree_from_two_link_arm() {
        let model = parse_string(TWO_LINK_ARM).unwrap();
        let tree = KinematicTree::from_model(&model).unwrap();
        assert_eq!(tree.dof(), 2);
        assert_eq!(tree.num_links(), 4);
        assert_eq!(tree.actuated_joint_names(), vec!["shoulder", "elbow"]);
        assert_eq!(tree.link_names()[0], "base");
    }

    #[test]
    fn tree_indexes_all_links() {
        let model = parse_string(TWO_LINK_ARM).unwrap();
        let tree = KinematicTree::from_model(&model).unwrap();
        assert!(tree.contains_link("base"));
        assert!(tree.contains_link("end_effector"));
        assert!(!tree.contains_link("gripper"));
        assert_eq!(tree.link_index("base"), Some(0));
    }

    #[test]
    fn tree_keeps_branches() {
        let model = parse_string(BRANCHED).unwrap();
        let tree = KinematicTree::from_model(&model).unwrap();
        assert_eq!(tree.dof(), 2);
        assert_eq!(tree.num_links(), 3);
        // Sorted-by-name order under one parent.
        assert_eq!(tree.actuated_joint_names(), vec!["left_lift", "right_yaw"]);
    }

    #[test]
    fn continuous_joint_gets_full_turn_limits() {
        let model = parse_string(BRANCHED).unwrap();
        let tree = KinematicTree::from_model(&model).unwrap();
        let yaw = tree.joints().iter().find(|j| j.name == "right_yaw").unwrap();
        assert_relative_eq!(yaw.lower_limit, -PI, epsilon = 1e-12);
        assert_relative_eq!(yaw.upper_limit, PI, epsilon = 1e-12);
    }

    #[test]
    fn prismatic_limits_kept() {
        let model = parse_string(BRANCHED).unwrap();
        let tree = KinematicTree::from_model(&model).unwrap();
        let lift = tree.joints().iter().find(|j| j.name == "left_lift").unwrap();
        assert_eq!(lift.motion, JointMotion::Prismatic);
        assert_relative_eq!(lift.lower_limit, 0.0, epsilon = 1e-12);
        assert_relative_eq!(lift.upper_limit, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn fixed_joint_has_no_position_index() {
        let model = parse_string(TWO_LINK_ARM).unwrap();
        let tree = KinematicTree::from_model(&model).unwrap();
        let fixed = tree.joints().iter().find(|j| j.name == "ee_fixed").unwrap();
        assert_eq!(fixed.motion, JointMotion::Fixed);
        assert!(fixed.position_index.is_none());
    }

    #[test]
    fn disconnected_joint_rejected() {
        let mut model = parse_string(
            r#"
            <robot name="broken">
                <link name="base"/>
                <link name="floating_base"/>
                <link name="floating_tip"/>
                <joint name="detached" type="revolute">
                    <parent link="floating_base"/><child link="floating_tip"/>
                    <axis xyz="0 0 1"/>
                    <limit lower="-1" upper="1" effort="1" velocity="1"/>
                </joint>
            </robot>
        "#,
        )
        .unwrap();
        // Both "base" and "floating_base" qualify as root to the parser;
        // pin "base" so the detached joint is unambiguously orphaned.
        model.root_link = "base".into();
        let err = KinematicTree::from_model(&model).unwrap_err();
        assert_eq!(err, KinematicsError::DisconnectedJoint("detached".into()));
    }

    #[test]
    fn origin_to_isometry_identity() {
        let iso = origin_to_isometry(&Origin::default());
        assert_relative_eq!(iso.translation.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(iso.translation.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(iso.translation.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(iso.rotation.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn origin_to_isometry_translation() {
        let origin = Origin {
            xyz: [1.0, 2.0, 3.0],
            rpy: [0.0, 0.0, 0.0],
        };
        let iso = origin_to_isometry(&origin);
        assert_relative_eq!(iso.translation.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(iso.translation.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(iso.translation.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn origin_to_isometry_yaw() {
        let origin = Origin {
            xyz: [0.0; 3],
            rpy: [0.0, 0.0, std::f64::consts::FRAC_PI_2],
        };
        let iso = origin_to_isometry(&origin);
        let rotated = iso.rotation * Vector3::x();
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn joint_transform_revolute() {
        let axis = UnitVector3::new_normalize(Vector3::z());
        let t = joint_transform(&axis, JointMotion::Revolute, std::f64::consts::FRAC_PI_2);
        let rotated = t.rotation * Vector3::x();
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(t.translation.vector.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn joint_transform_prismatic() {
        let axis = UnitVector3::new_normalize(Vector3::z());
        let t = joint_transform(&axis, JointMotion::Prismatic, 0.3);
        assert_relative_eq!(t.translation.z, 0.3, epsilon = 1e-12);
        assert_relative_eq!(t.rotation.angle(), 0.0, epsilon = 1e-12);
    }
}
