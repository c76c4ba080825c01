//! Kinematic model provider for reachcloud.
//!
//! [`KinematicTree`] compiles a parsed [`RobotModel`](reachcloud_urdf::RobotModel)
//! into a flat, topologically ordered joint tree; [`KinematicState`] holds
//! a joint configuration plus cached global link transforms, with an
//! explicit fresh/stale marker so transforms cannot be read before they
//! are recomputed for the current configuration.

pub mod error;
pub mod state;
pub mod tree;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::KinematicsError;
pub use state::KinematicState;
pub use tree::{JointMotion, KinematicTree, TreeJoint};
