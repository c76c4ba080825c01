//! Error types for kinematic tree construction and queries.

use thiserror::Error;

/// Errors from building or querying a kinematic model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KinematicsError {
    /// The named link does not exist in the model.
    #[error("unknown link: {0}")]
    UnknownLink(String),

    /// A joint hangs off a link that is not reachable from the root.
    #[error("joint {0} is not connected to the root link")]
    DisconnectedJoint(String),

    /// The joint type cannot be expressed as single-axis motion.
    #[error("joint {0} has an unsupported type for forward kinematics")]
    UnsupportedJoint(String),

    /// Link transforms were queried before `update_transforms` in the
    /// current configuration cycle.
    #[error("link transforms are stale: call update_transforms first")]
    StaleTransforms,

    /// Forward kinematics produced a non-finite transform.
    #[error("non-finite transform for link {0}")]
    NonFiniteTransform(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
