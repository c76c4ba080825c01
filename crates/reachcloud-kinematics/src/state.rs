//! Mutable kinematic state: joint positions plus cached link transforms.
//!
//! The randomize → update → query cycle is a two-state machine (stale /
//! fresh transforms). [`KinematicState`] tracks it explicitly:
//! [`global_link_transform`](KinematicState::global_link_transform) refuses
//! to answer from stale transforms instead of silently returning poses for
//! a previous configuration.

use nalgebra::Isometry3;
use rand::Rng;

use crate::error::KinematicsError;
use crate::tree::{KinematicTree, joint_transform};

/// A kinematic model instance: one configuration and its link transforms.
///
/// Single-writer: sampling mutates the configuration in place, so
/// parallel use requires independent instances.
#[derive(Debug, Clone)]
pub struct KinematicState {
    tree: KinematicTree,
    /// Positions of actuated joints, indexed by the tree's position index.
    positions: Vec<f64>,
    /// Global transform per link, valid only while `fresh`.
    transforms: Vec<Isometry3<f64>>,
    fresh: bool,
}

impl KinematicState {
    /// Create a state over `tree` with every joint at zero, clamped into
    /// its limits. Transforms start stale.
    #[must_use]
    pub fn new(tree: KinematicTree) -> Self {
        let positions = tree
            .joints()
            .iter()
            .filter(|j| j.position_index.is_some())
            .map(|j| 0.0_f64.clamp(j.lower_limit, j.upper_limit))
            .collect();
        let transforms = vec![Isometry3::identity(); tree.num_links()];
        Self {
            tree,
            positions,
            transforms,
            fresh: false,
        }
    }

    /// The compiled tree this state is defined over.
    #[must_use]
    pub fn tree(&self) -> &KinematicTree {
        &self.tree
    }

    /// Current joint positions in tree order.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Whether link transforms match the current configuration.
    #[must_use]
    pub fn transforms_fresh(&self) -> bool {
        self.fresh
    }

    /// Overwrite the configuration with a uniform random draw within each
    /// actuated joint's limits. Link transforms become stale.
    pub fn randomize_configuration<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for joint in self.tree.joints() {
            if let Some(idx) = joint.position_index {
                self.positions[idx] = rng.gen_range(joint.lower_limit..=joint.upper_limit);
            }
        }
        self.fresh = false;
    }

    /// Set the configuration explicitly, clamping into joint limits.
    /// Link transforms become stale.
    ///
    /// # Panics
    ///
    /// Panics if `q.len() != self.tree().dof()`.
    pub fn set_positions(&mut self, q: &[f64]) {
        assert_eq!(q.len(), self.tree.dof(), "q.len() must equal tree DOF");
        for joint in self.tree.joints() {
            if let Some(idx) = joint.position_index {
                self.positions[idx] = q[idx].clamp(joint.lower_limit, joint.upper_limit);
            }
        }
        self.fresh = false;
    }

    /// Recompute every global link transform from the current
    /// configuration, root-down.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::NonFiniteTransform`] if any link transform picks
    /// up a NaN or infinity; transforms stay stale in that case.
    pub fn update_transforms(&mut self) -> Result<(), KinematicsError> {
        let Self {
            tree,
            positions,
            transforms,
            fresh,
        } = self;

        transforms[0] = Isometry3::identity();
        for joint in tree.joints() {
            let q = joint.position_index.map_or(0.0, |idx| positions[idx]);
            let local = joint.origin * joint_transform(&joint.axis, joint.motion, q);
            transforms[joint.child_link] = transforms[joint.parent_link] * local;
        }

        for (idx, transform) in transforms.iter().enumerate() {
            if !isometry_is_finite(transform) {
                *fresh = false;
                return Err(KinematicsError::NonFiniteTransform(
                    tree.link_names()[idx].clone(),
                ));
            }
        }

        *fresh = true;
        Ok(())
    }

    /// Global transform of `link` in the base frame.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::UnknownLink`] if `link` is not in the tree;
    /// [`KinematicsError::StaleTransforms`] if the configuration changed
    /// since the last [`update_transforms`](Self::update_transforms).
    pub fn global_link_transform(&self, link: &str) -> Result<&Isometry3<f64>, KinematicsError> {
        let idx = self
            .tree
            .link_index(link)
            .ok_or_else(|| KinematicsError::UnknownLink(link.to_string()))?;
        if !self.fresh {
            return Err(KinematicsError::StaleTransforms);
        }
        Ok(&self.transforms[idx])
    }
}

fn isometry_is_finite(t: &Isometry3<f64>) -> bool {
    t.translation.vector.iter().all(|v| v.is_finite())
        && t.rotation.coords.iter().all(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
