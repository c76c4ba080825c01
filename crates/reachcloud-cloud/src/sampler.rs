//! Reachability sampling: random configurations to link poses.

use rand::Rng;

use reachcloud_kinematics::{KinematicState, KinematicsError};

use crate::config::CloudConfig;
use crate::sample::PoseSample;

/// Draws random joint configurations and records the global pose of one
/// link per draw.
///
/// The sampler owns no randomness. Reproducible clouds come from seeding
/// the RNG handed to [`sample`](Self::sample); two runs with identically
/// seeded RNGs produce identical sequences.
#[derive(Debug, Clone)]
pub struct ReachabilitySampler {
    link_name: String,
    sample_count: usize,
}

impl ReachabilitySampler {
    /// Sampler for `sample_count` draws of `link_name`'s pose.
    pub fn new(link_name: impl Into<String>, sample_count: usize) -> Self {
        Self {
            link_name: link_name.into(),
            sample_count,
        }
    }

    /// Sampler configured from a [`CloudConfig`].
    #[must_use]
    pub fn from_config(config: &CloudConfig) -> Self {
        Self::new(config.link_name.clone(), config.sample_count)
    }

    /// The sampled link's name.
    #[must_use]
    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    /// Number of draws per run.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Produce exactly `sample_count` pose samples in draw order.
    ///
    /// Each iteration overwrites the model's joint configuration with a
    /// uniform random draw, recomputes all link transforms, and records
    /// the target link's global pose. The model's configuration is left
    /// at the final draw.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::UnknownLink`] if the target link is absent from
    /// the model, checked before the first draw so that a zero-count run
    /// still reports a bad link name. [`KinematicsError::NonFiniteTransform`]
    /// if forward kinematics diverges mid-run. On any error the partial
    /// sequence is discarded.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        state: &mut KinematicState,
        rng: &mut R,
    ) -> Result<Vec<PoseSample>, KinematicsError> {
        if !state.tree().contains_link(&self.link_name) {
            return Err(KinematicsError::UnknownLink(self.link_name.clone()));
        }

        let mut samples = Vec::with_capacity(self.sample_count);
        for _ in 0..self.sample_count {
            state.randomize_configuration(rng);
            state.update_transforms()?;
            let pose = state.global_link_transform(&self.link_name)?;
            samples.push(PoseSample::from_pose(pose));
        }
        Ok(samples)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
