//! Reachability pose-cloud pipeline: sampler, pose records, and PCD
//! serialization.
//!
//! The pipeline is strictly sequential: a [`ReachabilitySampler`] draws N
//! random configurations against one mutable
//! [`KinematicState`](reachcloud_kinematics::KinematicState), producing an
//! ordered sequence of [`PoseSample`]s which [`pcd::write_ascii`]
//! serializes once into a caller-owned sink. There is no shared mutable
//! state beyond the sample sequence, produced once and consumed once.

pub mod config;
pub mod error;
pub mod pcd;
pub mod sample;
pub mod sampler;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use config::CloudConfig;
pub use error::ConfigError;
pub use pcd::write_ascii;
pub use sample::PoseSample;
pub use sampler::ReachabilitySampler;
