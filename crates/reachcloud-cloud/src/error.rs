//! Error types for the pose-cloud pipeline.
//!
//! Sampling failures surface as
//! [`KinematicsError`](reachcloud_kinematics::KinematicsError) and sink
//! failures as [`std::io::Error`]; only configuration handling needs its
//! own taxonomy. Every error is fatal to the run; there is no partial
//! success anywhere in the pipeline.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("link_name must not be empty")]
    EmptyLinkName,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
