//! Error types for description resolution and URDF parsing.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur during URDF processing.
#[derive(Debug, thiserror::Error)]
pub enum UrdfError {
    /// Failed to read the URDF file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse URDF XML content.
    #[error("URDF parse error: {0}")]
    Parse(String),

    /// A referenced link was not found in the model.
    #[error("missing link: {0}")]
    MissingLink(String),

    /// A referenced joint was not found in the model.
    #[error("missing joint: {0}")]
    MissingJoint(String),

    /// Invalid or unsupported joint type.
    #[error("unsupported joint type: {0}")]
    UnsupportedJointType(String),

    /// The URDF has no root link (no link that is never a child).
    #[error("no root link found")]
    NoRootLink,
}

/// Errors from resolving a description file to plain URDF XML.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// Failed to read the description file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The expander executable could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The expander ran but reported failure.
    #[error("`{program}` failed on {path} ({status}): {stderr}")]
    ExpansionFailed {
        program: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    /// The expander produced output that is not valid UTF-8.
    #[error("`{program}` produced non-UTF-8 output for {path}")]
    NonUtf8 { program: String, path: PathBuf },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
