//! Robot description resolution.
//!
//! Description files in the wild are often macro templates (xacro) that
//! must be expanded before they are valid URDF. [`DescriptionResolver`]
//! abstracts that step so the rest of the pipeline never depends on
//! process-spawning mechanics.

use std::path::Path;
use std::process::Command;

use crate::error::ResolutionError;

// ---------------------------------------------------------------------------
// DescriptionResolver
// ---------------------------------------------------------------------------

/// Produces plain URDF XML text from a description file.
pub trait DescriptionResolver {
    /// Resolve `path` to URDF XML.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the file cannot be read or the
    /// expansion step fails.
    fn resolve(&self, path: &Path) -> Result<String, ResolutionError>;
}

// ---------------------------------------------------------------------------
// PlainFileResolver
// ---------------------------------------------------------------------------

/// Reads the description file verbatim.
///
/// For descriptions that are already plain URDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFileResolver;

impl DescriptionResolver for PlainFileResolver {
    fn resolve(&self, path: &Path) -> Result<String, ResolutionError> {
        std::fs::read_to_string(path).map_err(|e| ResolutionError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// XacroResolver
// ---------------------------------------------------------------------------

/// Expands a macro-based description by running an external expander and
/// capturing its standard output.
#[derive(Debug, Clone)]
pub struct XacroResolver {
    program: String,
}

impl XacroResolver {
    /// Resolver invoking the standard `xacro` executable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "xacro".into(),
        }
    }

    /// Resolver invoking a different expander executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for XacroResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionResolver for XacroResolver {
    fn resolve(&self, path: &Path) -> Result<String, ResolutionError> {
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|e| ResolutionError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ResolutionError::ExpansionFailed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ResolutionError::NonUtf8 {
            program: self.program.clone(),
            path: path.to_path_buf(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
