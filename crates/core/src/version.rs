//! Version-manager queries.
//!
//! The version manager is an external CLI (pyenv by convention) exposing
//! `current <runtime>`, printing the selected runtime version on stdout.

use std::process::Command;

use tracing::debug;

use crate::Result;
use crate::error::CoreError;

/// Default version-manager binary.
pub const DEFAULT_MANAGER: &str = "pyenv";

/// Default runtime to query the manager for.
pub const DEFAULT_RUNTIME: &str = "python";

/// Handle to the external version manager.
#[derive(Debug, Clone)]
pub struct VersionManager {
  program: String,
  runtime: String,
}

impl Default for VersionManager {
  fn default() -> Self {
    Self::new(DEFAULT_MANAGER, DEFAULT_RUNTIME)
  }
}

impl VersionManager {
  pub fn new(program: impl Into<String>, runtime: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      runtime: runtime.into(),
    }
  }

  /// Query the currently selected runtime version.
  ///
  /// Runs `<program> current <runtime>` and returns the first line of
  /// stdout, trimmed. A missing manager binary or a nonzero exit is fatal;
  /// there is nothing sensible to fall back to.
  pub fn current(&self) -> Result<String> {
    debug!(program = %self.program, runtime = %self.runtime, "querying version manager");

    let output = Command::new(&self.program)
      .arg("current")
      .arg(&self.runtime)
      .output()
      .map_err(|source| CoreError::Spawn {
        program: self.program.clone(),
        source,
      })?;

    if !output.status.success() {
      return Err(CoreError::VersionQuery {
        program: self.program.clone(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.lines().next().unwrap_or("").trim().to_string();

    if version.is_empty() {
      return Err(CoreError::EmptyVersion {
        program: self.program.clone(),
      });
    }

    debug!(version = %version, "version manager reported");
    Ok(version)
  }
}
