//! Error types for mojoenv-core

use thiserror::Error;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("Failed to run '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Version manager '{program}' exited with status {code:?}: {stderr}")]
  VersionQuery {
    program: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("Version manager '{program}' produced no version string")]
  EmptyVersion { program: String },

  #[error("Platform error: {0}")]
  Platform(#[from] mojoenv_platform::PlatformError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}
