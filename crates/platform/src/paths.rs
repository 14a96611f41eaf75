//! Per-user pyenv path layout

use std::env;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;
use crate::platform::Os;

/// Locate the pyenv installation root for a user.
///
/// Honors an explicit `PYENV_ROOT` override (the variable pyenv itself
/// respects), otherwise uses the conventional per-user home layout. The
/// directory is not required to exist; a missing installation degrades
/// later, at library-resolution time.
pub fn pyenv_root(user: &str) -> Result<PathBuf, PlatformError> {
    if let Ok(root) = env::var("PYENV_ROOT") {
        if !root.is_empty() {
            tracing::debug!(root = %root, "using PYENV_ROOT override");
            return Ok(PathBuf::from(root));
        }
    }

    match Os::current() {
        Os::Linux => Ok(PathBuf::from("/home").join(user).join(".pyenv")),
        Os::Darwin => Ok(PathBuf::from("/Users").join(user).join(".pyenv")),
        Os::Windows => {
            let home = dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)?;
            Ok(home.join(".pyenv"))
        }
    }
}

/// Directory holding one subdirectory per installed runtime version.
pub fn versions_dir(root: &Path) -> PathBuf {
    root.join("versions")
}
