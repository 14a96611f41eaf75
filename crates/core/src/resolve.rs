//! Python shared-library resolution.
//!
//! The downstream toolchain needs `MOJO_PYTHON_LIBRARY` pointed at the
//! `libpython*` shared object matching the active pyenv version. Resolution
//! itself is a pure function over an explicit versions directory; the
//! ambient lookups (user, pyenv root, version query) live in
//! [`resolve_environment`].

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::version::VersionManager;
use mojoenv_platform::{invoking_user, pyenv_root, versions_dir};

/// Environment variable the toolchain reads for Python interop.
pub const PYTHON_LIBRARY_VAR: &str = "MOJO_PYTHON_LIBRARY";

/// Sentinel version meaning "use the ambient system Python".
pub const SYSTEM_VERSION: &str = "system";

/// Shared-library filename prefix to match.
const LIBRARY_PREFIX: &str = "libpython";

/// Outcome of shared-library resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "path")]
pub enum PythonLibrary {
  /// The system sentinel is active; run with the ambient environment only.
  System,
  /// Exact absolute path to the shared library.
  Found(PathBuf),
  /// No matching library; downstream gets an explicit empty value.
  Missing,
}

impl PythonLibrary {
  /// Value to bind to [`PYTHON_LIBRARY_VAR`], if any.
  ///
  /// `Missing` deliberately yields the empty string rather than an error:
  /// the toolchain fails on its own terms if it actually needs Python
  /// interop, and plenty of invocations never touch it.
  pub fn env_value(&self) -> Option<&OsStr> {
    match self {
      PythonLibrary::System => None,
      PythonLibrary::Found(path) => Some(path.as_os_str()),
      PythonLibrary::Missing => Some(OsStr::new("")),
    }
  }

  /// The resolved path, when one exists.
  pub fn path(&self) -> Option<&Path> {
    match self {
      PythonLibrary::Found(path) => Some(path),
      _ => None,
    }
  }
}

/// Locate the `libpython*` shared library for a runtime version.
///
/// Scans `<versions_dir>/<version>/lib` for plain files named
/// `libpython*`. When several match (a `.so` next to its versioned
/// sibling), the lexicographically smallest path wins; normally only one
/// version is installed so the tie-break rarely matters, but it keeps the
/// result independent of directory ordering.
pub fn resolve_python_library(version: &str, versions_dir: &Path) -> PythonLibrary {
  if version == SYSTEM_VERSION {
    debug!("system version selected, skipping library resolution");
    return PythonLibrary::System;
  }

  let lib_dir = versions_dir.join(version).join("lib");

  let entries = match fs::read_dir(&lib_dir) {
    Ok(entries) => entries,
    Err(err) => {
      debug!(dir = %lib_dir.display(), error = %err, "library directory unreadable");
      return PythonLibrary::Missing;
    }
  };

  let mut candidates: Vec<PathBuf> = entries
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| {
      path.is_file()
        && path
          .file_name()
          .and_then(OsStr::to_str)
          .is_some_and(|name| name.starts_with(LIBRARY_PREFIX))
    })
    .collect();

  candidates.sort();

  match candidates.into_iter().next() {
    Some(path) => {
      debug!(library = %path.display(), "resolved python library");
      PythonLibrary::Found(path)
    }
    None => {
      debug!(dir = %lib_dir.display(), "no libpython in library directory");
      PythonLibrary::Missing
    }
  }
}

/// A fully resolved environment: the active version and its library.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
  pub version: String,
  pub library: PythonLibrary,
}

/// Resolve the environment from ambient state.
///
/// Gathers the invoking user, the per-user pyenv root, and the version
/// manager's selection, then delegates to the pure
/// [`resolve_python_library`].
pub fn resolve_environment(manager: &VersionManager) -> Result<Resolution> {
  let user = invoking_user();
  let root = pyenv_root(&user)?;
  let version = manager.current()?;
  let library = resolve_python_library(&version, &versions_dir(&root));

  Ok(Resolution { version, library })
}
