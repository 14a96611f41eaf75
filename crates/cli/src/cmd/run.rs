//! Run command implementation.
//!
//! Resolves the Python library for the active pyenv version and hands off
//! to the mojo binary, forwarding arguments and propagating its exit code.

use std::ffi::OsString;

use anyhow::{Context, Result};

use mojoenv_core::{Invocation, PythonLibrary, VersionManager, resolve_environment};

use crate::output::print_warning;

pub fn cmd_run(args: Vec<OsString>) -> Result<i32> {
  let manager = VersionManager::default();
  let resolution = resolve_environment(&manager).context("Failed to resolve Python environment")?;

  if resolution.library == PythonLibrary::Missing {
    // Not fatal: mojo fails on its own terms if it needs Python interop.
    print_warning(&format!(
      "No libpython found for Python {}; MOJO_PYTHON_LIBRARY will be empty",
      resolution.version
    ));
  }

  let invocation = Invocation::new(args, resolution.library)?;
  let code = invocation
    .run()
    .with_context(|| format!("Failed to run '{}'", invocation.binary.display()))?;

  Ok(code)
}
