//! Env command implementation.
//!
//! Reports the resolved environment (user, platform, Python version, and
//! library path) without invoking anything.

use anyhow::{Context, Result};

use mojoenv_core::{PYTHON_LIBRARY_VAR, PythonLibrary, VersionManager, resolve_environment};
use mojoenv_platform::PlatformInfo;

use crate::output::{print_info, print_json, print_stat, print_warning};

pub fn cmd_env(json: bool) -> Result<()> {
  let info = PlatformInfo::current();
  let manager = VersionManager::default();
  let resolution = resolve_environment(&manager).context("Failed to resolve Python environment")?;

  if json {
    let env_value = resolution
      .library
      .env_value()
      .map(|v| v.to_string_lossy().into_owned());
    print_json(&serde_json::json!({
      "platform": info,
      "python_version": resolution.version,
      "library": resolution.library,
      "env": { PYTHON_LIBRARY_VAR: env_value },
    }))?;
    return Ok(());
  }

  print_stat("User", &info.username);
  print_stat("Platform", &info.platform.to_string());
  print_stat("Python", &resolution.version);

  match &resolution.library {
    PythonLibrary::System => {
      print_info(&format!("System Python selected; {} left unset", PYTHON_LIBRARY_VAR));
    }
    PythonLibrary::Found(path) => {
      print_stat("Library", &path.display().to_string());
    }
    PythonLibrary::Missing => {
      print_warning(&format!(
        "No libpython found; {} will be empty",
        PYTHON_LIBRARY_VAR
      ));
    }
  }

  Ok(())
}
