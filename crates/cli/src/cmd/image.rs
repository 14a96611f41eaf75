//! Image command implementation.
//!
//! Layers the build configuration (defaults, process environment, `.env`
//! file, flags), assembles the container-build argument vector, and runs
//! the engine against the current directory as build context.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

use mojoenv_core::{BuildConfig, exit_code, load_env_file, render_command};
use mojoenv_platform::Arch;

use crate::output::{print_error, print_info, print_success};

#[allow(clippy::too_many_arguments)]
pub fn cmd_image(
  auth_key: Option<String>,
  use_podman: bool,
  mojo_version: Option<String>,
  no_cache: bool,
  pull: bool,
  env_file: &Path,
  dry_run: bool,
) -> Result<i32> {
  let mut config = BuildConfig::default();

  // Layering order: defaults, process environment, sourced env file, flags.
  config.overlay_process_env();
  let vars = load_env_file(env_file)
    .with_context(|| format!("Failed to read env file {}", env_file.display()))?;
  config.overlay_file(&vars);

  if let Some(key) = auth_key {
    config.auth_key = key;
  }
  if let Some(version) = mojo_version {
    config.mojo_version = version;
  }
  if use_podman {
    config.use_podman();
  }
  config.no_cache |= no_cache;
  config.pull |= pull;

  let (program, args) = config.command(Arch::current().as_str());
  debug!(program = %program, args = ?args, "assembled build command");

  if dry_run {
    println!("{}", render_command(&program, &args));
    return Ok(0);
  }

  print_info(&format!("Building {}", config.tag()));

  let status = Command::new(&program)
    .args(&args)
    .status()
    .with_context(|| format!("Failed to run '{}'", program))?;

  let code = exit_code(status);
  if code == 0 {
    print_success(&format!("Built {}", config.tag()));
  } else {
    print_error(&format!("{} exited with status {}", program, code));
  }

  Ok(code)
}
