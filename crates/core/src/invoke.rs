//! Toolchain invocation.
//!
//! Runs the target binary with the resolved library variable set,
//! forwarding arguments verbatim and propagating the child's exit code. No
//! arguments means the interactive REPL subcommand.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use tracing::{debug, info};

use crate::Result;
use crate::error::CoreError;
use crate::resolve::{PYTHON_LIBRARY_VAR, PythonLibrary};

/// Default toolchain binary, expected on `PATH`.
pub const DEFAULT_BINARY: &str = "mojo";

/// Subcommand used when no arguments are given.
pub const REPL_SUBCOMMAND: &str = "repl";

/// A single toolchain invocation: binary, arguments, resolved library, and
/// the working directory captured at startup.
#[derive(Debug)]
pub struct Invocation {
  pub binary: PathBuf,
  pub args: Vec<OsString>,
  pub library: PythonLibrary,
  pub cwd: PathBuf,
}

impl Invocation {
  /// Build an invocation from forwarded arguments and a resolved library.
  ///
  /// The binary defaults to [`DEFAULT_BINARY`], overridable through
  /// `MOJO_BIN` for relocated installs. The current working directory is
  /// captured here so the child runs where the user invoked us.
  pub fn new(args: Vec<OsString>, library: PythonLibrary) -> Result<Self> {
    let binary = env::var_os("MOJO_BIN")
      .filter(|value| !value.is_empty())
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY));

    Ok(Self {
      binary,
      args,
      library,
      cwd: env::current_dir()?,
    })
  }

  /// Argument vector actually passed to the binary.
  ///
  /// Empty input selects the REPL subcommand; anything else is forwarded
  /// unmodified and in order.
  pub fn argv(&self) -> Vec<OsString> {
    if self.args.is_empty() {
      vec![OsString::from(REPL_SUBCOMMAND)]
    } else {
      self.args.clone()
    }
  }

  /// Run the binary and return its exit code.
  ///
  /// Blocks until the child exits. A missing or non-executable binary
  /// surfaces as the spawn error; there is no retry.
  pub fn run(&self) -> Result<i32> {
    let argv = self.argv();

    let mut command = Command::new(&self.binary);
    command.args(&argv).current_dir(&self.cwd);

    if let Some(value) = self.library.env_value() {
      command.env(PYTHON_LIBRARY_VAR, value);
      debug!(var = PYTHON_LIBRARY_VAR, value = ?value, "library variable set");
    }

    info!(binary = %self.binary.display(), args = ?argv, "invoking toolchain");

    let status = command.status().map_err(|source| CoreError::Spawn {
      program: self.binary.display().to_string(),
      source,
    })?;

    Ok(exit_code(status))
  }
}

/// Map an exit status to a shell-convention exit code.
///
/// Signal-terminated children map to `128 + signal` on Unix.
pub fn exit_code(status: ExitStatus) -> i32 {
  if let Some(code) = status.code() {
    return code;
  }

  // Terminated by signal; only reachable on Unix.
  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
      return 128 + signal;
    }
  }

  1
}

#[cfg(test)]
mod tests {
  use super::*;

  fn invocation(args: &[&str]) -> Invocation {
    Invocation {
      binary: PathBuf::from("mojo"),
      args: args.iter().map(OsString::from).collect(),
      library: PythonLibrary::System,
      cwd: PathBuf::from("."),
    }
  }

  #[test]
  fn empty_args_select_repl() {
    assert_eq!(invocation(&[]).argv(), vec![OsString::from("repl")]);
  }

  #[test]
  fn args_forwarded_verbatim_in_order() {
    let argv = invocation(&["build", "hello.mojo", "-o", "hello"]).argv();
    assert_eq!(
      argv,
      vec![
        OsString::from("build"),
        OsString::from("hello.mojo"),
        OsString::from("-o"),
        OsString::from("hello"),
      ]
    );
  }

  #[test]
  fn single_arg_is_not_rewritten_to_repl() {
    assert_eq!(invocation(&["run.mojo"]).argv(), vec![OsString::from("run.mojo")]);
  }

  #[test]
  fn binary_override_via_env() {
    temp_env::with_var("MOJO_BIN", Some("/opt/mojo/bin/mojo"), || {
      let inv = Invocation::new(vec![], PythonLibrary::System).unwrap();
      assert_eq!(inv.binary, PathBuf::from("/opt/mojo/bin/mojo"));
    });
  }

  #[test]
  fn binary_defaults_to_mojo() {
    temp_env::with_var("MOJO_BIN", None::<&str>, || {
      let inv = Invocation::new(vec![], PythonLibrary::System).unwrap();
      assert_eq!(inv.binary, PathBuf::from(DEFAULT_BINARY));
    });
  }

  #[test]
  #[cfg(unix)]
  fn exit_code_propagated_from_child() {
    let inv = Invocation {
      binary: PathBuf::from("/bin/sh"),
      args: vec![OsString::from("-c"), OsString::from("exit 7")],
      library: PythonLibrary::Missing,
      cwd: std::env::current_dir().unwrap(),
    };

    assert_eq!(inv.run().unwrap(), 7);
  }

  #[test]
  #[cfg(unix)]
  fn missing_binary_is_a_spawn_error() {
    let inv = Invocation {
      binary: PathBuf::from("/nonexistent/mojo"),
      args: vec![],
      library: PythonLibrary::System,
      cwd: std::env::current_dir().unwrap(),
    };

    assert!(matches!(inv.run(), Err(CoreError::Spawn { .. })));
  }
}
