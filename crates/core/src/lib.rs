//! mojoenv-core: Core logic for mojoenv
//!
//! This crate provides the resolver, invoker, and image-build assembly for
//! mojoenv: querying the version manager, locating the Python shared
//! library, running the toolchain binary, and building container-build
//! argument vectors.

mod envfile;
mod error;
mod image;
mod invoke;
mod resolve;
mod version;

pub use envfile::{load_env_file, parse_env_file};
pub use error::CoreError;
pub use image::{BuildConfig, CROSS_PLATFORM, render_command};
pub use invoke::{DEFAULT_BINARY, Invocation, REPL_SUBCOMMAND, exit_code};
pub use resolve::{
  PYTHON_LIBRARY_VAR, PythonLibrary, Resolution, SYSTEM_VERSION, resolve_environment,
  resolve_python_library,
};
pub use version::{DEFAULT_MANAGER, DEFAULT_RUNTIME, VersionManager};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
