use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{cmd_env, cmd_image, cmd_run};

/// mojoenv - Launcher and image-build frontend for the Mojo toolchain
#[derive(Parser)]
#[command(name = "mojoenv")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the mojo binary with the resolved Python library
  ///
  /// With no arguments, drops into the interactive REPL. Everything after
  /// `run` is forwarded to mojo unmodified.
  Run {
    /// Arguments forwarded verbatim to mojo
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
  },

  /// Show the resolved environment without running anything
  Env {
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
  },

  /// Build the Mojo SDK container image
  Image {
    /// Auth key passed to the build as AUTH_KEY
    #[arg(long, value_name = "KEY")]
    auth_key: Option<String>,

    /// Use podman instead of docker (adds --cap-add SYS_PTRACE)
    #[arg(long)]
    use_podman: bool,

    /// Mojo version tag for the image
    #[arg(long, value_name = "VER")]
    mojo_version: Option<String>,

    /// Build without the layer cache
    #[arg(long)]
    no_cache: bool,

    /// Always pull newer base images
    #[arg(long)]
    pull: bool,

    /// Defaults file sourced before flags apply
    #[arg(long, value_name = "PATH", default_value = ".env")]
    env_file: PathBuf,

    /// Print the assembled build command instead of running it
    #[arg(long)]
    dry_run: bool,
  },
}

fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  // Shell-script convention: usage errors exit 1, --help/--version exit 0.
  // Clap's default usage-error code is 2.
  let cli = Cli::try_parse().unwrap_or_else(|err| {
    let code = match err.kind() {
      ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
      _ => 1,
    };
    let _ = err.print();
    process::exit(code);
  });

  let code = match cli.command {
    Commands::Run { args } => cmd_run(args)?,
    Commands::Env { json } => {
      cmd_env(json)?;
      0
    }
    Commands::Image {
      auth_key,
      use_podman,
      mojo_version,
      no_cache,
      pull,
      env_file,
      dry_run,
    } => cmd_image(
      auth_key,
      use_podman,
      mojo_version,
      no_cache,
      pull,
      &env_file,
      dry_run,
    )?,
  };

  process::exit(code);
}
