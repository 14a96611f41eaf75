//! Container-image build configuration and argument assembly.
//!
//! A [`BuildConfig`] is a named-field record layered write-once from
//! hardcoded defaults, process environment, an optional `.env` file, and
//! CLI flags, then rendered into the engine's argument vector exactly
//! once.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use mojoenv_platform::is_arm_family;

/// Placeholder auth key; real keys come from `.env`, the environment, or
/// `--auth-key`.
pub const DEFAULT_AUTH_KEY: &str = "DEFAULT_AUTH_KEY";

/// Default image version tag.
pub const DEFAULT_MOJO_VERSION: &str = "0.7.0";

/// Default container engine.
pub const DEFAULT_ENGINE: &str = "docker";

/// Default Dockerfile used for the SDK image.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile.mojosdk";

/// Default image organization.
pub const DEFAULT_ORG: &str = "modular";

/// Platform forced on ARM hosts, since the SDK image is x86-only.
pub const CROSS_PLATFORM: &str = "linux/amd64";

/// Capability added when debugging under podman.
const PTRACE_CAP: [&str; 2] = ["--cap-add", "SYS_PTRACE"];

/// Container-build configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  pub auth_key: String,
  pub mojo_version: String,
  pub engine: String,
  pub dockerfile: String,
  pub org: String,
  pub buildkit: bool,
  pub extra_caps: Vec<String>,
  pub no_cache: bool,
  pub pull: bool,
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      auth_key: DEFAULT_AUTH_KEY.to_string(),
      mojo_version: DEFAULT_MOJO_VERSION.to_string(),
      engine: DEFAULT_ENGINE.to_string(),
      dockerfile: DEFAULT_DOCKERFILE.to_string(),
      org: DEFAULT_ORG.to_string(),
      buildkit: true,
      extra_caps: Vec::new(),
      no_cache: false,
      pull: false,
    }
  }
}

impl BuildConfig {
  /// Overlay values from the process environment.
  ///
  /// Recognized variables: `AUTH_KEY`, `BUILDKIT`, `CE`, `DOCKERFILE`,
  /// `EXTRA_CAP`, `MOJO_VER`, `ORG`. Empty values are treated as unset.
  pub fn overlay_process_env(&mut self) {
    for key in ["AUTH_KEY", "BUILDKIT", "CE", "DOCKERFILE", "EXTRA_CAP", "MOJO_VER", "ORG"] {
      if let Ok(value) = std::env::var(key) {
        self.apply(key, &value);
      }
    }
  }

  /// Overlay values from a sourced `.env` file.
  ///
  /// Unrecognized keys are ignored; the file has no schema.
  pub fn overlay_file(&mut self, vars: &BTreeMap<String, String>) {
    for (key, value) in vars {
      self.apply(key, value);
    }
  }

  fn apply(&mut self, key: &str, value: &str) {
    if value.is_empty() {
      return;
    }

    match key {
      "AUTH_KEY" => self.auth_key = value.to_string(),
      "MOJO_VER" => self.mojo_version = value.to_string(),
      "CE" => self.engine = value.to_string(),
      "DOCKERFILE" => self.dockerfile = value.to_string(),
      "ORG" => self.org = value.to_string(),
      "BUILDKIT" => self.buildkit = !matches!(value, "0" | "false"),
      "EXTRA_CAP" => {
        self.extra_caps = value.split_whitespace().map(str::to_string).collect();
      }
      _ => debug!(key = %key, "ignoring unrecognized configuration key"),
    }
  }

  /// Switch to podman and add the ptrace capability for debugging.
  pub fn use_podman(&mut self) {
    self.engine = "podman".to_string();
    self
      .extra_caps
      .extend(PTRACE_CAP.iter().map(|s| s.to_string()));
  }

  /// Image tag, e.g. `modular/mojo:0.7.0`.
  pub fn tag(&self) -> String {
    format!("{}/mojo:{}", self.org, self.mojo_version)
  }

  /// Assemble the engine invocation for a host architecture string.
  ///
  /// Returns the engine program and its full argument vector, ending with
  /// the image tag and the `.` build context. ARM hosts get
  /// `--platform linux/amd64` since no native SDK image exists.
  pub fn command(&self, host_arch: &str) -> (String, Vec<String>) {
    let mut args: Vec<String> = if self.buildkit {
      vec!["buildx".to_string(), "build".to_string()]
    } else {
      vec!["build".to_string()]
    };

    args.push("--file".to_string());
    args.push(self.dockerfile.clone());
    args.push("--build-arg".to_string());
    args.push(format!("AUTH_KEY={}", self.auth_key));

    if is_arm_family(host_arch) {
      args.push("--platform".to_string());
      args.push(CROSS_PLATFORM.to_string());
    }

    if self.no_cache {
      args.push("--no-cache".to_string());
    }
    if self.pull {
      args.push("--pull".to_string());
    }

    args.extend(self.extra_caps.iter().cloned());

    if self.buildkit {
      args.push("--load".to_string());
    }

    args.push("-t".to_string());
    args.push(self.tag());
    args.push(".".to_string());

    (self.engine.clone(), args)
  }
}

/// Render a program and argument vector as a single shell-style line.
pub fn render_command(program: &str, args: &[String]) -> String {
  let mut line = String::from(program);
  for arg in args {
    line.push(' ');
    line.push_str(arg);
  }
  line
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_build_docker_buildx() {
    let config = BuildConfig::default();
    let (program, args) = config.command("x86_64");

    assert_eq!(program, "docker");
    assert_eq!(args[0], "buildx");
    assert_eq!(args[1], "build");
    assert!(args.contains(&"--load".to_string()));
    assert!(!args.contains(&"--platform".to_string()));
    assert!(!args.contains(&"--no-cache".to_string()));
    assert!(!args.contains(&"--pull".to_string()));
  }

  #[test]
  fn context_is_last_and_tag_precedes_it() {
    let config = BuildConfig::default();
    let (_, args) = config.command("x86_64");

    let len = args.len();
    assert_eq!(args[len - 1], ".");
    assert_eq!(args[len - 2], "modular/mojo:0.7.0");
    assert_eq!(args[len - 3], "-t");
  }

  #[test]
  fn use_podman_switches_engine_and_adds_capability() {
    let mut config = BuildConfig::default();
    config.use_podman();

    let (program, args) = config.command("x86_64");
    assert_eq!(program, "podman");
    let pos = args.iter().position(|a| a == "--cap-add").unwrap();
    assert_eq!(args[pos + 1], "SYS_PTRACE");
  }

  #[test]
  fn default_engine_without_podman_flag() {
    let config = BuildConfig::default();
    let (program, _) = config.command("x86_64");
    assert_eq!(program, "docker");
  }

  #[test]
  fn arm_hosts_get_cross_platform_flag() {
    let config = BuildConfig::default();

    for arch in ["aarch64", "arm64"] {
      let (_, args) = config.command(arch);
      let pos = args.iter().position(|a| a == "--platform").unwrap();
      assert_eq!(args[pos + 1], CROSS_PLATFORM);
    }

    for arch in ["x86_64", "riscv64", ""] {
      let (_, args) = config.command(arch);
      assert!(!args.contains(&"--platform".to_string()), "arch {:?}", arch);
    }
  }

  #[test]
  fn buildkit_off_uses_plain_build() {
    let config = BuildConfig {
      buildkit: false,
      ..BuildConfig::default()
    };

    let (_, args) = config.command("x86_64");
    assert_eq!(args[0], "build");
    assert!(!args.contains(&"--load".to_string()));
  }

  #[test]
  fn cache_flags_appended_when_set() {
    let config = BuildConfig {
      no_cache: true,
      pull: true,
      ..BuildConfig::default()
    };

    let (_, args) = config.command("x86_64");
    assert!(args.contains(&"--no-cache".to_string()));
    assert!(args.contains(&"--pull".to_string()));
  }

  #[test]
  fn file_overlay_overrides_defaults_and_ignores_unknown_keys() {
    let mut config = BuildConfig::default();
    let mut vars = BTreeMap::new();
    vars.insert("AUTH_KEY".to_string(), "secret-key".to_string());
    vars.insert("ORG".to_string(), "acme".to_string());
    vars.insert("UNRELATED".to_string(), "ignored".to_string());
    vars.insert("BUILDKIT".to_string(), "0".to_string());

    config.overlay_file(&vars);

    assert_eq!(config.auth_key, "secret-key");
    assert_eq!(config.tag(), "acme/mojo:0.7.0");
    assert!(!config.buildkit);
  }

  #[test]
  fn empty_values_are_treated_as_unset() {
    let mut config = BuildConfig::default();
    let mut vars = BTreeMap::new();
    vars.insert("AUTH_KEY".to_string(), String::new());

    config.overlay_file(&vars);

    assert_eq!(config.auth_key, DEFAULT_AUTH_KEY);
  }

  #[test]
  fn extra_cap_splits_on_whitespace() {
    let mut config = BuildConfig::default();
    let mut vars = BTreeMap::new();
    vars.insert("EXTRA_CAP".to_string(), "--cap-add NET_ADMIN".to_string());

    config.overlay_file(&vars);

    assert_eq!(config.extra_caps, vec!["--cap-add", "NET_ADMIN"]);
  }

  #[test]
  fn process_env_overlay() {
    temp_env::with_vars(
      [("CE", Some("nerdctl")), ("MOJO_VER", Some("0.6.1"))],
      || {
        let mut config = BuildConfig::default();
        config.overlay_process_env();

        assert_eq!(config.engine, "nerdctl");
        assert_eq!(config.tag(), "modular/mojo:0.6.1");
      },
    );
  }

  /// The documented end-to-end scenario: `--mojo-version 0.7.0
  /// --use-podman` on an ARM host.
  #[test]
  fn podman_scenario_assembles_expected_command() {
    let mut config = BuildConfig::default();
    config.mojo_version = "0.7.0".to_string();
    config.use_podman();

    let (program, args) = config.command("arm64");

    assert_eq!(program, "podman");
    assert_eq!(&args[..2], ["buildx", "build"]);
    assert!(args.windows(2).any(|w| w == ["--cap-add", "SYS_PTRACE"]));
    assert!(args.windows(2).any(|w| w == ["--platform", CROSS_PLATFORM]));
    let len = args.len();
    assert_eq!(&args[len - 3..], ["-t", "modular/mojo:0.7.0", "."]);
  }

  #[test]
  fn render_command_joins_tokens() {
    let rendered = render_command("docker", &["build".to_string(), ".".to_string()]);
    assert_eq!(rendered, "docker build .");
  }
}
