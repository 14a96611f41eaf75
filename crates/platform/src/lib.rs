//! Platform detection and system abstractions for mojoenv
//!
//! This crate provides cross-platform abstractions for:
//! - OS and architecture detection
//! - Per-user pyenv path layout
//! - Invoking-user resolution

mod error;
mod paths;
mod platform;
mod user;

pub use error::PlatformError;
pub use paths::{pyenv_root, versions_dir};
pub use platform::{Arch, Os, Platform, PlatformInfo, is_arm_family};
pub use user::invoking_user;
