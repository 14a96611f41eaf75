//! Invoking-user resolution

use std::env;

/// Determine the user the session belongs to.
///
/// Prefers the session login name (`LOGNAME`, what `logname(1)` reports),
/// falling back to the effective username. The two differ under `su` or
/// inside containers where no login session exists.
pub fn invoking_user() -> String {
    match env::var("LOGNAME") {
        Ok(name) if !name.is_empty() => name,
        _ => whoami::username(),
    }
}
