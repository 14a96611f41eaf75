//! Optional `.env` defaults file.
//!
//! The file is plain shell-assignment text, one `KEY=value` per line, with
//! `#` comments and an optional `export ` prefix. There is no schema;
//! lines that are not assignments are skipped rather than rejected, and a
//! missing file is simply empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Result;

/// Parse shell-assignment text into a key/value map.
///
/// Later assignments win, matching how sourcing the file would behave.
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
  let mut vars = BTreeMap::new();

  for line in content.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let line = line.strip_prefix("export ").unwrap_or(line);

    let Some((key, value)) = line.split_once('=') else {
      continue;
    };

    let key = key.trim();
    if !is_identifier(key) {
      continue;
    }

    vars.insert(key.to_string(), unquote(value.trim()).to_string());
  }

  vars
}

/// Shell identifier rule: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(key: &str) -> bool {
  let mut chars = key.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
  let bytes = value.as_bytes();
  if bytes.len() >= 2 {
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if first == last && (first == b'"' || first == b'\'') {
      return &value[1..value.len() - 1];
    }
  }
  value
}

/// Load the defaults file if present; a missing file yields no overrides.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
  if !path.exists() {
    debug!(path = %path.display(), "no env file, using defaults");
    return Ok(BTreeMap::new());
  }

  let content = fs::read_to_string(path)?;
  let vars = parse_env_file(&content);
  debug!(path = %path.display(), count = vars.len(), "loaded env file");
  Ok(vars)
}
