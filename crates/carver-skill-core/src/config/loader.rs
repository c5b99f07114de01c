//! `.env` parsing and process-env helpers.
//!
//! The `.env` parser returns a plain key/value map instead of mutating the
//! process environment: credentials must stay scoped to the working directory
//! that was passed in, never leak into this process's own env.

use std::collections::HashMap;
use std::env;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

/// Parse a dotenv-style file into a key/value map.
///
/// Returns `Ok(None)` when the file does not exist. Blank lines and `#`
/// comments are skipped; values may be single- or double-quoted, and an
/// unquoted trailing `# comment` is stripped.
pub fn parse_env_file(path: &Path) -> Result<Option<HashMap<String, String>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();

        // Strip inline comment (# not inside quotes)
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            map.insert(key.to_string(), value.to_string());
        }
    }
    Ok(Some(map))
}

/// Read a process environment variable, treating empty values as unset.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// Parse a boolean env var: everything except 0/false/no/off is true.
pub fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key).ok().as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}
