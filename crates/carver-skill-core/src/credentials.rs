//! Credential resolution from the caller's working directory.
//!
//! Credentials live in `<working-dir>/.env`: exactly there, no ancestor
//! search, no fallback path, so each project keeps its own key. This module
//! only ever reads the file; nothing in the bootstrapper writes to the
//! caller's directory.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::env_keys;
use crate::config::parse_env_file;

/// Default production endpoint, used when `CARVER_BASE_URL` is absent.
pub const DEFAULT_BASE_URL: &str = "https://api.carveragents.ai";

/// The onboarding placeholder some docs ship in example `.env` files.
/// Treated the same as an unset key.
const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

/// API key plus endpoint, as resolved from one working directory.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub api_key: String,
    pub base_url: String,
}

/// Result of credential resolution. `Missing` is the expected first-run
/// state, not an error.
#[derive(Debug)]
pub enum CredentialStatus {
    Configured(CredentialSet),
    Missing,
}

/// Path to the credentials file for a working directory.
pub fn credentials_path(working_dir: &Path) -> PathBuf {
    working_dir.join(".env")
}

/// Resolve credentials from `<working-dir>/.env`.
///
/// A missing file, a missing/empty `CARVER_API_KEY`, or the documentation
/// placeholder all resolve to `CredentialStatus::Missing`. Only an unreadable
/// file (exists but cannot be read) is an error.
pub fn resolve(working_dir: &Path) -> Result<CredentialStatus> {
    let path = credentials_path(working_dir);
    let Some(map) = parse_env_file(&path)? else {
        tracing::debug!(path = %path.display(), "No credentials file");
        return Ok(CredentialStatus::Missing);
    };

    let api_key = match map.get(env_keys::credentials::API_KEY) {
        Some(k) if !k.trim().is_empty() && k.trim() != API_KEY_PLACEHOLDER => {
            k.trim().to_string()
        }
        _ => return Ok(CredentialStatus::Missing),
    };

    let base_url = map
        .get(env_keys::credentials::BASE_URL)
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(CredentialStatus::Configured(CredentialSet {
        api_key,
        base_url,
    }))
}
