//! Environment variable and credentials-file key constants.

/// Root directory for skill infrastructure (venv, lock file).
/// Defaults to `~/.carver-skill` when unset.
pub const CARVER_SKILL_HOME: &str = "CARVER_SKILL_HOME";

/// Credentials-file keys, read from `<working-dir>/.env`.
pub mod credentials {
    /// Required: opaque bearer token for the Carver feeds API.
    pub const API_KEY: &str = "CARVER_API_KEY";

    /// Optional: base-URL override for the feeds API.
    pub const BASE_URL: &str = "CARVER_BASE_URL";
}

/// Observability and logging.
pub mod observability {
    pub const CARVER_SKILL_QUIET: &str = "CARVER_SKILL_QUIET";
    pub const CARVER_SKILL_LOG_LEVEL: &str = "CARVER_SKILL_LOG_LEVEL";
    pub const CARVER_SKILL_LOG_JSON: &str = "CARVER_SKILL_LOG_JSON";
}
