//! Unified configuration layer.
//!
//! All environment variable reads are centralized here; business code goes
//! through structured config instead of calling `std::env::var` directly.
//!
//! - `env_keys`: key constants
//! - `loader`: `.env` file parsing and process-env helpers
//! - `schema`: `ObservabilityConfig`, `SkillHomeConfig`

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, parse_env_file};
pub use schema::{ObservabilityConfig, SkillHomeConfig};
