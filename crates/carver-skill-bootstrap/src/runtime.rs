//! Compatible-Python discovery.
//!
//! The carver-feeds-sdk supports CPython 3.10–3.12 only, so discovery probes
//! a fixed candidate list (newest first) and never falls back to whatever
//! `python` happens to resolve to. The generic `python3` name is probed last
//! and accepted only when its reported version lands in the supported set.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Serialize;

use crate::process::run_with_timeout;

/// Minor versions of CPython 3 the SDK supports, in preference order.
pub const ACCEPTED_MINORS: &[u64] = &[12, 11, 10];

/// Executable names probed on PATH, newest-compatible first.
const CANDIDATES: &[&str] = &["python3.12", "python3.11", "python3.10", "python3"];

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// A parsed `Python X.Y.Z` version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PythonVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl std::fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PythonVersion {
    pub fn is_accepted(&self) -> bool {
        self.major == 3 && ACCEPTED_MINORS.contains(&self.minor)
    }
}

/// A discovered, version-verified interpreter. Never cached across runs.
#[derive(Debug, Clone)]
pub struct PythonRuntime {
    pub exe: PathBuf,
    pub version: PythonVersion,
}

/// Parse the output of `python --version` (e.g. `Python 3.12.4`).
fn parse_version_output(output: &str) -> Option<PythonVersion> {
    let rest = output.trim().strip_prefix("Python ")?;
    let mut parts = rest.split(['.', ' ', '+']);
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    // Patch may carry a suffix on pre-release builds; missing is fine.
    let patch = parts
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or_default();
    Some(PythonVersion {
        major,
        minor,
        patch,
    })
}

/// Run `<exe> --version` and parse the result.
fn probe_version(exe: &Path) -> Option<PythonVersion> {
    let mut cmd = Command::new(exe);
    cmd.arg("--version");
    let out = run_with_timeout(&mut cmd, VERSION_PROBE_TIMEOUT).ok()?;
    if !out.success() {
        return None;
    }
    // Python 2 printed the version to stderr; handle both for safety.
    parse_version_output(&out.stdout).or_else(|| parse_version_output(&out.stderr))
}

/// Find the first compatible interpreter on PATH, newest first.
///
/// Read-only: no filesystem side effects, so a no-runtime failure leaves the
/// host untouched.
pub fn discover() -> Option<PythonRuntime> {
    for name in CANDIDATES {
        let Ok(exe) = which::which(name) else {
            tracing::debug!(candidate = name, "Not on PATH");
            continue;
        };
        match probe_version(&exe) {
            Some(version) if version.is_accepted() => {
                tracing::info!(
                    exe = %exe.display(),
                    version = %version,
                    "Found compatible Python"
                );
                return Some(PythonRuntime { exe, version });
            }
            Some(version) => {
                tracing::debug!(
                    exe = %exe.display(),
                    version = %version,
                    "Python version not supported by carver-feeds-sdk"
                );
            }
            None => {
                tracing::debug!(exe = %exe.display(), "Could not determine version");
            }
        }
    }
    None
}
