//! Read-only environment diagnosis.
//!
//! `doctor` answers "what state is this machine and project in" without
//! provisioning anything, touching the network, or writing a byte. Safe to
//! run at any time, in any state.

use std::path::Path;

use serde::Serialize;

use carver_skill_core::config::SkillHomeConfig;
use carver_skill_core::credentials::{self, CredentialStatus};

use crate::runtime::{self, PythonVersion};
use crate::venv;

#[derive(Debug, Serialize)]
pub struct RuntimeInfo {
    pub path: String,
    pub version: PythonVersion,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialState {
    Configured,
    Missing,
    Unreadable,
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub working_dir: String,
    pub skill_home: String,
    /// First compatible interpreter on PATH, if any.
    pub runtime: Option<RuntimeInfo>,
    pub venv_present: bool,
    pub venv_python: String,
    /// Installed SDK version; only probed when the venv exists.
    pub sdk_version: Option<String>,
    pub credentials: CredentialState,
    pub base_url: Option<String>,
}

impl DoctorReport {
    /// Everything a successful `init` needs is already in place (connectivity
    /// aside, which doctor deliberately does not test).
    pub fn ready(&self) -> bool {
        self.runtime.is_some()
            && self.venv_present
            && self.sdk_version.is_some()
            && self.credentials == CredentialState::Configured
    }
}

/// Build the report. Read-only on every path.
pub fn diagnose(home: &SkillHomeConfig, working_dir: &Path) -> DoctorReport {
    let runtime = runtime::discover().map(|r| RuntimeInfo {
        path: r.exe.display().to_string(),
        version: r.version,
    });

    let venv_root = venv::venv_root(home);
    let venv_python = venv::venv_python(&venv_root);
    let venv_present = venv_python.exists();
    let sdk_version = if venv_present {
        venv::installed_sdk_version(&venv_python).map(|v| v.to_string())
    } else {
        None
    };

    let (credentials, base_url) = match credentials::resolve(working_dir) {
        Ok(CredentialStatus::Configured(c)) => (CredentialState::Configured, Some(c.base_url)),
        Ok(CredentialStatus::Missing) => (CredentialState::Missing, None),
        Err(_) => (CredentialState::Unreadable, None),
    };

    DoctorReport {
        working_dir: working_dir.display().to_string(),
        skill_home: home.root.display().to_string(),
        runtime,
        venv_present,
        venv_python: venv_python.display().to_string(),
        sdk_version,
        credentials,
        base_url,
    }
}
