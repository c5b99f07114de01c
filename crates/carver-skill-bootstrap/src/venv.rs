//! Shared virtual environment provisioning.
//!
//! The venv lives at a fixed location under the skill home (default
//! `~/.carver-skill/.venv`), shared by every project that invokes the
//! bootstrapper, never inside the caller's working directory. Lifecycle is
//! lazy: created on first use, upgraded in place when the installed SDK falls
//! below the floor, never torn down automatically (`carver-skill clean` is
//! the manual path).

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use carver_skill_core::config::SkillHomeConfig;
use carver_skill_core::outcome::{BootstrapError, ProvisionStage};

use crate::process::run_with_timeout;
use crate::runtime::PythonRuntime;

/// PyPI distribution name of the SDK.
pub const SDK_PACKAGE: &str = "carver-feeds-sdk";

/// Import name of the installed distribution.
pub const SDK_MODULE: &str = "carver_feeds";

/// Oldest SDK release the skill documentation is written against. Anything
/// older is upgraded in place.
pub const MIN_SDK_VERSION: &str = "1.0.0";

const VENV_DIR_NAME: &str = ".venv";

const VENV_CREATE_TIMEOUT: Duration = Duration::from_secs(120);
const PIP_UPGRADE_TIMEOUT: Duration = Duration::from_secs(120);
const SDK_INSTALL_TIMEOUT: Duration = Duration::from_secs(600);
const SDK_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// A usable provisioned environment.
#[derive(Debug, Clone)]
pub struct SkillEnv {
    pub root: PathBuf,
    pub python: PathBuf,
}

/// Fixed venv location for a skill home. Identical for every working
/// directory; callers rely on this path being stable across invocations.
pub fn venv_root(home: &SkillHomeConfig) -> PathBuf {
    home.root.join(VENV_DIR_NAME)
}

/// Interpreter path inside a venv (`bin/` on unix, `Scripts/` on Windows).
pub fn venv_python(root: &Path) -> PathBuf {
    if cfg!(windows) {
        root.join("Scripts").join("python.exe")
    } else {
        root.join("bin").join("python")
    }
}

/// Query the installed SDK version through the venv interpreter.
///
/// The script imports the module before reading its metadata: a broken
/// install can leave dist-info behind with nothing importable, and such a
/// venv must not count as provisioned. Returns `None` when the package is
/// absent or the probe fails; the caller treats both as "needs install".
pub fn installed_sdk_version(python: &Path) -> Option<semver::Version> {
    let script = format!(
        "import {}; import importlib.metadata as m; print(m.version('{}'))",
        SDK_MODULE, SDK_PACKAGE
    );
    let mut cmd = Command::new(python);
    cmd.args(["-c", &script]);
    let out = run_with_timeout(&mut cmd, SDK_PROBE_TIMEOUT).ok()?;
    if !out.success() {
        return None;
    }
    parse_package_version(out.stdout.trim())
}

/// Lenient version parse: PyPI versions are PEP 440, not semver, so forms
/// like `1.2` or `1.2.3.post1` must still compare against the floor.
fn parse_package_version(raw: &str) -> Option<semver::Version> {
    let numeric: String = raw
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut parts = numeric.trim_end_matches('.').splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    Some(semver::Version::new(major, minor, patch))
}

fn min_sdk_version() -> semver::Version {
    // Compile-time constant; the parse cannot fail.
    semver::Version::parse(MIN_SDK_VERSION).unwrap_or_else(|_| semver::Version::new(0, 0, 0))
}

fn provision_err(stage: ProvisionStage, detail: impl Into<String>) -> BootstrapError {
    BootstrapError::Provision {
        stage,
        detail: detail.into(),
    }
}

/// Ensure the shared venv exists with an acceptable SDK installed.
///
/// Fast path: venv present and SDK at or above the floor returns with zero
/// mutating operations. A venv built by any still-compatible interpreter is
/// reused; discovery finding a newer minor does not trigger a rebuild.
pub fn ensure(home: &SkillHomeConfig, runtime: &PythonRuntime) -> Result<SkillEnv, BootstrapError> {
    let root = venv_root(home);
    let python = venv_python(&root);

    if python.exists() {
        match installed_sdk_version(&python) {
            Some(installed) if installed >= min_sdk_version() => {
                tracing::debug!(
                    venv = %root.display(),
                    sdk_version = %installed,
                    "Reusing provisioned environment"
                );
                return Ok(SkillEnv { root, python });
            }
            Some(installed) => {
                tracing::info!(
                    installed = %installed,
                    floor = MIN_SDK_VERSION,
                    "Installed SDK below floor, upgrading"
                );
            }
            None => {
                tracing::info!(venv = %root.display(), "SDK not installed in existing venv");
            }
        }
        install_sdk(&python)?;
        return Ok(SkillEnv { root, python });
    }

    create_venv(&root, runtime)?;
    upgrade_pip(&python);
    install_sdk(&python)?;
    Ok(SkillEnv { root, python })
}

fn create_venv(root: &Path, runtime: &PythonRuntime) -> Result<(), BootstrapError> {
    tracing::info!(
        venv = %root.display(),
        python = %runtime.exe.display(),
        version = %runtime.version,
        "Creating virtual environment"
    );
    if let Some(parent) = root.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| provision_err(ProvisionStage::VenvCreate, e.to_string()))?;
    }

    let mut cmd = Command::new(&runtime.exe);
    cmd.arg("-m").arg("venv").arg(root);
    let out = run_with_timeout(&mut cmd, VENV_CREATE_TIMEOUT)
        .map_err(|e| provision_err(ProvisionStage::VenvCreate, e.to_string()))?;
    if !out.success() {
        // A half-created venv would shadow the "does it exist" check on the
        // next run; remove it so re-invocation starts clean.
        let _ = std::fs::remove_dir_all(root);
        return Err(provision_err(ProvisionStage::VenvCreate, out.diagnostic()));
    }
    Ok(())
}

/// Best-effort pip upgrade. Old pips mis-resolve some wheels, but a failed
/// upgrade alone should not abort provisioning.
fn upgrade_pip(python: &Path) {
    let mut cmd = Command::new(python);
    cmd.args(["-m", "pip", "install", "--quiet", "--upgrade", "pip"]);
    match run_with_timeout(&mut cmd, PIP_UPGRADE_TIMEOUT) {
        Ok(out) if out.success() => tracing::debug!("pip upgraded"),
        Ok(out) => tracing::warn!(detail = %out.diagnostic(), "Could not upgrade pip"),
        Err(e) => tracing::warn!(error = %e, "Could not upgrade pip"),
    }
}

/// Install or upgrade the SDK. Single attempt: pip performs its own download
/// retries, and a resolution/network failure here is fatal, not retried.
fn install_sdk(python: &Path) -> Result<(), BootstrapError> {
    tracing::info!(package = SDK_PACKAGE, "Installing SDK");
    let mut cmd = Command::new(python);
    cmd.args(["-m", "pip", "install", "--upgrade", SDK_PACKAGE]);
    let out = run_with_timeout(&mut cmd, SDK_INSTALL_TIMEOUT)
        .map_err(|e| provision_err(ProvisionStage::SdkInstall, e.to_string()))?;
    if !out.success() {
        return Err(provision_err(ProvisionStage::SdkInstall, out.diagnostic()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home(path: &Path) -> SkillHomeConfig {
        SkillHomeConfig {
            root: path.to_path_buf(),
        }
    }

    #[test]
    fn test_venv_path_is_caller_independent() {
        // The venv location depends only on the skill home, never on any
        // working directory.
        let dir = tempfile::tempdir().unwrap();
        let h = home(dir.path());
        assert_eq!(venv_root(&h), dir.path().join(".venv"));
    }

    #[test]
    #[cfg(unix)]
    fn test_venv_python_layout() {
        let root = PathBuf::from("/opt/skill/.venv");
        assert_eq!(venv_python(&root), root.join("bin").join("python"));
    }

    #[test]
    fn test_parse_package_version() {
        assert_eq!(
            parse_package_version("1.2.3").unwrap(),
            semver::Version::new(1, 2, 3)
        );
        assert_eq!(
            parse_package_version("1.2").unwrap(),
            semver::Version::new(1, 2, 0)
        );
        assert_eq!(
            parse_package_version("1.0.0.post1").unwrap(),
            semver::Version::new(1, 0, 0)
        );
        assert_eq!(
            parse_package_version("2.1rc1").unwrap(),
            semver::Version::new(2, 1, 0)
        );
        assert!(parse_package_version("not-a-version").is_none());
    }

    #[test]
    fn test_floor_comparison() {
        let floor = min_sdk_version();
        assert!(parse_package_version("1.0.0").unwrap() >= floor);
        assert!(parse_package_version("1.4.2").unwrap() >= floor);
        assert!(parse_package_version("0.9.9").unwrap() < floor);
    }

    /// Put a shim interpreter at the venv python path. It appends its argv to
    /// `log` so tests can assert exactly which child commands ran.
    #[cfg(unix)]
    fn write_shim_python(root: &Path, log: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = format!("#!/bin/sh\necho \"$@\" >> {}\n{}\n", log.display(), body);
        let python = bin.join("python");
        std::fs::write(&python, script).unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    fn shim_runtime(exe: &Path) -> PythonRuntime {
        PythonRuntime {
            exe: exe.to_path_buf(),
            version: crate::runtime::PythonVersion {
                major: 3,
                minor: 12,
                patch: 0,
            },
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_ensure_reuses_valid_env_without_reinstall() {
        let dir = tempfile::tempdir().unwrap();
        let h = home(dir.path());
        let root = venv_root(&h);
        let log = dir.path().join("calls.log");
        write_shim_python(&root, &log, "echo 1.2.3");

        let env = ensure(&h, &shim_runtime(&venv_python(&root))).unwrap();
        assert_eq!(env.python, venv_python(&root));

        let calls = std::fs::read_to_string(&log).unwrap();
        // One version probe, nothing else: no venv recreation, no pip.
        assert_eq!(calls.lines().count(), 1);
        assert!(calls.contains("import carver_feeds;"));
        assert!(!calls.contains("pip"));
    }

    #[test]
    #[cfg(unix)]
    fn test_ensure_failed_probe_enters_install_branch() {
        let dir = tempfile::tempdir().unwrap();
        let h = home(dir.path());
        let root = venv_root(&h);
        let log = dir.path().join("calls.log");
        // Shim fails every command: the import probe, then the install.
        write_shim_python(&root, &log, "exit 1");

        let err = ensure(&h, &shim_runtime(&venv_python(&root))).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Provision {
                stage: ProvisionStage::SdkInstall,
                ..
            }
        ));

        let calls = std::fs::read_to_string(&log).unwrap();
        assert!(calls.contains("pip install"));
    }
}
