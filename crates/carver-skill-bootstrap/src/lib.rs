//! Environment bootstrap pipeline for the Carver feeds skill.
//!
//! [`initialize`] runs the linear sequence the CLI exposes as `init`:
//! runtime discovery, venv provisioning (under an exclusive lock), credential
//! resolution from the caller's working directory, and one authenticated
//! connectivity pre-flight. Each branch terminates the invocation with a
//! tagged result; there is no internal retry of the pipeline. After
//! supplying credentials the caller simply re-invokes.

use std::path::Path;

use carver_skill_core::config::SkillHomeConfig;
use carver_skill_core::credentials::{self, CredentialStatus};
use carver_skill_core::outcome::{BootstrapError, InitOutcome, ProvisionStage};

pub mod doctor;
pub mod lock;
pub mod probe;
pub mod process;
pub mod runtime;
pub mod venv;

/// Run one bootstrap attempt for `working_dir`.
///
/// The working directory must already exist; this component never creates it
/// and never writes into it. All filesystem side effects are confined to the
/// skill home.
pub fn initialize(
    working_dir: &Path,
    home: &SkillHomeConfig,
) -> Result<InitOutcome, BootstrapError> {
    if !working_dir.is_dir() {
        return Err(BootstrapError::WorkingDirMissing(working_dir.to_path_buf()));
    }

    // Discovery is read-only and runs before any write, so a host without a
    // compatible Python is left untouched.
    let runtime = runtime::discover().ok_or(BootstrapError::RuntimeNotFound)?;

    let env = {
        let _lock =
            lock::ProvisionLock::acquire(&home.root).map_err(|e| BootstrapError::Provision {
                stage: ProvisionStage::Lock,
                detail: format!("{:#}", e),
            })?;
        venv::ensure(home, &runtime)?
        // Lock released here, success or not.
    };

    let credentials = credentials::resolve(working_dir).map_err(|e| {
        BootstrapError::CredentialsUnreadable {
            path: credentials::credentials_path(working_dir),
            detail: format!("{:#}", e),
        }
    })?;

    let credential_set = match credentials {
        CredentialStatus::Missing => {
            // Expected first-run state, not an error.
            return Ok(InitOutcome::CredentialsRequired {
                working_dir: working_dir.to_path_buf(),
            });
        }
        CredentialStatus::Configured(c) => c,
    };

    probe::preflight(&credential_set)?;

    Ok(InitOutcome::Ready {
        venv_python: env.python,
        working_dir: working_dir.to_path_buf(),
    })
}
