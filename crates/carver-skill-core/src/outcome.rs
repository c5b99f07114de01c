//! Bootstrap outcome and error taxonomy.
//!
//! Every failure in the pipeline resolves into one of exactly three shapes:
//! ready (exit 0), credentials-required (exit 2, expected on first run), or
//! a fatal [`BootstrapError`] (exit 1). Callers branch on the exit code and
//! the key-value stdout lines, never on free text.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a completed bootstrap with verified connectivity.
pub const EXIT_READY: i32 = 0;
/// Exit code for any fatal, human-remediation-required failure.
pub const EXIT_FATAL: i32 = 1;
/// Exit code signaling the caller to collect an API key and re-invoke.
pub const EXIT_CREDENTIALS_REQUIRED: i32 = 2;

/// Non-fatal result of one bootstrap attempt.
#[derive(Debug)]
pub enum InitOutcome {
    /// Environment provisioned and credentials verified against the service.
    Ready {
        venv_python: PathBuf,
        working_dir: PathBuf,
    },
    /// Environment is fine but no usable API key exists in the working
    /// directory. The caller prompts the user and re-invokes.
    CredentialsRequired { working_dir: PathBuf },
}

impl InitOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            InitOutcome::Ready { .. } => EXIT_READY,
            InitOutcome::CredentialsRequired { .. } => EXIT_CREDENTIALS_REQUIRED,
        }
    }
}

/// Which provisioning step failed. Carried in [`BootstrapError::Provision`]
/// so the message names the exact child process that broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStage {
    Lock,
    VenvCreate,
    PipUpgrade,
    SdkInstall,
    SdkProbe,
}

impl std::fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProvisionStage::Lock => "provisioning lock acquisition",
            ProvisionStage::VenvCreate => "virtual environment creation",
            ProvisionStage::PipUpgrade => "pip upgrade",
            ProvisionStage::SdkInstall => "carver-feeds-sdk install",
            ProvisionStage::SdkProbe => "installed SDK check",
        };
        f.write_str(s)
    }
}

/// Fatal bootstrap failures. All map to exit code 1.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Working directory does not exist: {}", .0.display())]
    WorkingDirMissing(PathBuf),

    #[error("No compatible Python interpreter found (need 3.12, 3.11, or 3.10)")]
    RuntimeNotFound,

    #[error("{stage} failed: {detail}")]
    Provision {
        stage: ProvisionStage,
        detail: String,
    },

    #[error("Credentials file {} could not be read: {detail}", path.display())]
    CredentialsUnreadable { path: PathBuf, detail: String },

    #[error(
        "API key was rejected by the Carver feeds service (HTTP {status}). \
         The key in .env is present but not valid. Check it at https://app.carveragents.ai"
    )]
    AuthRejected { status: u16 },

    #[error("Could not reach the Carver feeds service: {detail}")]
    Transport { detail: String },
}

impl BootstrapError {
    /// Extra remediation text printed after the error message, where a
    /// concrete next step exists.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            BootstrapError::RuntimeNotFound => Some(
                "The carver-feeds-sdk requires Python 3.10, 3.11, or 3.12.\n\
                 Install one of them first:\n\
                 - macOS:   brew install python@3.12\n\
                 - Ubuntu:  sudo apt install python3.12\n\
                 - Windows: download from python.org",
            ),
            BootstrapError::Transport { .. } => {
                Some("Check your network connection and CARVER_BASE_URL, then re-run.")
            }
            _ => None,
        }
    }
}
