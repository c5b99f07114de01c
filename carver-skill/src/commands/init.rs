//! `carver-skill init`: the bootstrap pipeline, mapped to the exit-code and
//! stdout contract callers depend on.
//!
//! stdout carries only the contract lines; progress and diagnostics go to
//! stderr via tracing.

use std::path::PathBuf;

use carver_skill_bootstrap::initialize;
use carver_skill_core::config::SkillHomeConfig;
use carver_skill_core::outcome::{
    BootstrapError, InitOutcome, EXIT_CREDENTIALS_REQUIRED, EXIT_FATAL, EXIT_READY,
};

pub fn cmd_init(cwd: Option<&str>, skill_home: Option<&str>) -> i32 {
    let working_dir = match resolve_working_dir(cwd) {
        Ok(dir) => dir,
        Err(err) => {
            println!("ERROR: {}", err);
            return EXIT_FATAL;
        }
    };
    let home = SkillHomeConfig::resolve(skill_home);
    tracing::debug!(
        working_dir = %working_dir.display(),
        skill_home = %home.root.display(),
        "Starting bootstrap"
    );

    match initialize(&working_dir, &home) {
        Ok(InitOutcome::Ready {
            venv_python,
            working_dir,
        }) => {
            println!("VENV_PYTHON={}", venv_python.display());
            println!("CWD={}", working_dir.display());
            EXIT_READY
        }
        Ok(InitOutcome::CredentialsRequired { working_dir }) => {
            print_key_guidance(&working_dir);
            println!("API_KEY_REQUIRED");
            println!("CWD={}", working_dir.display());
            EXIT_CREDENTIALS_REQUIRED
        }
        Err(err) => {
            println!("ERROR: {}", err);
            if let Some(remediation) = err.remediation() {
                println!("{}", remediation);
            }
            EXIT_FATAL
        }
    }
}

/// Resolve the working directory argument: default to the process CWD,
/// require it to exist, and canonicalize so the reported `CWD=` line is
/// absolute and stable.
fn resolve_working_dir(cwd: Option<&str>) -> Result<PathBuf, BootstrapError> {
    let raw = match cwd {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()
            .map_err(|_| BootstrapError::WorkingDirMissing(PathBuf::from(".")))?,
    };
    if !raw.is_dir() {
        return Err(BootstrapError::WorkingDirMissing(raw));
    }
    Ok(raw.canonicalize().unwrap_or(raw))
}

/// Tell the end user (via the calling assistant) how to get a key. Goes to
/// stderr so the stdout contract stays two lines.
fn print_key_guidance(working_dir: &std::path::Path) {
    eprintln!();
    eprintln!("The Carver feeds SDK requires an API key.");
    eprintln!("  1. Visit https://app.carveragents.ai and sign in");
    eprintln!("  2. Copy your API key");
    eprintln!(
        "  3. Put it in {}/.env as CARVER_API_KEY=<key>",
        working_dir.display()
    );
    eprintln!("Then re-run this command.");
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_missing_dir() {
        let err = resolve_working_dir(Some("/no/such/dir/here")).unwrap_err();
        assert!(matches!(err, BootstrapError::WorkingDirMissing(_)));
    }

    #[test]
    fn test_resolve_canonicalizes() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_working_dir(Some(dir.path().to_str().unwrap())).unwrap();
        assert!(resolved.is_absolute());
    }
}
