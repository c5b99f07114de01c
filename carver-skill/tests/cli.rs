//! CLI contract tests: exit codes and the machine-parseable stdout lines.
//!
//! Full provisioning is host-dependent (needs a compatible Python and
//! network), so these tests pin the paths that must behave identically on
//! every machine: argument validation, the read-only doctor report, and the
//! side-effect-free clean paths.

use assert_cmd::Command;

fn bin() -> Command {
    Command::cargo_bin("carver-skill").unwrap()
}

#[test]
fn init_rejects_missing_working_dir() {
    let home = tempfile::tempdir().unwrap();
    let output = bin()
        .args(["init", "/no/such/project/dir"])
        .env("CARVER_SKILL_HOME", home.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR"), "stdout was: {stdout}");
    assert!(stdout.contains("Working directory does not exist"));
    // Fatal before provisioning: nothing written under the skill home.
    assert!(std::fs::read_dir(home.path()).unwrap().next().is_none());
}

#[test]
fn doctor_json_reports_fresh_state() {
    let home = tempfile::tempdir().unwrap();
    let proj = tempfile::tempdir().unwrap();
    let output = bin()
        .args(["doctor", proj.path().to_str().unwrap(), "--json"])
        .env("CARVER_SKILL_HOME", home.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["venv_present"], false);
    assert_eq!(report["credentials"], "missing");
    assert_eq!(report["sdk_version"], serde_json::Value::Null);
    // Doctor is read-only.
    assert!(std::fs::read_dir(home.path()).unwrap().next().is_none());
    assert!(std::fs::read_dir(proj.path()).unwrap().next().is_none());
}

#[test]
fn doctor_json_sees_configured_credentials() {
    let home = tempfile::tempdir().unwrap();
    let proj = tempfile::tempdir().unwrap();
    std::fs::write(
        proj.path().join(".env"),
        "CARVER_API_KEY=cv-test-123\nCARVER_BASE_URL=https://staging.carveragents.ai\n",
    )
    .unwrap();

    let output = bin()
        .args(["doctor", proj.path().to_str().unwrap(), "--json"])
        .env("CARVER_SKILL_HOME", home.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["credentials"], "configured");
    assert_eq!(report["base_url"], "https://staging.carveragents.ai");
}

#[test]
fn clean_dry_run_is_side_effect_free() {
    let home = tempfile::tempdir().unwrap();
    // Fake a provisioned venv directory.
    let venv = home.path().join(".venv");
    std::fs::create_dir_all(venv.join("bin")).unwrap();
    std::fs::write(venv.join("bin").join("python"), b"").unwrap();

    let output = bin()
        .args(["clean", "--dry-run"])
        .env("CARVER_SKILL_HOME", home.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(venv.exists(), "dry run must not delete the venv");
}

#[test]
fn clean_force_removes_venv() {
    let home = tempfile::tempdir().unwrap();
    let venv = home.path().join(".venv");
    std::fs::create_dir_all(venv.join("bin")).unwrap();
    std::fs::write(venv.join("bin").join("python"), b"").unwrap();

    let output = bin()
        .args(["clean", "--force"])
        .env("CARVER_SKILL_HOME", home.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(!venv.exists());
}

#[test]
fn clean_without_venv_succeeds() {
    let home = tempfile::tempdir().unwrap();
    let output = bin()
        .args(["clean", "--force"])
        .env("CARVER_SKILL_HOME", home.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
}
