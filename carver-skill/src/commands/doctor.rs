//! `carver-skill doctor`: read-only status report.

use std::path::PathBuf;

use anyhow::Result;

use carver_skill_bootstrap::doctor::{diagnose, CredentialState, DoctorReport};
use carver_skill_core::config::SkillHomeConfig;

pub fn cmd_doctor(cwd: Option<&str>, skill_home: Option<&str>, json: bool) -> Result<()> {
    let working_dir = match cwd {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };
    let home = SkillHomeConfig::resolve(skill_home);

    let report = diagnose(&home, &working_dir);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }
    Ok(())
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn print_human(report: &DoctorReport) {
    eprintln!("Carver feeds skill: environment status");
    eprintln!("  Skill home:  {}", report.skill_home);
    eprintln!("  Working dir: {}", report.working_dir);
    eprintln!();

    match &report.runtime {
        Some(rt) => eprintln!("  {} Python {} ({})", mark(true), rt.version, rt.path),
        None => eprintln!("  {} No compatible Python (need 3.12, 3.11, or 3.10)", mark(false)),
    }

    if report.venv_present {
        eprintln!("  {} venv present ({})", mark(true), report.venv_python);
        match &report.sdk_version {
            Some(v) => eprintln!("  {} carver-feeds-sdk {}", mark(true), v),
            None => eprintln!("  {} carver-feeds-sdk not installed", mark(false)),
        }
    } else {
        eprintln!("  {} venv not provisioned yet", mark(false));
    }

    match report.credentials {
        CredentialState::Configured => {
            eprintln!(
                "  {} CARVER_API_KEY configured (base: {})",
                mark(true),
                report.base_url.as_deref().unwrap_or("-")
            );
        }
        CredentialState::Missing => {
            eprintln!("  {} CARVER_API_KEY missing from {}/.env", mark(false), report.working_dir);
        }
        CredentialState::Unreadable => {
            eprintln!("  {} credentials file exists but could not be read", mark(false));
        }
    }

    eprintln!();
    if report.ready() {
        eprintln!("Ready. Run `carver-skill init` to verify connectivity.");
    } else {
        eprintln!("Not ready. Run `carver-skill init` to provision.");
    }
}
