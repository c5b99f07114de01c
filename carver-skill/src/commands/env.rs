//! `carver-skill clean`: remove the provisioned environment.
//!
//! The venv is never torn down automatically; this is the manual lifecycle
//! escape hatch (broken env, reclaiming disk).

use std::fs;
use std::path::Path;

use anyhow::Result;

use carver_skill_bootstrap::venv;
use carver_skill_core::config::SkillHomeConfig;

pub fn cmd_clean(skill_home: Option<&str>, dry_run: bool, force: bool) -> Result<()> {
    let home = SkillHomeConfig::resolve(skill_home);
    let root = venv::venv_root(&home);

    if !root.exists() {
        eprintln!("No provisioned environment at {}", root.display());
        return Ok(());
    }

    let size = dir_size(&root);
    eprintln!(
        "Provisioned environment: {} ({})",
        root.display(),
        format_size(size)
    );

    if dry_run {
        eprintln!("(Dry run, nothing removed. Remove --dry-run to delete.)");
        return Ok(());
    }

    if !force {
        eprint!("Remove it? [y/N] ");
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    fs::remove_dir_all(&root)?;
    eprintln!("✓ Removed, freed {}", format_size(size));
    Ok(())
}

/// Compute total size of a directory recursively.
fn dir_size(path: &Path) -> u64 {
    let mut total: u64 = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                total += dir_size(&p);
            } else if let Ok(meta) = p.metadata() {
                total += meta.len();
            }
        }
    }
    total
}

/// Format byte size to human-readable string.
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_dir_size_counts_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), vec![0u8; 100]).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("b"), vec![0u8; 50]).unwrap();
        assert_eq!(dir_size(dir.path()), 150);
    }
}
