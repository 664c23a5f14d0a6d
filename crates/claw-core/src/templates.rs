//! Documents bundled into every container.
//!
//! Both templates are compiled into the binary. The README carries the format
//! version, substituted once on first use.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::Result;
use crate::layout;

const README_TEMPLATE: &str = include_str!("../templates/README.md");

/// Agent-facing instructions written as `SKILL.md`.
pub const SKILL: &str = include_str!("../templates/SKILL.md");

static README: LazyLock<String> =
    LazyLock::new(|| README_TEMPLATE.replace("{version}", layout::FORMAT_VERSION));

/// Human-facing overview written as `README.md`.
#[must_use]
pub fn readme() -> &'static str {
    &README
}

/// Writes `README.md` and `SKILL.md` into `root`, replacing existing files.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn write_to(root: &Path) -> Result<()> {
    fs::write(root.join(layout::README_FILE), readme())?;
    fs::write(root.join(layout::SKILL_FILE), SKILL)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_readme_has_version_substituted() {
        assert!(readme().contains(&format!("Specification v{}", layout::FORMAT_VERSION)));
        assert!(!readme().contains("{version}"));
    }

    #[test]
    fn test_skill_mentions_export() {
        assert!(SKILL.starts_with("# OpenClaw Context Archive Skill"));
        assert!(SKILL.contains("claw export"));
    }

    #[test]
    fn test_write_to_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "stale").unwrap();

        write_to(temp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            readme()
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("SKILL.md")).unwrap(),
            SKILL
        );
    }
}
