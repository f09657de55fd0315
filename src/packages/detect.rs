//! Package manager detection.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::PackageManager;
use crate::error::Result;

/// Lockfiles and the manager that writes them, in priority order.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

/// Just the field we need from `package.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    package_manager: Option<String>,
}

/// Picks the package manager for a project.
pub struct PackageManagerDetector;

impl PackageManagerDetector {
    /// Detect the package manager for `project_root`.
    ///
    /// Precedence:
    /// 1. `requested` (from `--package-manager` or the config file)
    /// 2. The `packageManager` field of `package.json`
    /// 3. Lockfiles
    /// 4. The `npm_config_user_agent` of the invoking package runner
    /// 5. npm
    ///
    /// # Errors
    ///
    /// `UnknownPackageManager` if an explicit request names an
    /// unsupported manager. Unrecognized values found on disk or in the
    /// environment are skipped.
    pub fn detect(project_root: &Path, requested: Option<&str>) -> Result<PackageManager> {
        let user_agent = std::env::var("npm_config_user_agent").ok();
        Self::detect_with_agent(project_root, requested, user_agent.as_deref())
    }

    /// [`detect`](Self::detect) with an explicit user agent.
    pub fn detect_with_agent(
        project_root: &Path,
        requested: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<PackageManager> {
        if let Some(name) = requested {
            return name.parse();
        }

        if let Some(pm) = Self::from_package_json(project_root) {
            tracing::debug!("Using {} from package.json", pm);
            return Ok(pm);
        }

        if let Some(pm) = Self::from_lockfiles(project_root) {
            tracing::debug!("Using {} from lockfile", pm);
            return Ok(pm);
        }

        if let Some(pm) = user_agent.and_then(Self::from_user_agent) {
            tracing::debug!("Using {} from user agent", pm);
            return Ok(pm);
        }

        Ok(PackageManager::Npm)
    }

    fn from_package_json(project_root: &Path) -> Option<PackageManager> {
        let content = fs::read_to_string(project_root.join("package.json")).ok()?;
        let package: PackageJson = match serde_json::from_str(&content) {
            Ok(package) => package,
            Err(e) => {
                tracing::debug!("Ignoring unreadable package.json: {}", e);
                return None;
            }
        };
        package.package_manager?.parse().ok()
    }

    fn from_lockfiles(project_root: &Path) -> Option<PackageManager> {
        LOCKFILES
            .iter()
            .find(|(file, _)| project_root.join(file).is_file())
            .map(|(_, pm)| *pm)
    }

    /// `pnpm/9.1.0 npm/? node/v20.11.0 darwin arm64` -> pnpm
    fn from_user_agent(agent: &str) -> Option<PackageManager> {
        let first = agent.split_whitespace().next()?;
        let name = first.split('/').next()?;
        name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SprigError;
    use std::fs;
    use tempfile::TempDir;

    fn detect(temp: &TempDir, requested: Option<&str>, agent: Option<&str>) -> Result<PackageManager> {
        PackageManagerDetector::detect_with_agent(temp.path(), requested, agent)
    }

    #[test]
    fn defaults_to_npm() {
        let temp = TempDir::new().unwrap();
        assert_eq!(detect(&temp, None, None).unwrap(), PackageManager::Npm);
    }

    #[test]
    fn detects_from_lockfiles() {
        for (file, expected) in LOCKFILES {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join(file), "").unwrap();
            assert_eq!(detect(&temp, None, None).unwrap(), *expected, "{}", file);
        }
    }

    #[test]
    fn yarn_lock_wins_over_package_lock() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package-lock.json"), "{}").unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();

        assert_eq!(detect(&temp, None, None).unwrap(), PackageManager::Yarn);
    }

    #[test]
    fn package_json_field_wins_over_lockfile() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"name": "app", "packageManager": "pnpm@9.1.0"}"#,
        )
        .unwrap();
        fs::write(temp.path().join("package-lock.json"), "{}").unwrap();

        assert_eq!(detect(&temp, None, None).unwrap(), PackageManager::Pnpm);
    }

    #[test]
    fn unknown_package_json_field_falls_through() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"packageManager": "deno@2.0.0"}"#,
        )
        .unwrap();
        fs::write(temp.path().join("bun.lockb"), "").unwrap();

        assert_eq!(detect(&temp, None, None).unwrap(), PackageManager::Bun);
    }

    #[test]
    fn user_agent_used_without_lockfile() {
        let temp = TempDir::new().unwrap();
        let agent = "yarn/1.22.19 npm/? node/v20.11.0 linux x64";
        assert_eq!(detect(&temp, None, Some(agent)).unwrap(), PackageManager::Yarn);
    }

    #[test]
    fn explicit_request_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();

        assert_eq!(
            detect(&temp, Some("bun"), Some("pnpm/9.0.0")).unwrap(),
            PackageManager::Bun
        );
    }

    #[test]
    fn explicit_unknown_request_fails() {
        let temp = TempDir::new().unwrap();
        let err = detect(&temp, Some("pip"), None).unwrap_err();
        assert!(matches!(err, SprigError::UnknownPackageManager { .. }));
    }
}
